use anyhow::Result;
use minutes_converter::prettify::Prettifier;
use minutes_converter::types::TableStrategy;
use minutes_converter::{Config, ConverterError, Pipeline};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const FRONT_MATTER_2023: &str = "---\ntitle: Steering Group minutes\nauthor:\ndisplay: true\n---\n\n# Steering Group minutes 2023/03/15\n\n";

const MARCH_MD: &str = "\
Steering Group Meeting

Check your local time at https://arewemeetingyet.com/x
Join at https://stanford.zoom.us/j/123
Password: 1234

Meeting Date March 15

Time: 10am
Room: 101
Attending: Alice, Bob

| Item | Owner |
+------+-------+
+======+=======+

## Agenda

- Budget review
";

const MARCH_HTML: &str = "<html>
<body>
<p>Steering Group Meeting</p>
<table>
<tr><td>x</td></tr>
</table>
<p>after</p>
</body>
</html>
";

fn write(dir: &Path, name: &str, content: &str) -> Result<()> {
    fs::write(dir.join(name), content)?;
    Ok(())
}

fn table_lines(html: &str) -> String {
    let mut block = String::new();
    let mut inside = false;
    for line in html.lines() {
        if line.contains("<table>") {
            inside = true;
        }
        if inside {
            block.push_str(line);
            block.push('\n');
        }
        if line.contains("</table>") {
            break;
        }
    }
    block
}

#[test]
fn test_full_run_on_underscore_named_pair() -> Result<()> {
    let dir = tempdir()?;
    write(dir.path(), "2023_March_Minutes.md", MARCH_MD)?;
    write(dir.path(), "2023_March_Minutes.html", MARCH_HTML)?;

    let result = Pipeline::run(dir.path(), &Config::default())?;
    assert_eq!(result.rename.renamed.len(), 1);
    assert_eq!(result.sanitize.sanitized.len(), 1);

    let md_path = dir.path().join("2023-03-15-Steering-Group-minutes.md");
    let html_path = dir.path().join("2023-03-15-Steering-Group-minutes.html");
    assert!(md_path.is_file());
    assert!(html_path.is_file());
    assert!(!dir.path().join("2023_March_Minutes.md").exists());

    let html = fs::read_to_string(&html_path)?;
    let table = table_lines(&html);
    assert!(table.contains("<td>"));

    let md = fs::read_to_string(&md_path)?;
    let expected = format!(
        "{}Meeting Date March 15, 2023\n\n<!--more-->\n\n\n{}\n\n\n## Agenda\n\n- Budget review\n",
        FRONT_MATTER_2023, table
    );
    assert_eq!(md, expected);
    Ok(())
}

#[test]
fn test_boilerplate_dropped_on_both_sides_of_date_line() -> Result<()> {
    let dir = tempdir()?;
    write(
        dir.path(),
        "2023_March_Minutes.md",
        "Password: 1234\nMeeting Date March 15\nTime: 10am\nAttending: Alice, Bob\nNotes\n",
    )?;

    Pipeline::run(dir.path(), &Config::default())?;

    let md = fs::read_to_string(dir.path().join("2023-03-15-Steering-Group-minutes.md"))?;
    assert!(!md.contains("Password: 1234"));
    assert!(!md.contains("Time: 10am"));
    assert!(!md.contains("Attending: Alice, Bob"));
    assert!(md.ends_with("<!--more-->\n\n\nNotes\n"));
    Ok(())
}

#[test]
fn test_dash_named_file_with_words_before_date() -> Result<()> {
    let dir = tempdir()?;
    write(dir.path(), "2022-November-notes.md", "Our Date is November 3\nbody\n")?;

    let result = Pipeline::rename(dir.path(), &Config::default())?;
    assert_eq!(
        result.renamed[0].to,
        dir.path().join("2022-11-03-Steering-Group-minutes.md")
    );
    assert!(result.renamed[0].markup.is_none());
    Ok(())
}

#[test]
fn test_clean_body_preserved_after_date_line() -> Result<()> {
    let dir = tempdir()?;
    let body = "## Decisions\n\nWe agreed on things.\n\n* one\n* two\n";
    write(
        dir.path(),
        "2023-03-15-Steering-Group-minutes.md",
        &format!("Meeting Date March 15\n{}", body),
    )?;

    Pipeline::run(dir.path(), &Config::default())?;

    let md = fs::read_to_string(dir.path().join("2023-03-15-Steering-Group-minutes.md"))?;
    assert_eq!(
        md,
        format!(
            "{}Meeting Date March 15, 2023\n\n<!--more-->\n\n\n{}",
            FRONT_MATTER_2023, body
        )
    );
    Ok(())
}

#[test]
fn test_file_without_date_line() -> Result<()> {
    let dir = tempdir()?;
    write(dir.path(), "2022-November-notes.md", "no meeting info\nat all\n")?;

    let result = Pipeline::run(dir.path(), &Config::default())?;
    assert!(result.rename.renamed.is_empty());

    let path = dir.path().join("2022-November-notes.md");
    assert!(path.is_file());
    assert_eq!(
        fs::read_to_string(&path)?,
        "---\ntitle: Steering Group minutes\nauthor:\ndisplay: true\n---\n\n# Steering Group minutes 2022/November/notes\n\n"
    );
    assert_eq!(result.sanitize.without_date_line, vec![path]);
    Ok(())
}

#[test]
fn test_malformed_date_aborts_run_by_default() -> Result<()> {
    let dir = tempdir()?;
    write(dir.path(), "2023_bad.md", "Meeting Date Smarch 15\n")?;

    let err = Pipeline::run(dir.path(), &Config::default()).unwrap_err();
    assert!(matches!(err, ConverterError::DateParse { .. }));
    assert_eq!(fs::read_to_string(dir.path().join("2023_bad.md"))?, "Meeting Date Smarch 15\n");
    Ok(())
}

#[test]
fn test_run_twice_is_stable() -> Result<()> {
    let dir = tempdir()?;
    write(dir.path(), "2023_March_Minutes.md", MARCH_MD)?;
    write(dir.path(), "2023_March_Minutes.html", MARCH_HTML)?;

    let config = Config::default();
    Pipeline::run(dir.path(), &config)?;
    let md_path = dir.path().join("2023-03-15-Steering-Group-minutes.md");
    let html_path = dir.path().join("2023-03-15-Steering-Group-minutes.html");
    let md = fs::read_to_string(&md_path)?;
    let html = fs::read_to_string(&html_path)?;

    let second = Pipeline::run(dir.path(), &config)?;
    assert!(second.rename.renamed.is_empty());
    assert_eq!(second.rename.unchanged, vec![md_path.clone()]);
    assert!(second.prettify.rewritten.is_empty());
    assert_eq!(fs::read_to_string(&md_path)?, md);
    assert_eq!(fs::read_to_string(&html_path)?, html);
    Ok(())
}

#[test]
fn test_prettify_twice_is_byte_identical() {
    let prettifier = Prettifier::new(1);
    let once = prettifier.prettify_str(MARCH_HTML);
    assert_eq!(prettifier.prettify_str(&once), once);
}

#[test]
fn test_line_scan_strategy_matches_element_strategy() -> Result<()> {
    let mut outputs = Vec::new();
    for strategy in [TableStrategy::Element, TableStrategy::LineScan] {
        let dir = tempdir()?;
        write(dir.path(), "2023_March_Minutes.md", MARCH_MD)?;
        write(dir.path(), "2023_March_Minutes.html", MARCH_HTML)?;
        let config = Config {
            table_strategy: strategy,
            ..Config::default()
        };
        Pipeline::run(dir.path(), &config)?;
        outputs.push(fs::read_to_string(
            dir.path().join("2023-03-15-Steering-Group-minutes.md"),
        )?);
    }
    assert_eq!(outputs[0], outputs[1]);
    Ok(())
}

#[test]
fn test_multi_attribute_markup_is_not_rewritten_on_rerun() -> Result<()> {
    let dir = tempdir()?;
    write(dir.path(), "2023_March_Minutes.md", MARCH_MD)?;
    write(
        dir.path(),
        "2023_March_Minutes.html",
        "<body><table class=\"grid\" id=\"t1\" style=\"width:100%\" data-a=\"1\" title=\"x\">\
         <tr><td>x</td></tr></table></body>",
    )?;

    let config = Config::default();
    Pipeline::run(dir.path(), &config)?;
    let html_path = dir.path().join("2023-03-15-Steering-Group-minutes.html");
    let html = fs::read_to_string(&html_path)?;
    assert!(html.contains(
        "<table class=\"grid\" id=\"t1\" style=\"width:100%\" data-a=\"1\" title=\"x\">"
    ));

    let second = Pipeline::run(dir.path(), &config)?;
    assert!(second.prettify.rewritten.is_empty());
    assert_eq!(second.prettify.unchanged, vec![html_path.clone()]);
    assert_eq!(fs::read_to_string(&html_path)?, html);
    Ok(())
}
