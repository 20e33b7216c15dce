use crate::error::Result;
use crate::prettify::Prettifier;
use crate::types::TableStrategy;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::fs;
use std::path::Path;
use tracing::debug;

static TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("table selector is valid"));

/// Finds the first table of a markup document and returns it as a block of lines.
pub trait TableSource {
    fn first_table(&self, markup: &str) -> Option<String>;
}

/// Locates the first `table` element in the parsed document and prints just that subtree.
///
/// On a normalized file the block is line-for-line what sits in the file, but
/// attributes on the tag and nested tables do not confuse it.
pub struct ElementTableSource {
    prettifier: Prettifier,
}

impl ElementTableSource {
    pub fn new(indent_width: usize) -> Self {
        Self {
            prettifier: Prettifier::new(indent_width),
        }
    }
}

impl TableSource for ElementTableSource {
    fn first_table(&self, markup: &str) -> Option<String> {
        let document = Html::parse_document(markup);
        let table = document.select(&TABLE).next()?;
        let depth = table
            .ancestors()
            .filter(|node| node.value().is_element())
            .count();
        Some(self.prettifier.prettify_element(table, depth))
    }
}

/// Copies the lines from the first one containing `<table>` through the next
/// one containing `</table>`, by plain substring matching.
pub struct LineScanTableSource;

impl TableSource for LineScanTableSource {
    fn first_table(&self, markup: &str) -> Option<String> {
        let mut block = String::new();
        let mut inside = false;
        for line in markup.split_inclusive('\n') {
            if !inside && line.contains("<table>") {
                inside = true;
            }
            if inside {
                block.push_str(line);
                if !line.ends_with('\n') {
                    block.push('\n');
                }
                if line.contains("</table>") {
                    return Some(block);
                }
            }
        }
        // Unterminated table: keep what was found
        inside.then_some(block)
    }
}

pub fn table_source(strategy: TableStrategy, indent_width: usize) -> Box<dyn TableSource> {
    match strategy {
        TableStrategy::Element => Box::new(ElementTableSource::new(indent_width)),
        TableStrategy::LineScan => Box::new(LineScanTableSource),
    }
}

/// Table block of the markup file at `markup_path`, or `None` when the file
/// does not exist or holds no table.
pub fn copy_table(source: &dyn TableSource, markup_path: &Path) -> Result<Option<String>> {
    if !markup_path.is_file() {
        debug!("No markup file {}", markup_path.display());
        return Ok(None);
    }
    let markup = fs::read_to_string(markup_path)?;
    let table = source.first_table(&markup);
    if table.is_none() {
        debug!("No table in {}", markup_path.display());
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NORMALIZED: &str = "<html>\n <head>\n </head>\n <body>\n  <p>\n   intro\n  </p>\n  <table>\n   <tbody>\n    <tr>\n     <td>\n      x\n     </td>\n    </tr>\n   </tbody>\n  </table>\n  <table>\n   <tbody>\n    <tr>\n     <td>\n      second\n     </td>\n    </tr>\n   </tbody>\n  </table>\n </body>\n</html>\n";

    const FIRST_TABLE: &str = "  <table>\n   <tbody>\n    <tr>\n     <td>\n      x\n     </td>\n    </tr>\n   </tbody>\n  </table>\n";

    #[test]
    fn test_line_scan_copies_first_table_only() {
        assert_eq!(
            LineScanTableSource.first_table(NORMALIZED).as_deref(),
            Some(FIRST_TABLE)
        );
    }

    #[test]
    fn test_element_matches_line_scan_on_normalized_markup() {
        let source = ElementTableSource::new(1);
        assert_eq!(source.first_table(NORMALIZED).as_deref(), Some(FIRST_TABLE));
    }

    #[test]
    fn test_element_handles_attributes_on_table_tag() {
        let markup = "<body><table class=\"grid\"><tr><td>x</td></tr></table></body>";
        assert_eq!(LineScanTableSource.first_table(markup), None);
        let block = ElementTableSource::new(1).first_table(markup).unwrap();
        assert!(block.starts_with("  <table class=\"grid\">\n"));
        assert!(block.ends_with("  </table>\n"));
    }

    #[test]
    fn test_no_table() {
        assert_eq!(LineScanTableSource.first_table("<p>x</p>\n"), None);
        assert_eq!(ElementTableSource::new(1).first_table("<p>x</p>"), None);
    }

    #[test]
    fn test_copy_table_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = copy_table(&LineScanTableSource, &dir.path().join("none.html")).unwrap();
        assert_eq!(result, None);
    }
}
