use crate::config::Config;
use crate::constants::{DATE_MARKER, MORE_MARKER};
use crate::error::Result;
use crate::parser;
use crate::pipeline::list_files;
use crate::table::{self, TableSource};
use crate::types::SanitizeReport;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Heading parts of a post, as strings taken from the canonical file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostHeading {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl PostHeading {
    pub fn from_path(path: &Path) -> Option<Self> {
        let (year, month, day) = parser::heading_parts(path)?;
        Some(Self { year, month, day })
    }
}

pub fn front_matter(title: &str, heading: &PostHeading) -> String {
    format!(
        "---\ntitle: {title}\nauthor:\ndisplay: true\n---\n\n# {title} {}/{}/{}\n\n",
        heading.year, heading.month, heading.day
    )
}

#[derive(Debug)]
pub struct SanitizedPost {
    pub content: String,
    pub has_date_line: bool,
}

/// Rewrites minutes markdown into a post: front matter, filtered body, HTML table.
pub struct Sanitizer<'a> {
    config: &'a Config,
    tables: Box<dyn TableSource>,
}

impl<'a> Sanitizer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            tables: table::table_source(config.table_strategy, config.indent_width),
        }
    }

    fn is_boilerplate(&self, line: &str) -> bool {
        self.config
            .boilerplate_markers
            .iter()
            .any(|marker| line.contains(marker.as_str()))
    }

    fn is_table_syntax(&self, line: &str) -> bool {
        self.config
            .table_prefixes
            .iter()
            .any(|prefix| line.starts_with(prefix.as_str()))
    }

    /// Whether `text` already starts with the front matter this sanitizer writes.
    pub fn is_sanitized(&self, text: &str) -> bool {
        text.starts_with(&format!("---\ntitle: {}\n", self.config.title))
    }

    /// Builds the post for `text`. Nothing after the front matter is kept until
    /// the first line containing `Date`; that line gets the year appended and
    /// is followed by the more marker and the table of `markup_path`.
    pub fn render(
        &self,
        text: &str,
        heading: &PostHeading,
        markup_path: &Path,
    ) -> Result<SanitizedPost> {
        let mut content = front_matter(&self.config.title, heading);
        let mut emitting = false;

        for line in text.split_inclusive('\n') {
            if self.is_boilerplate(line) {
                debug!("Dropping boilerplate line {:?}", line.trim_end());
                continue;
            }
            if self.is_table_syntax(line) {
                continue;
            }

            if emitting {
                content.push_str(line);
            } else if line.contains(DATE_MARKER) {
                emitting = true;
                let date_line = line.trim_end_matches(['\r', '\n']);
                content.push_str(&format!("{}, {}\n", date_line, heading.year));
                content.push_str(MORE_MARKER);
                if let Some(block) = table::copy_table(self.tables.as_ref(), markup_path)? {
                    content.push_str(&block);
                }
            }
        }

        Ok(SanitizedPost {
            content,
            has_date_line: emitting,
        })
    }

    #[instrument(skip_all, fields(file = %markdown.display()))]
    pub fn sanitize_file(&self, markdown: &Path, report: &mut SanitizeReport) -> Result<()> {
        let Some(heading) = PostHeading::from_path(markdown) else {
            warn!("File name has no year-month-day parts, skipping");
            report.skipped.push(markdown.to_path_buf());
            return Ok(());
        };

        let text = fs::read_to_string(markdown)?;
        if self.config.skip_sanitized && self.is_sanitized(&text) {
            debug!("Already sanitized, skipping");
            report.skipped.push(markdown.to_path_buf());
            return Ok(());
        }

        let markup_path = markdown.with_extension(&self.config.markup_extension);
        let post = self.render(&text, &heading, &markup_path)?;
        fs::write(markdown, post.content)?;

        if post.has_date_line {
            info!("Sanitized");
            report.sanitized.push(markdown.to_path_buf());
        } else {
            warn!("No Date line, only front matter written");
            report.without_date_line.push(markdown.to_path_buf());
        }
        Ok(())
    }

    /// Sanitizes every markdown document in `dir`.
    pub fn sanitize_dir(&self, dir: &Path) -> Result<SanitizeReport> {
        let mut report = SanitizeReport::default();
        for path in list_files(dir, &self.config.markdown_extension)? {
            self.sanitize_file(&path, &mut report)?;
        }
        Ok(report)
    }
}
