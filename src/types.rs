use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Calendar date of one meeting: year from the file name, month/day from the Date Line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinutesDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl MinutesDate {
    /// `YYYY-MM-DD-{suffix}.{extension}`
    pub fn canonical_name(&self, suffix: &str, extension: &str) -> String {
        format!(
            "{}-{:02}-{:02}-{}.{}",
            self.year, self.month, self.day, suffix, extension
        )
    }
}

impl fmt::Display for MinutesDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A markdown document and its optional same-stem markup rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinutesPair {
    pub markdown: PathBuf,
    pub markup: Option<PathBuf>,
}

impl MinutesPair {
    pub fn new(markdown: &Path, markup_extension: &str) -> Self {
        let candidate = markdown.with_extension(markup_extension);
        Self {
            markdown: markdown.to_path_buf(),
            markup: candidate.is_file().then_some(candidate),
        }
    }
}

/// What to do when a document's Date Line is missing or unusable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatePolicy {
    Abort,
    SkipAndWarn,
}

/// How the table block is located in the markup document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableStrategy {
    /// First `table` element of the parsed document
    Element,
    /// First `<table>` line through the next `</table>` line
    LineScan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamedFile {
    pub from: PathBuf,
    pub to: PathBuf,
    pub markup: Option<(PathBuf, PathBuf)>,
}

#[derive(Debug, Default, Serialize)]
pub struct RenameReport {
    pub renamed: Vec<RenamedFile>,
    pub unchanged: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

#[derive(Debug, Default, Serialize)]
pub struct PrettifyReport {
    pub rewritten: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
}

#[derive(Debug, Default, Serialize)]
pub struct SanitizeReport {
    pub sanitized: Vec<PathBuf>,
    pub without_date_line: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}
