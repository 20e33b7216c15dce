use crate::config::Config;
use crate::error::{ConverterError, Result};
use crate::parser;
use crate::pipeline::list_files;
use crate::types::{DatePolicy, MinutesPair, RenameReport, RenamedFile};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Outcome for a single markdown document
#[derive(Debug, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed(RenamedFile),
    AlreadyCanonical,
    Skipped,
}

/// Renames minutes pairs to `YYYY-MM-DD-{suffix}.{ext}` using each document's Date Line.
pub struct Renamer<'a> {
    config: &'a Config,
}

impl<'a> Renamer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    fn apply_policy(&self, policy: DatePolicy, error: ConverterError) -> Result<RenameOutcome> {
        match policy {
            DatePolicy::Abort => Err(error),
            DatePolicy::SkipAndWarn => {
                warn!("Leaving file unrenamed: {}", error);
                Ok(RenameOutcome::Skipped)
            }
        }
    }

    #[instrument(skip_all, fields(file = %markdown.display()))]
    pub fn rename_file(&self, markdown: &Path) -> Result<RenameOutcome> {
        let text = fs::read_to_string(markdown)?;

        let Some(date_line) = parser::find_date_line(&text) else {
            return match self.config.missing_date_line {
                DatePolicy::Abort => Err(ConverterError::MissingDateLine(markdown.to_path_buf())),
                DatePolicy::SkipAndWarn => {
                    warn!("No Date line, leaving file unrenamed");
                    Ok(RenameOutcome::Skipped)
                }
            };
        };

        let date = match parser::parse_minutes_date(markdown, date_line) {
            Ok(date) => date,
            Err(e) => return self.apply_policy(self.config.malformed_date_line, e),
        };

        let new_name = date.canonical_name(
            &self.config.canonical_suffix,
            &self.config.markdown_extension,
        );
        let dir = markdown.parent().unwrap_or_else(|| Path::new("."));
        let target = dir.join(&new_name);

        if markdown.file_name() == target.file_name() {
            return Ok(RenameOutcome::AlreadyCanonical);
        }
        if target.exists() {
            warn!("{} already exists, not overwriting", target.display());
            return Ok(RenameOutcome::Skipped);
        }

        let pair = MinutesPair::new(markdown, &self.config.markup_extension);
        let markup_target = target.with_extension(&self.config.markup_extension);
        if pair.markup.is_some() && markup_target.exists() {
            warn!("{} already exists, not overwriting", markup_target.display());
            return Ok(RenameOutcome::Skipped);
        }

        fs::rename(markdown, &target)?;
        info!("Renamed to {}", new_name);

        let markup = match pair.markup {
            Some(markup) => {
                fs::rename(&markup, &markup_target)?;
                Some((markup, markup_target))
            }
            None => None,
        };

        Ok(RenameOutcome::Renamed(RenamedFile {
            from: markdown.to_path_buf(),
            to: target,
            markup,
        }))
    }

    /// Renames every markdown document in `dir`, in file name order.
    pub fn rename_dir(&self, dir: &Path) -> Result<RenameReport> {
        let mut report = RenameReport::default();
        let files: Vec<PathBuf> = list_files(dir, &self.config.markdown_extension)?;
        for path in files {
            match self.rename_file(&path)? {
                RenameOutcome::Renamed(renamed) => report.renamed.push(renamed),
                RenameOutcome::AlreadyCanonical => report.unchanged.push(path),
                RenameOutcome::Skipped => report.skipped.push(path),
            }
        }
        Ok(report)
    }
}
