use crate::config::Config;
use crate::error::Result;
use crate::prettify::Prettifier;
use crate::renamer::Renamer;
use crate::sanitizer::Sanitizer;
use crate::types::{PrettifyReport, RenameReport, SanitizeReport};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub dir: PathBuf,
    pub rename: RenameReport,
    pub prettify: PrettifyReport,
    pub sanitize: SanitizeReport,
}

/// Regular files in `dir` (not recursive) with the given extension, sorted by name.
pub fn list_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub struct Pipeline;

impl Pipeline {
    pub fn rename(dir: &Path, config: &Config) -> Result<RenameReport> {
        info!("Renaming minutes in {}", dir.display());
        Renamer::new(config).rename_dir(dir)
    }

    pub fn prettify(dir: &Path, config: &Config) -> Result<PrettifyReport> {
        info!("Normalizing markup in {}", dir.display());
        Prettifier::new(config.indent_width).prettify_dir(dir, &config.markup_extension)
    }

    pub fn sanitize(dir: &Path, config: &Config) -> Result<SanitizeReport> {
        info!("Sanitizing markdown in {}", dir.display());
        Sanitizer::new(config).sanitize_dir(dir)
    }

    /// Rename, then prettify, then sanitize. The sanitizer relies on both:
    /// canonical names for the heading and normalized markup for the table block.
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub fn run(dir: &Path, config: &Config) -> Result<PipelineResult> {
        let rename = Self::rename(dir, config)?;
        let prettify = Self::prettify(dir, config)?;
        let sanitize = Self::sanitize(dir, config)?;

        info!(
            renamed = rename.renamed.len(),
            normalized = prettify.rewritten.len(),
            sanitized = sanitize.sanitized.len(),
            "Pipeline finished"
        );

        Ok(PipelineResult {
            dir: dir.to_path_buf(),
            rename,
            prettify,
            sanitize,
        })
    }
}
