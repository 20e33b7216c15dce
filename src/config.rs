use crate::constants;
use crate::error::{ConverterError, Result};
use crate::types::{DatePolicy, TableStrategy};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub markdown_extension: String,
    pub markup_extension: String,
    pub canonical_suffix: String,
    pub title: String,
    pub indent_width: usize,
    pub table_strategy: TableStrategy,
    pub missing_date_line: DatePolicy,
    pub malformed_date_line: DatePolicy,
    pub skip_sanitized: bool,
    pub boilerplate_markers: Vec<String>,
    pub table_prefixes: Vec<String>,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            markdown_extension: constants::MARKDOWN_EXTENSION.to_string(),
            markup_extension: constants::MARKUP_EXTENSION.to_string(),
            canonical_suffix: constants::CANONICAL_SUFFIX.to_string(),
            title: constants::TITLE.to_string(),
            indent_width: 1,
            table_strategy: TableStrategy::Element,
            missing_date_line: DatePolicy::SkipAndWarn,
            malformed_date_line: DatePolicy::Abort,
            skip_sanitized: true,
            boilerplate_markers: constants::BOILERPLATE_MARKERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            table_prefixes: constants::TABLE_PREFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Loads an explicit config file, else `<dir>/minutes.toml` when present, else defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = dir.join(constants::CONFIG_FILE_NAME);
                if !candidate.is_file() {
                    debug!(
                        "No {} in {}, using defaults",
                        constants::CONFIG_FILE_NAME,
                        dir.display()
                    );
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            ConverterError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        Self::from_toml(&config_content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.markdown_extension == self.markup_extension {
            return Err(ConverterError::Config(format!(
                "markdown and markup extensions must differ (both '{}')",
                self.markdown_extension
            )));
        }
        if self.canonical_suffix.is_empty() {
            return Err(ConverterError::Config(
                "canonical_suffix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
