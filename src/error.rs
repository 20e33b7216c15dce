use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConverterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad date line in {}: {source}", file.display())]
    DateParse {
        file: PathBuf,
        #[source]
        source: DateParseError,
    },

    #[error("No line containing 'Date' in {}", .0.display())]
    MissingDateLine(PathBuf),

    #[error("Unrecognized file name {}: {reason}", file.display())]
    FileName { file: PathBuf, reason: String },
}

/// Failure kinds for the human-written "Date" line of a minutes document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    #[error("no '<Month> <day>' pair found in {line:?}")]
    MissingMonthDay { line: String },

    #[error("day {day:?} is not a number in {line:?}")]
    InvalidDay { line: String, day: String },

    #[error("{year}-{month:02}-{day:02} is not a calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

pub type Result<T> = std::result::Result<T, ConverterError>;
