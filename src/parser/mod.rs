//! Extraction of meeting dates from minutes documents and their file names.
//!
//! The year always comes from the legacy file name (`2023_March_Minutes.md` or
//! `2022-November-notes.md`), month and day from the first line of the body
//! that contains `Date`. The two are never cross-checked.

use crate::constants::{self, DATE_MARKER};
use crate::error::{ConverterError, DateParseError, Result};
use crate::types::MinutesDate;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

// A full month name followed by a one or two digit day, e.g. "March 15," or "november 3"
static MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    let months = constants::MONTH_NAMES.join("|");
    Regex::new(&format!(r"(?i)\b({months})\s+(\d{{1,2}})(?:\D|$)"))
        .expect("month/day regex is valid")
});

// A month name followed by anything, used to report what the day looked like
static MONTH_ANY: Lazy<Regex> = Lazy::new(|| {
    let months = constants::MONTH_NAMES.join("|");
    Regex::new(&format!(r"(?i)\b({months})\b\s*(\S*)"))
        .expect("month regex is valid")
});

/// First line containing the Date marker, without its line ending.
pub fn find_date_line(text: &str) -> Option<&str> {
    text.lines().find(|line| line.contains(DATE_MARKER))
}

/// Month number and day from a Date Line such as `Meeting Date March 15`.
pub fn parse_month_day(line: &str) -> std::result::Result<(u32, u32), DateParseError> {
    if let Some(caps) = MONTH_DAY.captures(line) {
        let month = constants::month_number(&caps[1]).ok_or_else(|| {
            DateParseError::MissingMonthDay {
                line: line.to_string(),
            }
        })?;
        let day = caps[2]
            .parse::<u32>()
            .map_err(|_| DateParseError::InvalidDay {
                line: line.to_string(),
                day: caps[2].to_string(),
            })?;
        return Ok((month, day));
    }

    match MONTH_ANY.captures(line) {
        Some(caps) => Err(DateParseError::InvalidDay {
            line: line.to_string(),
            day: caps[2].to_string(),
        }),
        None => Err(DateParseError::MissingMonthDay {
            line: line.to_string(),
        }),
    }
}

/// Year prefix of a legacy file name: `YYYY_rest` or, failing that, `YYYY-rest`.
pub fn year_from_file_name(path: &Path) -> Result<i32> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ConverterError::FileName {
            file: path.to_path_buf(),
            reason: "file name is not valid UTF-8".to_string(),
        })?;

    let mut year = name.split('_').next().unwrap_or(name);
    if year.chars().count() > 4 {
        year = name.split('-').next().unwrap_or(name);
    }

    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConverterError::FileName {
            file: path.to_path_buf(),
            reason: format!("expected a four digit year prefix, found {:?}", year),
        });
    }
    year.parse::<i32>().map_err(|e| ConverterError::FileName {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Full meeting date of a markdown document given its Date Line.
pub fn parse_minutes_date(path: &Path, date_line: &str) -> Result<MinutesDate> {
    let year = year_from_file_name(path)?;
    let (month, day) = parse_month_day(date_line).map_err(|source| ConverterError::DateParse {
        file: path.to_path_buf(),
        source,
    })?;

    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
        return Err(ConverterError::DateParse {
            file: path.to_path_buf(),
            source: DateParseError::InvalidDate { year, month, day },
        });
    }
    Ok(MinutesDate { year, month, day })
}

/// `(year, month, day)` strings for the post heading, from the first three
/// `-` separated segments of the file stem.
pub fn heading_parts(path: &Path) -> Option<(String, String, String)> {
    let stem = path.file_stem()?.to_str()?;
    let mut parts = stem.split('-');
    let year = parts.next()?;
    let month = parts.next()?;
    let day = parts.next()?;
    Some((year.to_string(), month.to_string(), day.to_string()))
}
