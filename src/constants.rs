/// Fixed strings shared by the three passes.
/// Most of them are only defaults: `Config` can override each one.

pub const MARKDOWN_EXTENSION: &str = "md";
pub const MARKUP_EXTENSION: &str = "html";

/// Stem suffix of a canonical name, e.g. `2023-03-15-Steering-Group-minutes.md`
pub const CANONICAL_SUFFIX: &str = "Steering-Group-minutes";

pub const TITLE: &str = "Steering Group minutes";

/// Substring that marks the Date Line in a markdown document
pub const DATE_MARKER: &str = "Date";

/// Inserted between the Date Line and the rest of the post
pub const MORE_MARKER: &str = "\n<!--more-->\n\n\n";

/// Per-directory config file picked up when no `--config` is given
pub const CONFIG_FILE_NAME: &str = "minutes.toml";

// Lines containing any of these never make it into a sanitized post
pub const BOILERPLATE_MARKERS: [&str; 7] = [
    "Check your local time",
    "arewemeetingyet",
    "stanford.zoom",
    "Password:",
    "Time:",
    "Room:",
    "Attending:",
];

// Leftovers of pandoc's markdown tables
pub const TABLE_PREFIXES: [&str; 3] = ["|", "+-", "+="];

pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Month number (1-based) for a full English month name, any case.
pub fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_ascii_lowercase();
    MONTH_NAMES
        .iter()
        .position(|m| *m == lower)
        .map(|i| i as u32 + 1)
}
