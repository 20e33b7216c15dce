//! Converts a folder of Steering Group meeting minutes (pandoc markdown plus
//! an HTML rendering of each meeting) into dated blog posts.
//!
//! Three passes run in order over one directory: [`renamer`] gives every pair
//! a canonical `YYYY-MM-DD-Steering-Group-minutes` name, [`prettify`]
//! normalizes the HTML, and [`sanitizer`] rewrites the markdown with front
//! matter and the HTML table in place of pandoc's.

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod prettify;
pub mod renamer;
pub mod sanitizer;
pub mod table;
pub mod types;

pub use config::Config;
pub use error::{ConverterError, DateParseError, Result};
pub use pipeline::{Pipeline, PipelineResult};
