//! Output formatting module
//!
//! Provides various output formats for probe runs.

mod formatter;

pub use formatter::{save_summary, OutputFormat, ResultFormatter};
