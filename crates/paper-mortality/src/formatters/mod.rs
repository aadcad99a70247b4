//! Output formatting for analysis results.

pub mod json;
pub mod markdown;

pub use json::{batch_report, compact_record, population_report};
pub use markdown::{format_population_markdown, format_records_markdown, format_report_markdown};
