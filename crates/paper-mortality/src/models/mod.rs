//! Data models for papers, citation links and analysis results.
//!
//! All models use `#[serde(rename_all = "camelCase")]` and `#[serde(default)]`
//! for optional fields so hand-written JSON inputs stay terse.

mod enums;
mod paper;
mod record;

pub use enums::ResponseFormat;
pub use paper::{CitationLink, PaperRecord};
pub use record::{BatchReport, DeathRecord};
