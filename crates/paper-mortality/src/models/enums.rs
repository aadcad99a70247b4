//! Output format selection.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisResult;

/// How analysis results are written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Markdown tables for reading.
    #[default]
    Markdown,
    /// Pretty-printed JSON, readable back by `population`.
    Json,
}

impl ResponseFormat {
    /// Render with whichever formatter matches this format.
    ///
    /// Only the selected closure runs.
    pub fn render(
        self,
        markdown: impl FnOnce() -> String,
        json: impl FnOnce() -> serde_json::Value,
    ) -> AnalysisResult<String> {
        match self {
            Self::Markdown => Ok(markdown()),
            Self::Json => Ok(serde_json::to_string_pretty(&json())?),
        }
    }

    /// Conventional file extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }
}
