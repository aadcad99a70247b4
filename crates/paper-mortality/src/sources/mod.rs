//! Citation sources: where citation years come from.
//!
//! The estimator never talks to a bibliographic service directly. Callers inject
//! a [`CitationSource`] that maps a paper key to the years it was cited in,
//! which keeps analysis and its tests free of network access.

mod graph;
mod merged;
mod table;

pub use graph::CitationGraph;
pub use merged::MergedSource;
pub use table::YearTable;

use crate::error::SourceResult;

/// Lookup of citation years by paper key.
#[async_trait::async_trait]
pub trait CitationSource: Send + Sync {
    /// Short name used in logs (e.g., "openalex").
    fn name(&self) -> &str;

    /// Years in which `key` was cited, one entry per citation.
    ///
    /// Unknown keys yield an empty list rather than an error.
    async fn citation_years(&self, key: &str) -> SourceResult<Vec<i32>>;
}
