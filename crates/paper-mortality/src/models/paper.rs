//! Paper and citation-link input models.

use serde::{Deserialize, Serialize};

use crate::config::limits;
use crate::error::{AnalysisError, AnalysisResult};

/// A paper whose death year should be estimated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperRecord {
    /// External identifier (usually a DOI), also the citation lookup key.
    pub id: String,

    /// Paper title.
    #[serde(default)]
    pub title: Option<String>,

    /// Publication year.
    #[serde(alias = "year")]
    pub birth_year: i32,

    /// Taxonomy category used when grouping results.
    #[serde(default)]
    pub taxon: Option<String>,
}

impl PaperRecord {
    /// Create a record with only the required fields.
    #[must_use]
    pub fn new(id: impl Into<String>, birth_year: i32) -> Self {
        Self { id: id.into(), birth_year, ..Default::default() }
    }

    /// Attach a taxon label.
    #[must_use]
    pub fn with_taxon(mut self, taxon: impl Into<String>) -> Self {
        self.taxon = Some(taxon.into());
        self
    }

    /// Attach a title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Get the paper title, falling back to "Untitled" if not available.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    /// Key used to look up citation years.
    #[must_use]
    pub fn lookup_key(&self) -> &str {
        self.id.trim()
    }

    /// Reject records the estimator cannot be given.
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.lookup_key().is_empty() {
            return Err(AnalysisError::invalid_input("id", "paper id cannot be empty"));
        }
        if !limits::is_plausible_year(self.birth_year) {
            return Err(AnalysisError::invalid_input(
                "birth_year",
                format!(
                    "{} is outside {}..={}",
                    self.birth_year,
                    limits::EARLIEST_YEAR,
                    limits::LATEST_YEAR
                ),
            ));
        }
        Ok(())
    }
}

/// One citation edge: `citing_key`, published in `citing_year`, cites `cited_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationLink {
    /// Key of the citing paper.
    #[serde(default)]
    pub citing_key: Option<String>,

    /// Publication year of the citing paper.
    pub citing_year: i32,

    /// Key of the cited paper.
    pub cited_key: String,
}

impl CitationLink {
    /// Placeholder some bibliographies emit for unresolved references.
    pub const UNRESOLVED: &'static str = "...";

    /// Create a link.
    #[must_use]
    pub fn new(citing_year: i32, cited_key: impl Into<String>) -> Self {
        Self { citing_key: None, citing_year, cited_key: cited_key.into() }
    }

    /// True when the cited side names a real paper.
    #[must_use]
    pub fn is_resolvable(&self) -> bool {
        let key = self.cited_key.trim();
        !key.is_empty() && key != Self::UNRESOLVED
    }
}
