//! Combine several citation sources into one.

use std::sync::Arc;

use super::CitationSource;
use crate::error::{SourceError, SourceResult};

/// Concatenates the citation years reported by every member source.
///
/// Duplicates are kept since each entry is a separate citation event. A failing
/// member is logged and skipped; the lookup only fails when every member does.
#[derive(Clone, Default)]
pub struct MergedSource {
    sources: Vec<Arc<dyn CitationSource>>,
}

impl MergedSource {
    /// Create an empty merged source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member source.
    #[must_use]
    pub fn with(mut self, source: Arc<dyn CitationSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Add a member source in place.
    pub fn push(&mut self, source: Arc<dyn CitationSource>) {
        self.sources.push(source);
    }

    /// Number of member sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if there are no member sources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[async_trait::async_trait]
impl CitationSource for MergedSource {
    fn name(&self) -> &str {
        "merged"
    }

    async fn citation_years(&self, key: &str) -> SourceResult<Vec<i32>> {
        let lookups =
            futures::future::join_all(self.sources.iter().map(|s| s.citation_years(key))).await;

        let mut years = Vec::new();
        let mut last_error: Option<SourceError> = None;
        let mut answered = 0usize;

        for (source, result) in self.sources.iter().zip(lookups) {
            match result {
                Ok(found) => {
                    tracing::debug!(source = source.name(), key, citations = found.len(), "Lookup");
                    years.extend(found);
                    answered += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        source = source.name(),
                        key,
                        error = %e,
                        "Citation lookup failed"
                    );
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if answered == 0 => Err(e),
            _ => Ok(years),
        }
    }
}

impl std::fmt::Debug for MergedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("MergedSource").field("sources", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::YearTable;

    struct FailingSource;

    #[async_trait::async_trait]
    impl CitationSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn citation_years(&self, _key: &str) -> SourceResult<Vec<i32>> {
            Err(SourceError::unavailable("failing", "offline"))
        }
    }

    fn table(name: &str, years: &[i32]) -> Arc<dyn CitationSource> {
        let mut t = YearTable::new(name);
        t.insert("k", years.iter().copied());
        Arc::new(t)
    }

    #[tokio::test]
    async fn test_concatenates_with_duplicates() {
        let merged = MergedSource::new().with(table("a", &[2001, 2002])).with(table("b", &[2002]));
        assert_eq!(merged.len(), 2);

        let years = merged.citation_years("k").await.unwrap();
        assert_eq!(years, vec![2001, 2002, 2002]);
    }

    #[tokio::test]
    async fn test_partial_failure_is_tolerated() {
        let merged = MergedSource::new().with(Arc::new(FailingSource)).with(table("a", &[2001]));
        assert_eq!(merged.citation_years("k").await.unwrap(), vec![2001]);
    }

    #[tokio::test]
    async fn test_total_failure_is_reported() {
        let merged = MergedSource::new().with(Arc::new(FailingSource));
        assert!(merged.citation_years("k").await.is_err());
    }

    #[tokio::test]
    async fn test_empty_merge_finds_nothing() {
        let merged = MergedSource::new();
        assert!(merged.is_empty());
        assert!(merged.citation_years("k").await.unwrap().is_empty());
    }

    #[test]
    fn test_debug_lists_members() {
        let merged = MergedSource::new().with(table("openalex", &[]));
        assert!(format!("{merged:?}").contains("openalex"));
    }
}
