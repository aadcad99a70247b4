//! Citation years derived from a list of citation edges.

use std::collections::HashMap;
use std::path::Path;

use super::CitationSource;
use crate::error::SourceResult;
use crate::models::CitationLink;

/// Reverse index from cited key to the years of the papers citing it.
#[derive(Debug, Clone, Default)]
pub struct CitationGraph {
    name: String,
    cited_by_years: HashMap<String, Vec<i32>>,
    links: usize,
    skipped: usize,
}

impl CitationGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Build a graph from citation edges.
    #[must_use]
    pub fn from_links(
        name: impl Into<String>,
        links: impl IntoIterator<Item = CitationLink>,
    ) -> Self {
        let mut graph = Self::new(name);
        for link in links {
            graph.add_link(&link);
        }
        graph
    }

    /// Load a JSON array of citation links from disk.
    pub async fn from_json_file(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> SourceResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let links: Vec<CitationLink> = serde_json::from_slice(&bytes)?;
        let graph = Self::from_links(name, links);
        tracing::info!(
            path = %path.display(),
            links = graph.link_count(),
            skipped = graph.skipped_count(),
            cited_papers = graph.cited_paper_count(),
            "Loaded citation graph"
        );
        Ok(graph)
    }

    /// Add one edge; unresolved edges are counted and ignored.
    pub fn add_link(&mut self, link: &CitationLink) {
        if !link.is_resolvable() {
            self.skipped += 1;
            return;
        }
        self.cited_by_years
            .entry(link.cited_key.trim().to_string())
            .or_default()
            .push(link.citing_year);
        self.links += 1;
    }

    /// Edges indexed.
    #[must_use]
    pub const fn link_count(&self) -> usize {
        self.links
    }

    /// Edges ignored because the cited side was unresolved.
    #[must_use]
    pub const fn skipped_count(&self) -> usize {
        self.skipped
    }

    /// Distinct papers with at least one citation.
    #[must_use]
    pub fn cited_paper_count(&self) -> usize {
        self.cited_by_years.len()
    }

    /// Most recent citing year for every cited paper, sorted by key.
    #[must_use]
    pub fn last_cited_years(&self) -> Vec<(&str, i32)> {
        let mut last: Vec<(&str, i32)> = self
            .cited_by_years
            .iter()
            .filter_map(|(key, years)| years.iter().max().map(|&y| (key.as_str(), y)))
            .collect();
        last.sort_unstable_by(|a, b| a.0.cmp(b.0));
        last
    }
}

#[async_trait::async_trait]
impl CitationSource for CitationGraph {
    fn name(&self) -> &str {
        &self.name
    }

    async fn citation_years(&self, key: &str) -> SourceResult<Vec<i32>> {
        Ok(self.cited_by_years.get(key).cloned().unwrap_or_default())
    }
}
