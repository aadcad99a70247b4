//! Batch death-year analysis.
//!
//! Each paper goes through: validate → look up citation years → estimate →
//! clamp to the observation horizon. Papers are independent, so a batch runs
//! lookups concurrently (bounded by [`Config::concurrency`]) while keeping the
//! output in input order.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::config::{Config, limits};
use crate::error::AnalysisResult;
use crate::estimator::last_cited_year;
use crate::models::{BatchReport, DeathRecord, PaperRecord};
use crate::population::citations_by_year;
use crate::sources::CitationSource;

/// Estimates death years for papers using an injected citation source.
#[derive(Clone)]
pub struct MortalityAnalyzer {
    source: Arc<dyn CitationSource>,
    config: Config,
}

enum Outcome {
    Estimated(DeathRecord),
    LookupFailed(DeathRecord),
    Skipped,
}

impl MortalityAnalyzer {
    /// Create an analyzer.
    #[must_use]
    pub fn new(source: Arc<dyn CitationSource>, config: Config) -> Self {
        Self { source, config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Analyse one paper.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a record without an id, or the source error if
    /// the citation lookup fails.
    pub async fn analyze_paper(&self, paper: &PaperRecord) -> AnalysisResult<DeathRecord> {
        paper.validate()?;
        let years = self.source.citation_years(paper.lookup_key()).await?;
        Ok(self.record_for(paper, &years, None))
    }

    /// Analyse a batch of papers.
    ///
    /// Invalid records are skipped. A failed lookup does not abort the batch: the
    /// paper is treated as uncited and the error is kept on its record.
    pub async fn analyze_batch(&self, papers: &[PaperRecord]) -> BatchReport {
        tracing::info!(
            papers = papers.len(),
            window = %self.config.window,
            definition = ?self.config.definition,
            source = self.source.name(),
            "Starting batch analysis"
        );

        let outcomes: Vec<Outcome> = stream::iter(papers)
            .map(|paper| self.analyze_one(paper))
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        let mut report = BatchReport {
            window: self.config.window,
            definition: self.config.definition,
            records: Vec::with_capacity(outcomes.len()),
            skipped: 0,
            lookup_failures: 0,
        };

        for outcome in outcomes {
            match outcome {
                Outcome::Estimated(record) => report.records.push(record),
                Outcome::LookupFailed(record) => {
                    report.lookup_failures += 1;
                    report.records.push(record);
                }
                Outcome::Skipped => report.skipped += 1,
            }
        }

        tracing::info!(
            analyzed = report.records.len(),
            skipped = report.skipped,
            lookup_failures = report.lookup_failures,
            "Batch analysis complete"
        );
        report
    }

    /// Build the result record for a paper whose citation years are known.
    ///
    /// Uncited papers die in their birth year regardless of the death definition.
    /// Citation years outside the accepted calendar range are ignored. `paper`
    /// should already have passed [`PaperRecord::validate`].
    #[must_use]
    pub fn record_for(
        &self,
        paper: &PaperRecord,
        citation_years: &[i32],
        lookup_error: Option<String>,
    ) -> DeathRecord {
        let citation_years = &plausible_years(paper, citation_years);
        let birth_year = paper.birth_year;
        let estimated = if citation_years.is_empty() {
            birth_year
        } else {
            self.config.definition.death_year(self.config.window, citation_years, birth_year)
        };

        let (death_year, clamped) = match self.config.observation_end {
            Some(end) if estimated > end => (end.max(birth_year), true),
            _ => (estimated, false),
        };

        DeathRecord {
            id: paper.lookup_key().to_string(),
            title: paper.title.clone(),
            taxon: paper.taxon.clone(),
            birth_year,
            death_year,
            citation_count: citation_years.len(),
            last_cited_year: (!citation_years.is_empty())
                .then(|| last_cited_year(citation_years, birth_year)),
            citations_by_year: citations_by_year(citation_years),
            clamped,
            lookup_error,
        }
    }

    async fn analyze_one(&self, paper: &PaperRecord) -> Outcome {
        if let Err(e) = paper.validate() {
            tracing::warn!(paper = %paper.id, error = %e, "Skipping invalid paper");
            return Outcome::Skipped;
        }

        match self.source.citation_years(paper.lookup_key()).await {
            Ok(years) => {
                let record = self.record_for(paper, &years, None);
                tracing::debug!(
                    paper = %record.id,
                    birth = record.birth_year,
                    death = record.death_year,
                    citations = record.citation_count,
                    "Estimated death year"
                );
                Outcome::Estimated(record)
            }
            Err(e) => {
                tracing::warn!(
                    paper = %paper.id,
                    source = self.source.name(),
                    error = %e,
                    "Citation lookup failed, treating paper as uncited"
                );
                Outcome::LookupFailed(self.record_for(paper, &[], Some(e.to_string())))
            }
        }
    }
}

/// Drop citation years outside [`limits::EARLIEST_YEAR`]..=[`limits::LATEST_YEAR`].
fn plausible_years(paper: &PaperRecord, citation_years: &[i32]) -> Vec<i32> {
    let years: Vec<i32> =
        citation_years.iter().copied().filter(|&year| limits::is_plausible_year(year)).collect();
    if years.len() < citation_years.len() {
        tracing::warn!(
            paper = %paper.id,
            dropped = citation_years.len() - years.len(),
            "Ignoring citation years outside the accepted range"
        );
    }
    years
}

impl std::fmt::Debug for MortalityAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MortalityAnalyzer")
            .field("source", &self.source.name())
            .field("config", &self.config)
            .finish()
    }
}
