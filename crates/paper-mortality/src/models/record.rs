//! Analysis result models.

use serde::{Deserialize, Serialize};

use crate::config::limits;
use crate::error::{AnalysisError, AnalysisResult};
use crate::estimator::{DeathDefinition, Window};
use crate::population::YearCounts;

/// Estimated lifespan of one paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeathRecord {
    /// Paper identifier.
    pub id: String,

    /// Paper title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Taxonomy category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxon: Option<String>,

    /// Publication year.
    pub birth_year: i32,

    /// Estimated death year (never earlier than `birth_year`).
    pub death_year: i32,

    /// Number of citation events found.
    #[serde(default, alias = "citations")]
    pub citation_count: usize,

    /// Most recent citation year, if cited at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_cited_year: Option<i32>,

    /// Citation events per calendar year.
    #[serde(default, skip_serializing_if = "YearCounts::is_empty")]
    pub citations_by_year: YearCounts,

    /// True when `death_year` was pulled back to the observation horizon.
    #[serde(default)]
    pub clamped: bool,

    /// Lookup failure that forced the no-citation fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup_error: Option<String>,
}

impl DeathRecord {
    /// Get the title, falling back to "Untitled" if not available.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    /// Years from birth to death.
    #[must_use]
    pub const fn lifespan(&self) -> i32 {
        self.death_year.saturating_sub(self.birth_year)
    }

    /// True if the paper counts as alive in `year`.
    #[must_use]
    pub const fn is_alive_in(&self, year: i32) -> bool {
        year >= self.birth_year && year <= self.death_year
    }

    /// Check if any citations were found.
    #[must_use]
    pub const fn has_citations(&self) -> bool {
        self.citation_count > 0
    }

    /// Reject records read from elsewhere whose years could not have come out
    /// of an analysis run.
    pub fn validate(&self) -> AnalysisResult<()> {
        for (field, year) in [("birth_year", self.birth_year), ("death_year", self.death_year)] {
            if !limits::is_plausible_year(year) {
                return Err(AnalysisError::invalid_input(
                    field,
                    format!(
                        "{year} is outside {}..={}",
                        limits::EARLIEST_YEAR,
                        limits::LATEST_YEAR
                    ),
                ));
            }
        }
        if self.death_year < self.birth_year {
            return Err(AnalysisError::invalid_input(
                "death_year",
                format!("died in {} before birth in {}", self.death_year, self.birth_year),
            ));
        }
        Ok(())
    }
}

/// Results of a batch run together with its settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Window used for the run.
    pub window: Window,

    /// Death definition used for the run.
    pub definition: DeathDefinition,

    /// One record per analysed paper, in input order.
    pub records: Vec<DeathRecord>,

    /// Papers rejected by validation.
    #[serde(default)]
    pub skipped: usize,

    /// Papers whose citation lookup failed.
    #[serde(default)]
    pub lookup_failures: usize,
}

impl BatchReport {
    /// Papers with at least one citation.
    #[must_use]
    pub fn cited_count(&self) -> usize {
        self.records.iter().filter(|r| r.has_citations()).count()
    }

    /// Mean lifespan in years, or `None` for an empty report.
    #[must_use]
    pub fn mean_lifespan(&self) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        let total: i64 = self.records.iter().map(|r| i64::from(r.lifespan())).sum();
        Some(total as f64 / self.records.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(birth_year: i32, death_year: i32, citation_count: usize) -> DeathRecord {
        DeathRecord {
            id: format!("paper-{birth_year}"),
            title: None,
            taxon: None,
            birth_year,
            death_year,
            citation_count,
            last_cited_year: None,
            citations_by_year: YearCounts::new(),
            clamped: false,
            lookup_error: None,
        }
    }

    #[test]
    fn test_alive_range_is_inclusive() {
        let r = record(2000, 2003, 4);
        assert!(!r.is_alive_in(1999));
        assert!(r.is_alive_in(2000));
        assert!(r.is_alive_in(2003));
        assert!(!r.is_alive_in(2004));
        assert_eq!(r.lifespan(), 3);
    }

    #[test]
    fn test_validate_rejects_impossible_spans() {
        assert!(record(2000, 2003, 4).validate().is_ok());
        assert!(record(2000, 1999, 4).validate().unwrap_err().is_invalid_input());
        assert!(record(i32::MIN, i32::MAX, 4).validate().is_err());
        assert!(record(2000, 5000, 4).validate().is_err());
    }

    #[test]
    fn test_citations_by_year_round_trips_through_json() {
        let mut r = record(2000, 2002, 3);
        r.citations_by_year = YearCounts::from([(2000, 2), (2001, 1)]);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["citationsByYear"]["2000"], 2);

        let back: DeathRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.citations_by_year, r.citations_by_year);
    }

    #[test]
    fn test_report_stats() {
        let report = BatchReport {
            window: Window::new(3, 5).unwrap(),
            definition: DeathDefinition::SlidingWindow,
            records: vec![record(2000, 2004, 10), record(2010, 2010, 0)],
            skipped: 0,
            lookup_failures: 0,
        };
        assert_eq!(report.cited_count(), 1);
        assert_eq!(report.mean_lifespan(), Some(2.0));
    }

    #[test]
    fn test_record_skips_empty_optionals() {
        let json = serde_json::to_value(record(2000, 2001, 1)).unwrap();
        assert!(json.get("lookupError").is_none());
        assert!(json.get("taxon").is_none());
        assert_eq!(json["deathYear"], 2001);
    }
}
