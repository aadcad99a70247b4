//! Cohort selection over analysis results.

use serde::{Deserialize, Serialize};

use crate::models::DeathRecord;

/// Keeps papers born no earlier than `min_birth_year` that died no later than
/// `max_death_year`. Unset bounds accept everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortFilter {
    /// Latest death year kept (inclusive).
    #[serde(default)]
    pub max_death_year: Option<i32>,

    /// Earliest birth year kept (inclusive).
    #[serde(default)]
    pub min_birth_year: Option<i32>,
}

impl CohortFilter {
    /// Create a filter with both bounds.
    #[must_use]
    pub const fn new(max_death_year: Option<i32>, min_birth_year: Option<i32>) -> Self {
        Self { max_death_year, min_birth_year }
    }

    /// True if the filter has no bounds.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.max_death_year.is_none() && self.min_birth_year.is_none()
    }

    /// Check a single record.
    #[must_use]
    pub fn matches(&self, record: &DeathRecord) -> bool {
        self.max_death_year.is_none_or(|cap| record.death_year <= cap)
            && self.min_birth_year.is_none_or(|start| record.birth_year >= start)
    }

    /// Retain matching records, preserving order.
    #[must_use]
    pub fn apply(&self, records: Vec<DeathRecord>) -> Vec<DeathRecord> {
        if self.is_unbounded() {
            return records;
        }
        let before = records.len();
        let kept: Vec<DeathRecord> = records.into_iter().filter(|r| self.matches(r)).collect();
        tracing::debug!(before, after = kept.len(), filter = ?self, "Applied cohort filter");
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, birth_year: i32, death_year: i32) -> DeathRecord {
        DeathRecord {
            id: id.to_string(),
            title: None,
            taxon: None,
            birth_year,
            death_year,
            citation_count: 0,
            citations_by_year: Default::default(),
            last_cited_year: None,
            clamped: false,
            lookup_error: None,
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let filter = CohortFilter::new(Some(2010), Some(1980));
        assert!(filter.matches(&record("a", 1980, 2010)));
        assert!(!filter.matches(&record("b", 1979, 2000)));
        assert!(!filter.matches(&record("c", 1990, 2011)));
    }

    #[test]
    fn test_unbounded_keeps_everything() {
        let records = vec![record("a", 1900, 2100), record("b", 2020, 2020)];
        assert_eq!(CohortFilter::default().apply(records.clone()), records);
    }

    #[test]
    fn test_apply_preserves_order() {
        let filter = CohortFilter::new(Some(2005), None);
        let kept = filter.apply(vec![
            record("a", 2000, 2004),
            record("b", 2000, 2008),
            record("c", 2001, 2005),
        ]);
        let ids: Vec<&str> = kept.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
