//! Population tallies over analysis results: how many papers are alive, born,
//! dying or being cited in each year, optionally split by taxon.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::DeathRecord;

/// Taxon assigned to records without one.
pub const UNCLASSIFIED: &str = "unclassified";

/// Counts keyed by calendar year.
pub type YearCounts = BTreeMap<i32, u32>;

/// Group records by taxon label.
#[must_use]
pub fn group_by_taxon(records: &[DeathRecord]) -> BTreeMap<&str, Vec<&DeathRecord>> {
    let mut groups: BTreeMap<&str, Vec<&DeathRecord>> = BTreeMap::new();
    for record in records {
        let taxon = record.taxon.as_deref().map(str::trim).filter(|t| !t.is_empty());
        groups.entry(taxon.unwrap_or(UNCLASSIFIED)).or_default().push(record);
    }
    groups
}

/// Papers alive in each year. A paper is alive from its birth year through its
/// death year, both inclusive.
#[must_use]
pub fn alive_by_year<'a>(records: impl IntoIterator<Item = &'a DeathRecord>) -> YearCounts {
    let mut alive = YearCounts::new();
    for record in records {
        for year in record.birth_year..=record.death_year {
            *alive.entry(year).or_insert(0) += 1;
        }
    }
    alive
}

/// Papers published in each year.
#[must_use]
pub fn births_by_year<'a>(records: impl IntoIterator<Item = &'a DeathRecord>) -> YearCounts {
    tally(records.into_iter().map(|r| r.birth_year))
}

/// Papers dying in each year.
#[must_use]
pub fn deaths_by_year<'a>(records: impl IntoIterator<Item = &'a DeathRecord>) -> YearCounts {
    tally(records.into_iter().map(|r| r.death_year))
}

/// Citation events in each calendar year.
#[must_use]
pub fn citations_by_year(citation_years: &[i32]) -> YearCounts {
    tally(citation_years.iter().copied())
}

/// Citation events per year summed over all records.
#[must_use]
pub fn group_citations_by_year<'a>(
    records: impl IntoIterator<Item = &'a DeathRecord>,
) -> YearCounts {
    let mut total = YearCounts::new();
    for record in records {
        for (&year, &count) in &record.citations_by_year {
            *total.entry(year).or_insert(0) += count;
        }
    }
    total
}

fn tally(years: impl Iterator<Item = i32>) -> YearCounts {
    let mut counts = YearCounts::new();
    for year in years {
        *counts.entry(year).or_insert(0) += 1;
    }
    counts
}

/// Population curve for one group of papers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationSummary {
    /// Taxon label.
    pub taxon: String,

    /// Papers in the group.
    pub papers: usize,

    /// Alive papers per year.
    pub alive: YearCounts,

    /// Births per year.
    pub births: YearCounts,

    /// Deaths per year.
    pub deaths: YearCounts,

    /// Citations received per year by papers in the group.
    pub citations: YearCounts,

    /// Year with the most alive papers (earliest on ties) and that count.
    pub peak: Option<(i32, u32)>,
}

impl PopulationSummary {
    /// Summarise a group of records.
    #[must_use]
    pub fn from_records(taxon: impl Into<String>, records: &[&DeathRecord]) -> Self {
        let alive = alive_by_year(records.iter().copied());
        let peak = alive.iter().fold(None, |best: Option<(i32, u32)>, (&year, &count)| match best {
            Some((_, top)) if top >= count => best,
            _ => Some((year, count)),
        });

        Self {
            taxon: taxon.into(),
            papers: records.len(),
            births: births_by_year(records.iter().copied()),
            deaths: deaths_by_year(records.iter().copied()),
            citations: group_citations_by_year(records.iter().copied()),
            alive,
            peak,
        }
    }
}

/// One summary per taxon, sorted by taxon name.
#[must_use]
pub fn summarize_by_taxon(records: &[DeathRecord]) -> Vec<PopulationSummary> {
    group_by_taxon(records)
        .into_iter()
        .map(|(taxon, group)| PopulationSummary::from_records(taxon, &group))
        .collect()
}
