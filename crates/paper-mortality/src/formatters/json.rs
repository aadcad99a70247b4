//! JSON output formatting.

use serde_json::{Value, json};

use crate::models::{BatchReport, DeathRecord};
use crate::population::PopulationSummary;

/// Create a compact record representation for JSON output.
///
/// Optional fields are only emitted when present.
#[must_use]
pub fn compact_record(record: &DeathRecord) -> Value {
    let mut obj = json!({
        "id": record.id,
        "birthYear": record.birth_year,
        "deathYear": record.death_year,
        "citations": record.citation_count,
    });

    if let Some(title) = &record.title {
        obj["title"] = json!(title);
    }

    if let Some(taxon) = &record.taxon {
        obj["taxon"] = json!(taxon);
    }

    if let Some(last) = record.last_cited_year {
        obj["lastCitedYear"] = json!(last);
    }

    if !record.citations_by_year.is_empty() {
        obj["citationsByYear"] = json!(record.citations_by_year);
    }

    if record.clamped {
        obj["clamped"] = json!(true);
    }

    if let Some(error) = &record.lookup_error {
        obj["lookupError"] = json!(error);
    }

    obj
}

/// Full batch report with run settings and summary counts.
#[must_use]
pub fn batch_report(report: &BatchReport) -> Value {
    json!({
        "window": {
            "yearThreshold": report.window.year_threshold(),
            "citationThreshold": report.window.citation_threshold(),
        },
        "definition": report.definition,
        "summary": {
            "papers": report.records.len(),
            "cited": report.cited_count(),
            "skipped": report.skipped,
            "lookupFailures": report.lookup_failures,
            "meanLifespan": report.mean_lifespan().map(|m| (m * 100.0).round() / 100.0),
        },
        "records": report.records.iter().map(compact_record).collect::<Vec<_>>(),
    })
}

/// Population summaries keyed by taxon.
#[must_use]
pub fn population_report(summaries: &[PopulationSummary]) -> Value {
    json!({
        "taxa": summaries.len(),
        "populations": summaries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::{DeathDefinition, Window};
    use crate::population::YearCounts;

    fn sample_record() -> DeathRecord {
        DeathRecord {
            id: "10.1145/123".to_string(),
            title: Some("Repairing Programs".to_string()),
            taxon: None,
            birth_year: 2010,
            death_year: 2013,
            citation_count: 5,
            citations_by_year: Default::default(),
            last_cited_year: Some(2010),
            clamped: false,
            lookup_error: None,
        }
    }

    #[test]
    fn test_compact_record() {
        let compact = compact_record(&sample_record());

        assert_eq!(compact["id"], "10.1145/123");
        assert_eq!(compact["title"], "Repairing Programs");
        assert_eq!(compact["deathYear"], 2013);
        assert_eq!(compact["lastCitedYear"], 2010);
        assert!(compact.get("taxon").is_none());
        assert!(compact.get("clamped").is_none());
    }

    #[test]
    fn test_compact_record_reads_back_as_death_record() {
        let mut record = sample_record();
        record.citations_by_year = YearCounts::from([(2010, 5)]);

        let compact = compact_record(&record);
        assert_eq!(compact["citationsByYear"]["2010"], 5);

        let back: DeathRecord = serde_json::from_value(compact).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_batch_report_summary() {
        let report = BatchReport {
            window: Window::new(3, 5).unwrap(),
            definition: DeathDefinition::SlidingWindow,
            records: vec![sample_record()],
            skipped: 2,
            lookup_failures: 0,
        };
        let value = batch_report(&report);

        assert_eq!(value["window"]["yearThreshold"], 3);
        assert_eq!(value["definition"], "sliding_window");
        assert_eq!(value["summary"]["skipped"], 2);
        assert_eq!(value["summary"]["meanLifespan"], 3.0);
        assert_eq!(value["records"][0]["id"], "10.1145/123");
    }
}
