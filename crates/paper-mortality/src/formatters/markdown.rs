//! Markdown output formatting.

use std::collections::BTreeSet;

use crate::models::{BatchReport, DeathRecord};
use crate::population::{PopulationSummary, YearCounts};

/// Format death records as a Markdown table.
#[must_use]
pub fn format_records_markdown(records: &[DeathRecord]) -> String {
    if records.is_empty() {
        return "No papers analysed.".to_string();
    }

    let mut output = format!("# Paper Lifespans ({} papers)\n\n", records.len());
    output.push_str("| # | Paper | Born | Died | Lifespan | Citations | Last cited |\n");
    output.push_str("|---|---|---|---|---|---|---|\n");

    for (i, record) in records.iter().enumerate() {
        let died = if record.clamped {
            format!("{}*", record.death_year)
        } else {
            record.death_year.to_string()
        };
        let last = record.last_cited_year.map_or_else(|| "-".to_string(), |y| y.to_string());

        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} |\n",
            i + 1,
            escape_cell(record_label(record)),
            record.birth_year,
            died,
            record.lifespan(),
            record.citation_count,
            last
        ));
    }

    if records.iter().any(|r| r.clamped) {
        output.push_str("\n\\* clamped to the observation horizon\n");
    }

    let failures: Vec<&DeathRecord> =
        records.iter().filter(|r| r.lookup_error.is_some()).collect();
    if !failures.is_empty() {
        output.push_str("\n## Lookup failures\n\n");
        for record in failures {
            output.push_str(&format!(
                "- **{}**: {}\n",
                record.id,
                record.lookup_error.as_deref().unwrap_or_default()
            ));
        }
    }

    output
}

/// Format a batch report: settings, summary, then the record table.
#[must_use]
pub fn format_report_markdown(report: &BatchReport) -> String {
    let mut output = String::from("# Death-Year Analysis\n\n");

    output.push_str(&format!(
        "**Window:** {} | **Definition:** {:?}\n\n",
        report.window, report.definition
    ));

    let mut summary = vec![
        format!("**Papers:** {}", report.records.len()),
        format!("**Cited:** {}", report.cited_count()),
    ];
    if let Some(mean) = report.mean_lifespan() {
        summary.push(format!("**Mean lifespan:** {mean:.1} years"));
    }
    if report.skipped > 0 {
        summary.push(format!("**Skipped:** {}", report.skipped));
    }
    if report.lookup_failures > 0 {
        summary.push(format!("**Lookup failures:** {}", report.lookup_failures));
    }
    output.push_str(&format!("{}\n\n", summary.join(" | ")));

    output.push_str(&format_records_markdown(&report.records));
    output
}

/// Format population summaries, one section per taxon.
#[must_use]
pub fn format_population_markdown(summaries: &[PopulationSummary]) -> String {
    if summaries.is_empty() {
        return "No populations to report.".to_string();
    }

    let mut output = format!("# Paper Populations ({} taxa)\n\n", summaries.len());

    for summary in summaries {
        output.push_str(&format!("## {} ({} papers)\n\n", summary.taxon, summary.papers));

        if let Some((year, count)) = summary.peak {
            output.push_str(&format!("**Peak:** {count} alive in {year}\n\n"));
        }

        output.push_str("| Year | Alive | Births | Deaths | Citations |\n|---|---|---|---|---|\n");
        let count = |counts: &YearCounts, year: &i32| counts.get(year).copied().unwrap_or(0);
        let years: BTreeSet<&i32> = summary.alive.keys().chain(summary.citations.keys()).collect();
        for year in years {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                year,
                count(&summary.alive, year),
                count(&summary.births, year),
                count(&summary.deaths, year),
                count(&summary.citations, year)
            ));
        }
        output.push('\n');
    }

    output
}

fn record_label(record: &DeathRecord) -> &str {
    record.title.as_deref().unwrap_or(&record.id)
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
