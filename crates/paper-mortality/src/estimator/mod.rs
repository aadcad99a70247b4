//! Death-year estimation.
//!
//! A paper "dies" in the first year its trailing citation window falls below the
//! configured threshold. The scan walks a per-year citation histogram that has
//! been padded with `year_threshold` empty years, so every real year can start a
//! full window.
//!
//! # Example
//!
//! ```
//! use paper_mortality::estimator::{Window, estimate_death_year};
//!
//! let window = Window::new(3, 5).unwrap();
//! // Five citations in the birth year keep the paper alive for one window.
//! assert_eq!(estimate_death_year(window, &[2010; 5], 2010), 2013);
//! // Two are not enough to survive the first window.
//! assert_eq!(estimate_death_year(window, &[2010, 2010], 2010), 2010);
//! ```

mod histogram;
mod window;

use serde::{Deserialize, Serialize};

pub use histogram::CitationHistogram;
pub use window::Window;

/// How a death year is derived from citation years.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DeathDefinition {
    /// First year the trailing window drops below the citation threshold.
    #[default]
    SlidingWindow,
    /// Year of the most recent citation.
    LastCited,
}

impl DeathDefinition {
    /// Apply this definition to one paper's citations.
    #[must_use]
    pub fn death_year(self, window: Window, citation_years: &[i32], birth_year: i32) -> i32 {
        match self {
            Self::SlidingWindow => estimate_death_year(window, citation_years, birth_year),
            Self::LastCited => last_cited_year(citation_years, birth_year),
        }
    }
}

impl std::str::FromStr for DeathDefinition {
    type Err = crate::error::AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "sliding_window" | "window" => Ok(Self::SlidingWindow),
            "last_cited" => Ok(Self::LastCited),
            other => Err(crate::error::AnalysisError::invalid_input(
                "definition",
                format!("unknown death definition '{other}'"),
            )),
        }
    }
}

/// Estimate the year a paper's citation activity dies out.
///
/// Returns:
/// - `birth_year` if the first window (offsets `0..year_threshold`) is already
///   below the threshold,
/// - `birth_year + i` where `i` is the right edge of the first failing window,
/// - `birth_year + padded_len` if no window ever fails (only possible with a
///   zero citation threshold, since the padded tail is empty).
///
/// A window holding exactly `citation_threshold` citations is alive.
#[must_use]
pub fn estimate_death_year(window: Window, citation_years: &[i32], birth_year: i32) -> i32 {
    let width = window.year_threshold() as usize;
    let threshold = u64::from(window.citation_threshold());

    let counts = CitationHistogram::build(birth_year, citation_years).into_padded(width);

    let mut running: u64 = counts[..width].iter().map(|&c| u64::from(c)).sum();
    if running < threshold {
        return birth_year;
    }

    for i in width..counts.len() {
        running -= u64::from(counts[i - width]);
        running += u64::from(counts[i]);
        if running < threshold {
            return offset_year(birth_year, i);
        }
    }

    offset_year(birth_year, counts.len())
}

/// Most recent citation year, never earlier than `birth_year`.
///
/// Uncited papers die in their birth year.
#[must_use]
pub fn last_cited_year(citation_years: &[i32], birth_year: i32) -> i32 {
    citation_years.iter().copied().max().map_or(birth_year, |last| last.max(birth_year))
}

fn offset_year(birth_year: i32, offset: usize) -> i32 {
    birth_year.saturating_add(i32::try_from(offset).unwrap_or(i32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(years: u32, citations: u32) -> Window {
        Window::new(years, citations).unwrap()
    }

    #[test]
    fn test_single_burst_then_silence() {
        assert_eq!(estimate_death_year(window(3, 5), &[2010; 5], 2010), 2013);
    }

    #[test]
    fn test_dies_in_first_window() {
        assert_eq!(estimate_death_year(window(3, 5), &[2010, 2010], 2010), 2010);
    }

    #[test]
    fn test_steady_citations_die_at_padded_tail() {
        let years = [2010, 2011, 2012, 2013, 2014];
        // The window ending at offset 6 covers two padded empty years.
        assert_eq!(estimate_death_year(window(2, 1), &years, 2010), 2016);
    }

    #[test]
    fn test_zero_threshold_never_dies() {
        let years = [2010, 2011, 2012, 2013, 2014];
        assert_eq!(estimate_death_year(window(2, 0), &years, 2010), 2017);
        assert_eq!(estimate_death_year(window(3, 0), &[], 2010), 2014);
    }

    #[test]
    fn test_equal_to_threshold_is_alive() {
        // Offsets 0..2 hold exactly 2 citations; offsets 1..3 hold 1.
        assert_eq!(estimate_death_year(window(2, 2), &[2000, 2001], 2000), 2002);
        assert_eq!(estimate_death_year(window(2, 3), &[2000, 2001], 2000), 2000);
    }

    #[test]
    fn test_empty_citations_die_at_birth() {
        assert_eq!(estimate_death_year(window(3, 1), &[], 1995), 1995);
    }

    #[test]
    fn test_gap_kills_paper() {
        // Alive through 2000-2002, then a four year gap before a late revival.
        let years = [2000, 2000, 2001, 2002, 2007, 2007];
        assert_eq!(estimate_death_year(window(2, 2), &years, 2000), 2003);
    }

    #[test]
    fn test_window_wider_than_history() {
        assert_eq!(estimate_death_year(window(10, 3), &[2020, 2021, 2021], 2020), 2030);
    }

    #[test]
    fn test_last_cited_year() {
        assert_eq!(last_cited_year(&[2003, 2011, 2007], 2000), 2011);
        assert_eq!(last_cited_year(&[], 2000), 2000);
        assert_eq!(last_cited_year(&[1990], 2000), 2000);
    }

    #[test]
    fn test_definition_dispatch() {
        let w = window(3, 5);
        assert_eq!(DeathDefinition::SlidingWindow.death_year(w, &[2010; 5], 2010), 2013);
        assert_eq!(DeathDefinition::LastCited.death_year(w, &[2010; 5], 2010), 2010);
    }

    #[test]
    fn test_definition_from_str() {
        assert_eq!("last-cited".parse::<DeathDefinition>().unwrap(), DeathDefinition::LastCited);
        assert_eq!("WINDOW".parse::<DeathDefinition>().unwrap(), DeathDefinition::SlidingWindow);
        assert!("median".parse::<DeathDefinition>().is_err());
    }
}
