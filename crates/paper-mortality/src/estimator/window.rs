//! Sustained-activity window configuration.

use serde::{Deserialize, Serialize};

use crate::config::limits;
use crate::error::{AnalysisError, AnalysisResult};

/// Width in years and minimum citation count defining "alive".
///
/// A paper is alive through a window when the citations it received in those
/// `year_threshold` consecutive years total at least `citation_threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawWindow")]
pub struct Window {
    year_threshold: u32,
    citation_threshold: u32,
}

impl Window {
    /// Create a window, rejecting a zero or oversized width.
    pub fn new(year_threshold: u32, citation_threshold: u32) -> AnalysisResult<Self> {
        if year_threshold == 0 {
            return Err(AnalysisError::invalid_input(
                "year_threshold",
                "window width must be at least one year",
            ));
        }
        if year_threshold > limits::MAX_YEAR_THRESHOLD {
            return Err(AnalysisError::invalid_input(
                "year_threshold",
                format!("window width cannot exceed {} years", limits::MAX_YEAR_THRESHOLD),
            ));
        }
        Ok(Self { year_threshold, citation_threshold })
    }

    /// Number of consecutive years examined together.
    #[must_use]
    pub const fn year_threshold(&self) -> u32 {
        self.year_threshold
    }

    /// Minimum citations a window must hold for the paper to stay alive.
    #[must_use]
    pub const fn citation_threshold(&self) -> u32 {
        self.citation_threshold
    }

    /// Estimate a death year with this window.
    #[must_use]
    pub fn estimate(&self, citation_years: &[i32], birth_year: i32) -> i32 {
        super::estimate_death_year(*self, citation_years, birth_year)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWindow {
    year_threshold: u32,
    citation_threshold: u32,
}

impl TryFrom<RawWindow> for Window {
    type Error = AnalysisError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        Self::new(raw.year_threshold, raw.citation_threshold)
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} citations per {} years", self.citation_threshold, self.year_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_width_rejected() {
        let err = Window::new(0, 5).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_oversized_width_rejected() {
        assert!(Window::new(limits::MAX_YEAR_THRESHOLD, 5).is_ok());
        let err = Window::new(u32::MAX, 5).unwrap_err();
        assert!(err.to_string().contains("cannot exceed"));
    }

    #[test]
    fn test_zero_citation_threshold_allowed() {
        let window = Window::new(1, 0).unwrap();
        assert_eq!(window.citation_threshold(), 0);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Window =
            serde_json::from_str(r#"{"yearThreshold": 3, "citationThreshold": 5}"#).unwrap();
        assert_eq!(ok, Window::new(3, 5).unwrap());

        let bad = serde_json::from_str::<Window>(r#"{"yearThreshold": 0, "citationThreshold": 5}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Window::new(3, 5).unwrap().to_string(), "5 citations per 3 years");
    }
}
