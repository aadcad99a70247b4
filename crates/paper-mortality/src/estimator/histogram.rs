//! Per-year citation counts relative to a paper's birth year.

/// Dense citation counts indexed by `year - birth_year`.
///
/// Spans `birth_year ..= max(birth_year, max(citation_years))`. Citations dated
/// before the birth year are folded into offset 0 rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationHistogram {
    birth_year: i32,
    counts: Vec<u32>,
}

impl CitationHistogram {
    /// Build the histogram for one paper.
    ///
    /// Allocates one bucket per year from birth to the latest citation, so
    /// callers handling untrusted years bound them first (see
    /// [`crate::config::limits`]).
    #[must_use]
    pub fn build(birth_year: i32, citation_years: &[i32]) -> Self {
        let last_year = citation_years.iter().copied().max().unwrap_or(birth_year).max(birth_year);
        let len = (i64::from(last_year) - i64::from(birth_year)) as usize + 1;

        let mut counts = vec![0u32; len];
        for &year in citation_years {
            let offset = (i64::from(year) - i64::from(birth_year)).max(0) as usize;
            counts[offset] += 1;
        }

        Self { birth_year, counts }
    }

    /// Publication year at offset 0.
    #[must_use]
    pub const fn birth_year(&self) -> i32 {
        self.birth_year
    }

    /// Number of years covered, birth year included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Always false: the birth year bucket is present even with no citations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Citations counted in `year`, or 0 outside the covered span.
    #[must_use]
    pub fn count_in(&self, year: i32) -> u32 {
        let offset = i64::from(year) - i64::from(self.birth_year);
        usize::try_from(offset).ok().and_then(|o| self.counts.get(o).copied()).unwrap_or(0)
    }

    /// Total citations across all buckets.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Counts by offset.
    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Consume the histogram, appending `padding` zero-count years to the tail.
    #[must_use]
    pub fn into_padded(mut self, padding: usize) -> Vec<u32> {
        self.counts.resize(self.counts.len() + padding, 0);
        self.counts
    }
}
