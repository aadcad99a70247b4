//! Configuration for death-year analysis.

use crate::estimator::{DeathDefinition, Window};

/// Default analysis parameters.
pub mod defaults {
    /// Window width in years.
    pub const YEAR_THRESHOLD: u32 = 3;

    /// Citations a window needs for the paper to stay alive.
    pub const CITATION_THRESHOLD: u32 = 5;

    /// Papers looked up concurrently in a batch.
    pub const CONCURRENCY: usize = 8;

    /// Key prefix used by OpenAlex cache dumps.
    pub const OPENALEX_KEY_PREFIX: &str = "openalex_";
}

/// Bounds on inputs, keeping histograms and population tallies to a sane span.
pub mod limits {
    /// Earliest publication or citation year accepted.
    pub const EARLIEST_YEAR: i32 = 1000;

    /// Latest publication or citation year accepted.
    pub const LATEST_YEAR: i32 = 2999;

    /// Widest window accepted, in years.
    pub const MAX_YEAR_THRESHOLD: u32 = 200;

    /// True if `year` lies within the accepted calendar range.
    #[must_use]
    pub const fn is_plausible_year(year: i32) -> bool {
        year >= EARLIEST_YEAR && year <= LATEST_YEAR
    }
}

/// Environment variable names read by [`Config::from_env`].
pub mod env {
    /// Window width in years.
    pub const WINDOW_YEARS: &str = "MORTALITY_WINDOW_YEARS";

    /// Citation threshold per window.
    pub const WINDOW_CITATIONS: &str = "MORTALITY_WINDOW_CITATIONS";

    /// Last year with complete citation data.
    pub const OBSERVATION_END: &str = "MORTALITY_OBSERVATION_END";

    /// Batch concurrency.
    pub const CONCURRENCY: &str = "MORTALITY_CONCURRENCY";

    /// Death definition (`sliding_window` or `last_cited`).
    pub const DEFINITION: &str = "MORTALITY_DEFINITION";
}

/// Analysis configuration, fixed for a whole batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Sustained-activity window.
    pub window: Window,

    /// How death years are derived.
    pub definition: DeathDefinition,

    /// Death years later than this are clamped to it.
    pub observation_end: Option<i32>,

    /// Maximum papers analysed concurrently.
    pub concurrency: usize,
}

impl Config {
    /// Create a configuration for a window, with defaults for everything else.
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self {
            window,
            definition: DeathDefinition::default(),
            observation_end: None,
            concurrency: defaults::CONCURRENCY,
        }
    }

    /// Configuration for tests: default window, sequential lookups.
    #[must_use]
    pub fn for_testing() -> Self {
        Self { concurrency: 1, ..Self::default() }
    }

    /// Set the observation horizon.
    #[must_use]
    pub fn with_observation_end(mut self, year: Option<i32>) -> Self {
        self.observation_end = year;
        self
    }

    /// Set the death definition.
    #[must_use]
    pub fn with_definition(mut self, definition: DeathDefinition) -> Self {
        self.definition = definition;
        self
    }

    /// Set batch concurrency (at least 1).
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Create configuration from environment variables.
    ///
    /// Unset variables fall back to [`defaults`].
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed, or the window is invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns error if a value cannot be parsed, or the window is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let years = parse_var(&lookup, env::WINDOW_YEARS)?.unwrap_or(defaults::YEAR_THRESHOLD);
        let citations =
            parse_var(&lookup, env::WINDOW_CITATIONS)?.unwrap_or(defaults::CITATION_THRESHOLD);
        let observation_end = parse_var(&lookup, env::OBSERVATION_END)?;
        let concurrency = parse_var(&lookup, env::CONCURRENCY)?.unwrap_or(defaults::CONCURRENCY);
        let definition = parse_var(&lookup, env::DEFINITION)?.unwrap_or_default();

        Ok(Self::new(Window::new(years, citations)?)
            .with_definition(definition)
            .with_observation_end(observation_end)
            .with_concurrency(concurrency))
    }
}

impl Default for Config {
    fn default() -> Self {
        let window = Window::new(defaults::YEAR_THRESHOLD, defaults::CITATION_THRESHOLD)
            .expect("default window width is non-zero");
        Self::new(window)
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("invalid value for {name} ('{raw}'): {e}")),
        _ => Ok(None),
    }
}
