//! Paper Mortality
//!
//! Estimates when academic papers "die": the first year a paper's citation
//! activity, summed over a sliding window of years, falls below a threshold.
//!
//! # Features
//!
//! - **Death-year estimator**: a pure sliding-window scan over a per-year
//!   citation histogram (see [`estimator`])
//! - **Injected citation sources**: cache tables, citation graphs, or several
//!   merged together, behind one async trait (see [`sources`])
//! - **Concurrent batches**: bounded, order-preserving per-paper analysis
//! - **Population curves**: alive, birth and death counts per year and taxon
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use paper_mortality::{Config, MortalityAnalyzer, PaperRecord, sources::YearTable};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let table = YearTable::from_json_file("openalex", "api_cache.json")
//!         .await?
//!         .with_prefix("openalex_");
//!     let analyzer = MortalityAnalyzer::new(Arc::new(table), config);
//!
//!     let report = analyzer.analyze_batch(&[PaperRecord::new("10.1145/3180155", 2018)]).await;
//!     println!("{:?}", report.records);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod cohort;
pub mod config;
pub mod error;
pub mod estimator;
pub mod formatters;
pub mod models;
pub mod population;
pub mod sources;

pub use analysis::MortalityAnalyzer;
pub use config::Config;
pub use error::{AnalysisError, SourceError};
pub use estimator::{DeathDefinition, Window, estimate_death_year};
pub use models::{DeathRecord, PaperRecord};
