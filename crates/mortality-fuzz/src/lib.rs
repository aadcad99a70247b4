//! Fuzzing library for paper-mortality.
//!
//! Targets cover the estimator on arbitrary citation histories and JSON
//! parsing of the input and report models.
//!
//! # Usage
//!
//! ```bash
//! cd crates/mortality-fuzz
//! cargo +nightly fuzz run fuzz_estimator -- -max_total_time=60
//! ```

pub use paper_mortality::{estimator, models};
