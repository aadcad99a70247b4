#![no_main]

use libfuzzer_sys::fuzz_target;
use paper_mortality::models::{BatchReport, DeathRecord};
use paper_mortality::population::summarize_by_taxon;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = serde_json::from_value::<BatchReport>(json.clone());
        if let Ok(records) = serde_json::from_value::<Vec<DeathRecord>>(json) {
            let valid: Vec<_> = records.into_iter().filter(|r| r.validate().is_ok()).collect();
            let _ = summarize_by_taxon(&valid);
        }
    }
});
