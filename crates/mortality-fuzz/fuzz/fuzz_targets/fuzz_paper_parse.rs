#![no_main]

use libfuzzer_sys::fuzz_target;
use paper_mortality::models::{CitationLink, PaperRecord};

fuzz_target!(|data: &[u8]| {
    // Parsing may fail but must never panic; parsed papers must validate cleanly.
    if let Ok(paper) = serde_json::from_slice::<PaperRecord>(data) {
        let _ = paper.validate();
        let _ = paper.lookup_key();
    }
    if let Ok(link) = serde_json::from_slice::<CitationLink>(data) {
        let _ = link.is_resolvable();
    }
});
