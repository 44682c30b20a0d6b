//! Fuzz target for locating and walking package-manager JSON output.
//!
//! Goal: Extraction and the dependency walk should **never panic**, whatever noise the
//! tool prints around (or instead of) its JSON.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_json_extraction
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Arbitrary, Debug)]
struct ExtractionInput {
    /// Raw tool output.
    output: String,
    /// Package names the batch asked about.
    wanted: Vec<String>,
}

fuzz_target!(|input: ExtractionInput| {
    if input.output.len() > 64 * 1024 || input.wanted.len() > 50 {
        return;
    }

    let Ok(doc) = wormguard_pm::extract_json(&input.output) else {
        return;
    };

    let wanted: BTreeSet<&str> = input.wanted.iter().map(String::as_str).collect();
    let mut installed = BTreeMap::new();
    let recorded = wormguard_pm::collect_versions(&doc, &wanted, &mut installed);

    assert_eq!(recorded, installed.len());
    assert!(installed.keys().all(|k| wanted.contains(k.as_str())));
    assert!(installed.values().all(|v| !v.is_empty()));
});
