//! Fuzz target for compromised-package list parsing.
//!
//! Goal: The parser should **never panic** on any input, and every rule it produces must
//! carry at least one compromised version.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_rule_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let set = wormguard_rules::parse_rules(&text);

    for rule in &set.rules {
        assert!(!rule.compromised_versions().is_empty());
        for version in rule.compromised_versions() {
            // Normalization is idempotent.
            assert_eq!(&wormguard_rules::normalize(version.as_str()), version);
        }
    }
});
