//! Rule model built from an externally supplied compromised-package list.
//!
//! Pure: no IO, no network. The caller hands in raw text and receives typed rules plus a
//! record of every line that did not become a rule.

#![forbid(unsafe_code)]

mod model;
mod parse;
mod version;

pub use model::{PackageRule, RuleIssue, RuleIssueKind, RuleSet, distinct_names};
pub use parse::{ALTERNATIVE_SEPARATOR, parse_rules};
pub use version::{CanonicalVersion, SENTINEL_VERSION, normalize};
