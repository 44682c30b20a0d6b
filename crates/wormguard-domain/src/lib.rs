//! Pure audit evaluation (no IO).
//!
//! Input: rules, per-project installed-version observations and artifact paths gathered
//! elsewhere.
//! Output: per-project verdicts, global counters and the aggregate severity tier.

#![forbid(unsafe_code)]

pub mod fingerprint;
pub mod model;
pub mod policy;
pub mod report;

mod engine;

pub use engine::{classify, compute_tier, evaluate, evaluate_project};

#[cfg(test)]
mod test_support;
