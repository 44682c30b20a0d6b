//! Use case orchestration for wormguard.
//!
//! This crate provides the application layer: rule loading, the audit engine that drives
//! the repo and package-manager adapters, and report assembly. It stays thin and delegates
//! decisions to `wormguard-domain`.
//!
//! The CLI crate depends on this; it only handles argument parsing, network and file IO.

#![forbid(unsafe_code)]

mod engine;
mod error;
mod render;
mod report;
mod rules;
mod scan;

pub use engine::{AuditEngine, AuditOutcome};
pub use error::ScanError;
pub use render::{render_annotations, render_markdown, render_summary};
pub use report::{
    build_report, parse_report_json, runtime_error_report, serialize_report, to_renderable,
};
pub use rules::{FileRuleSource, RuleSource, load_rules};
pub use scan::{resolve_scan_config, run_scan, verdict_exit_code};
