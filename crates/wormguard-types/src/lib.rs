//! Stable DTOs and IDs used across the wormguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report
//! - verdict and severity-tier enums shared by the engine and renderers
//! - stable reason tokens
//! - canonical scan-root-relative path handling

#![forbid(unsafe_code)]

pub mod ids;
pub mod path;
pub mod receipt;

pub use path::RepoPath;
pub use receipt::{
    PackageFinding, ProjectReport, ReportEnvelope, RunMeta, SCHEMA_REPORT_V1, SeverityTier,
    ToolMeta, Verdict, VerdictCounts, VerdictStatus, VerdictSummary, WormguardData,
    WormguardReportV1,
};
