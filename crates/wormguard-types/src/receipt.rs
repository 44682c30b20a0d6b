use crate::RepoPath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for wormguard reports.
pub const SCHEMA_REPORT_V1: &str = "wormguard.report.v1";

/// Per-project, per-rule classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// No resolvable installed version for the package in the project.
    NotInstalled,
    /// The installed version is one of the listed compromised versions.
    Breach,
    /// The package is installed at a version that is not listed; verify manually.
    Warning,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::NotInstalled => "not_installed",
            Verdict::Breach => "breach",
            Verdict::Warning => "warning",
        }
    }
}

/// Aggregate severity of a whole run.
///
/// Ordering is meaningful: `Breach > Artifact > Warning > Clean`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Clean,
    Warning,
    Artifact,
    Breach,
}

impl SeverityTier {
    pub fn status(self) -> VerdictStatus {
        match self {
            SeverityTier::Clean => VerdictStatus::Pass,
            SeverityTier::Warning => VerdictStatus::Warn,
            SeverityTier::Artifact | SeverityTier::Breach => VerdictStatus::Fail,
        }
    }

    pub fn is_failure(self) -> bool {
        self.status() == VerdictStatus::Fail
    }
}

/// Status is intentionally small: it maps cleanly to CI signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VerdictCounts {
    pub breach: u32,
    pub warning: u32,
    pub artifact: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VerdictSummary {
    pub status: VerdictStatus,
    /// Absent only when the run aborted before auditing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<SeverityTier>,
    pub counts: VerdictCounts,
    #[serde(default)]
    pub reasons: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RunMeta {
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "Option<String>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(with = "time::serde::rfc3339::option")]
    pub ended_at: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

/// One installed package that matched a rule by name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PackageFinding {
    pub package: String,
    pub verdict: Verdict,
    /// Version string exactly as reported by the package manager.
    pub installed_version: String,
    /// The rule's constraint text, kept for human-readable reporting.
    pub raw_constraint: String,

    /// Stable identifier intended for dedup and trending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectReport {
    pub path: RepoPath,
    pub findings: Vec<PackageFinding>,
    /// Rules whose package is not installed in this project.
    pub not_installed: u32,
    /// Resolver batches that yielded no information.
    #[serde(default)]
    pub failed_batches: u32,
}

/// Wormguard-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct WormguardData {
    pub profile: String,

    pub rules_loaded: u32,
    pub malformed_rule_lines: u32,
    pub rules_without_versions: u32,

    pub projects_scanned: u32,
    /// Directory entries skipped during project location and artifact scanning.
    pub skipped_entries: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The report envelope.
///
/// Keeping this generic allows embedding tool-specific data while still enforcing a stable
/// outer shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = WormguardData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    pub run: RunMeta,
    pub verdict: VerdictSummary,
    pub projects: Vec<ProjectReport>,
    pub artifacts: Vec<RepoPath>,
    pub data: TData,
}

pub type WormguardReportV1 = ReportEnvelope<WormguardData>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_ordering_matches_severity() {
        assert!(SeverityTier::Breach > SeverityTier::Artifact);
        assert!(SeverityTier::Artifact > SeverityTier::Warning);
        assert!(SeverityTier::Warning > SeverityTier::Clean);
    }

    #[test]
    fn tier_status_mapping() {
        assert_eq!(SeverityTier::Clean.status(), VerdictStatus::Pass);
        assert_eq!(SeverityTier::Warning.status(), VerdictStatus::Warn);
        assert_eq!(SeverityTier::Artifact.status(), VerdictStatus::Fail);
        assert_eq!(SeverityTier::Breach.status(), VerdictStatus::Fail);
        assert!(!SeverityTier::Warning.is_failure());
    }

    #[test]
    fn verdict_serializes_snake_case() {
        let json = serde_json::to_string(&Verdict::NotInstalled).expect("serialize");
        assert_eq!(json, "\"not_installed\"");
        assert_eq!(Verdict::Breach.as_str(), "breach");
    }
}
