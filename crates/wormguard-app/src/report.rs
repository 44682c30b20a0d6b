use crate::AuditOutcome;
use anyhow::Context;
use time::OffsetDateTime;
use wormguard_domain::report::ProjectAudit;
use wormguard_render::{
    RenderableCounts, RenderableData, RenderableFinding, RenderableFindingKind, RenderableReport,
    RenderableTier, RenderableVerdictStatus,
};
use wormguard_rules::RuleSet;
use wormguard_types::{
    PackageFinding, ProjectReport, RunMeta, SCHEMA_REPORT_V1, SeverityTier, ToolMeta, Verdict,
    VerdictCounts, VerdictStatus, VerdictSummary, WormguardData, WormguardReportV1, ids,
};

fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "wormguard".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Assemble the wire report from an audit outcome.
///
/// Projects list only breach and warning findings; not-installed verdicts are summarised
/// as a per-project count.
pub fn build_report(
    outcome: &AuditOutcome,
    rules: &RuleSet,
    profile: &str,
    started_at: OffsetDateTime,
) -> WormguardReportV1 {
    let audit = &outcome.report;
    let ended_at = OffsetDateTime::now_utc();
    let duration_ms = u64::try_from((ended_at - started_at).whole_milliseconds()).unwrap_or(0);

    let projects: Vec<ProjectReport> = audit.projects.iter().map(project_report).collect();

    let mut reasons = Vec::new();
    if audit.counts.breach > 0 {
        reasons.push(ids::REASON_BREACH_DETECTED.to_string());
    }
    if audit.counts.artifact > 0 {
        reasons.push(ids::REASON_SENSITIVE_ARTIFACTS.to_string());
    }
    if audit.counts.warning > 0 {
        reasons.push(ids::REASON_MANUAL_VERIFICATION.to_string());
    }
    if audit.projects.is_empty() {
        reasons.push(ids::REASON_NO_PROJECTS_FOUND.to_string());
    }
    if audit.projects.iter().any(|p| p.failed_batches > 0) {
        reasons.push(ids::REASON_RESOLVER_DEGRADED.to_string());
    }

    WormguardReportV1 {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        run: RunMeta {
            started_at,
            ended_at: Some(ended_at),
            duration_ms: Some(duration_ms),
        },
        verdict: VerdictSummary {
            status: audit.tier.status(),
            tier: Some(audit.tier),
            counts: audit.counts.clone(),
            reasons,
        },
        projects,
        artifacts: audit.artifacts.iter().map(|a| a.relative.clone()).collect(),
        data: WormguardData {
            profile: profile.to_string(),
            rules_loaded: saturating_u32(rules.len()),
            malformed_rule_lines: saturating_u32(rules.malformed_lines()),
            rules_without_versions: saturating_u32(rules.lines_without_versions()),
            projects_scanned: saturating_u32(audit.projects.len()),
            skipped_entries: saturating_u32(outcome.skipped.len()),
            error: None,
        },
    }
}

fn project_report(project: &ProjectAudit) -> ProjectReport {
    let findings = project
        .verdicts
        .iter()
        .filter(|v| v.verdict != Verdict::NotInstalled)
        .map(|v| PackageFinding {
            package: v.package.clone(),
            verdict: v.verdict,
            installed_version: v.installed_version.clone().unwrap_or_default(),
            raw_constraint: v.raw_constraint.clone(),
            fingerprint: v.fingerprint.clone(),
        })
        .collect();

    ProjectReport {
        path: project.root.relative.clone(),
        findings,
        not_installed: project.count(Verdict::NotInstalled),
        failed_batches: project.failed_batches,
    }
}

/// Report written when the run aborts before auditing.
pub fn runtime_error_report(profile: &str, reason: &str, message: &str) -> WormguardReportV1 {
    let now = OffsetDateTime::now_utc();
    WormguardReportV1 {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        run: RunMeta {
            started_at: now,
            ended_at: Some(now),
            duration_ms: Some(0),
        },
        verdict: VerdictSummary {
            status: VerdictStatus::Fail,
            tier: None,
            counts: VerdictCounts::default(),
            reasons: vec![reason.to_string()],
        },
        projects: Vec::new(),
        artifacts: Vec::new(),
        data: WormguardData {
            profile: profile.to_string(),
            error: Some(message.to_string()),
            ..WormguardData::default()
        },
    }
}

pub fn parse_report_json(text: &str) -> anyhow::Result<WormguardReportV1> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;
    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    anyhow::ensure!(
        schema == SCHEMA_REPORT_V1,
        "unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})"
    );
    serde_json::from_value(value).context("parse wormguard v1 report")
}

pub fn serialize_report(report: &WormguardReportV1) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &WormguardReportV1) -> RenderableReport {
    let mut findings: Vec<RenderableFinding> = Vec::new();
    for kind in [RenderableFindingKind::Breach, RenderableFindingKind::Warning] {
        for project in &report.projects {
            for f in &project.findings {
                let finding_kind = match f.verdict {
                    Verdict::Breach => RenderableFindingKind::Breach,
                    Verdict::Warning => RenderableFindingKind::Warning,
                    Verdict::NotInstalled => continue,
                };
                if finding_kind != kind {
                    continue;
                }
                findings.push(RenderableFinding {
                    kind,
                    project: project.path.as_str().to_string(),
                    package: f.package.clone(),
                    installed_version: f.installed_version.clone(),
                    raw_constraint: f.raw_constraint.clone(),
                });
            }
        }
    }

    RenderableReport {
        verdict: match report.verdict.status {
            VerdictStatus::Pass => RenderableVerdictStatus::Pass,
            VerdictStatus::Warn => RenderableVerdictStatus::Warn,
            VerdictStatus::Fail => RenderableVerdictStatus::Fail,
        },
        tier: report.verdict.tier.map(|t| match t {
            SeverityTier::Clean => RenderableTier::Clean,
            SeverityTier::Warning => RenderableTier::Warning,
            SeverityTier::Artifact => RenderableTier::Artifact,
            SeverityTier::Breach => RenderableTier::Breach,
        }),
        counts: RenderableCounts {
            breach: report.verdict.counts.breach,
            warning: report.verdict.counts.warning,
            artifact: report.verdict.counts.artifact,
        },
        reasons: report.verdict.reasons.clone(),
        findings,
        artifacts: report
            .artifacts
            .iter()
            .map(|p| p.as_str().to_string())
            .collect(),
        data: RenderableData {
            profile: report.data.profile.clone(),
            rules_loaded: report.data.rules_loaded,
            projects_scanned: report.data.projects_scanned,
            failed_batches: report.projects.iter().map(|p| p.failed_batches).sum(),
            skipped_entries: report.data.skipped_entries,
            error: report.data.error.clone(),
        },
    }
}
