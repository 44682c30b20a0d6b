//! The `scan` use case: load rules, audit the tree, produce a report.

use crate::{AuditEngine, RuleSource, build_report, load_rules};
use anyhow::Context;
use camino::Utf8Path;
use time::OffsetDateTime;
use wormguard_pm::DependencyLister;
use wormguard_settings::{Overrides, ResolvedConfig, WormguardConfigV1};
use wormguard_types::{VerdictStatus, WormguardReportV1};

/// Parse config text (empty means defaults) and resolve it against the profile and overrides.
pub fn resolve_scan_config(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        WormguardConfigV1::default()
    } else {
        wormguard_settings::parse_config_toml(config_text).context("parse config")?
    };
    wormguard_settings::resolve_config(cfg, overrides).context("resolve config")
}

/// Run a full scan of `root`.
///
/// Errors are either a [`crate::ScanError`] (downcastable) for the two fatal rule
/// conditions, or an invalid target. Rules are loaded before anything under `root` is read.
pub fn run_scan<L: DependencyLister>(
    root: &Utf8Path,
    engine: &AuditEngine<L>,
    source: &dyn RuleSource,
) -> anyhow::Result<WormguardReportV1> {
    let started_at = OffsetDateTime::now_utc();

    anyhow::ensure!(root.is_dir(), "scan target is not a directory: {root}");

    let rules = load_rules(source)?;
    let outcome = engine.run(root, &rules.rules);

    Ok(build_report(
        &outcome,
        &rules,
        &engine.config().profile,
        started_at,
    ))
}

/// Map verdict status to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(status: VerdictStatus) -> i32 {
    match status {
        VerdictStatus::Pass => 0,
        VerdictStatus::Warn => 0,
        VerdictStatus::Fail => 2,
    }
}
