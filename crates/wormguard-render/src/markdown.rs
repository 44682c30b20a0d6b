use crate::{RenderableFindingKind, RenderableReport, RenderableTier, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Wormguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    let tier = match report.tier {
        Some(RenderableTier::Clean) => "clean",
        Some(RenderableTier::Warning) => "warning",
        Some(RenderableTier::Artifact) => "artifact",
        Some(RenderableTier::Breach) => "breach",
        None => "n/a",
    };
    out.push_str(&format!(
        "- Verdict: **{}** (tier: {})\n- Breaches: {}\n- Warnings: {}\n- Sensitive files: {}\n- Projects scanned: {} ({} rules, profile `{}`)\n\n",
        verdict,
        tier,
        report.counts.breach,
        report.counts.warning,
        report.counts.artifact,
        report.data.projects_scanned,
        report.data.rules_loaded,
        report.data.profile,
    ));

    if let Some(error) = &report.data.error {
        out.push_str(&format!("> Error: {}\n", error));
        return out;
    }
    if report.data.failed_batches > 0 {
        out.push_str(&format!(
            "> Note: {} dependency batches failed; affected packages were not audited.\n\n",
            report.data.failed_batches
        ));
    }
    if report.data.skipped_entries > 0 {
        out.push_str(&format!(
            "> Note: {} directory entries could not be read.\n\n",
            report.data.skipped_entries
        ));
    }

    if report.findings.is_empty() && report.artifacts.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    let breaches: Vec<_> = report.findings_of(RenderableFindingKind::Breach).collect();
    if !breaches.is_empty() {
        out.push_str("## Breaches\n\n");
        out.push_str("| Project | Package | Installed | Compromised list |\n");
        out.push_str("|---|---|---|---|\n");
        for f in breaches {
            out.push_str(&format!(
                "| `{}` | `{}` | {} | {} |\n",
                f.project,
                f.package,
                escape_cell(&f.installed_version),
                escape_cell(&f.raw_constraint)
            ));
        }
        out.push('\n');
    }

    let warnings: Vec<_> = report.findings_of(RenderableFindingKind::Warning).collect();
    if !warnings.is_empty() {
        out.push_str("## Manual verification required\n\n");
        out.push_str("| Project | Package | Installed | Compromised list |\n");
        out.push_str("|---|---|---|---|\n");
        for f in warnings {
            out.push_str(&format!(
                "| `{}` | `{}` | {} | {} |\n",
                f.project,
                f.package,
                escape_cell(&f.installed_version),
                escape_cell(&f.raw_constraint)
            ));
        }
        out.push('\n');
    }

    if !report.artifacts.is_empty() {
        out.push_str("## Sensitive files\n\n");
        for path in &report.artifacts {
            out.push_str(&format!("- `{}`\n", path));
        }
    }

    out
}

/// Constraint lists use `||`, which would otherwise split the table cell.
fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
