use crate::{RenderableFindingKind, RenderableReport, RenderableTier};

/// Plain-text console summary: findings grouped by project, artifacts, then one verdict line.
pub fn render_summary(report: &RenderableReport) -> String {
    let mut out = String::new();

    if let Some(error) = &report.data.error {
        out.push_str(&format!("ERROR: {error}\n"));
        return out;
    }

    out.push_str(&format!(
        "Scanned {} projects against {} rules ({} profile).\n",
        report.data.projects_scanned, report.data.rules_loaded, report.data.profile
    ));

    let mut current_project: Option<&str> = None;
    for f in &report.findings {
        if current_project != Some(f.project.as_str()) {
            out.push_str(&format!("\nProject: {}\n", f.project));
            current_project = Some(f.project.as_str());
        }
        match f.kind {
            RenderableFindingKind::Breach => out.push_str(&format!(
                "  [BREACH DETECTED] {} installed {} matches compromised list: {}\n",
                f.package, f.installed_version, f.raw_constraint
            )),
            RenderableFindingKind::Warning => out.push_str(&format!(
                "  [WARNING] {} installed {} is in use. Compromised list: {}. Verify manually.\n",
                f.package, f.installed_version, f.raw_constraint
            )),
        }
    }

    if !report.artifacts.is_empty() {
        out.push_str(&format!(
            "\nFound {} sensitive files:\n",
            report.artifacts.len()
        ));
        for path in &report.artifacts {
            out.push_str(&format!("  - {path}\n"));
        }
    }

    if report.data.failed_batches > 0 {
        out.push_str(&format!(
            "\nNote: {} dependency batches could not be resolved; those packages were not audited.\n",
            report.data.failed_batches
        ));
    }

    out.push('\n');
    let counts = &report.counts;
    match report.tier.unwrap_or(RenderableTier::Clean) {
        RenderableTier::Breach => {
            out.push_str(&format!(
                "CRITICAL FAILED: {} confirmed breaches detected.\n",
                counts.breach
            ));
            out.push_str(&format!(
                "Warnings: {} libraries require manual verification.\n",
                counts.warning
            ));
            if counts.artifact > 0 {
                out.push_str(&format!("Sensitive files: {} found.\n", counts.artifact));
            }
        }
        RenderableTier::Artifact => {
            out.push_str("FAILED: Sensitive files detected.\n");
            out.push_str(&format!(
                "Warnings: {} libraries require manual verification.\n",
                counts.warning
            ));
        }
        RenderableTier::Warning => out.push_str(&format!(
            "PASSED WITH WARNINGS: No direct breaches, but {} affected libraries are in use.\n",
            counts.warning
        )),
        RenderableTier::Clean => out.push_str("SUCCESS: System clean.\n"),
    }

    out
}
