use crate::fingerprint::fingerprint_for_package;
use crate::model::{ProjectObservation, SensitiveArtifact};
use crate::report::{AuditReport, ProjectAudit, RuleVerdict, saturating_sum, saturating_u32};
use wormguard_rules::{PackageRule, normalize};
use wormguard_types::{SeverityTier, Verdict, VerdictCounts};

/// Classify one rule against the version installed in one project.
pub fn classify(rule: &PackageRule, installed: Option<&str>) -> Verdict {
    let Some(installed) = installed else {
        return Verdict::NotInstalled;
    };
    if rule.is_compromised(&normalize(installed)) {
        Verdict::Breach
    } else {
        Verdict::Warning
    }
}

/// Evaluate every rule against one project's installed versions.
///
/// Rules sharing a package name are evaluated independently against the same version.
pub fn evaluate_project(project: &ProjectObservation, rules: &[PackageRule]) -> ProjectAudit {
    let verdicts = rules
        .iter()
        .map(|rule| {
            let installed = project.installed.get(rule.name()).map(String::as_str);
            let verdict = classify(rule, installed);
            let fingerprint = installed.map(|v| {
                fingerprint_for_package(
                    rule.name(),
                    verdict.as_str(),
                    project.root.relative.as_str(),
                    v,
                )
            });
            RuleVerdict {
                package: rule.name().to_string(),
                verdict,
                installed_version: installed.map(str::to_string),
                raw_constraint: rule.raw_constraint().to_string(),
                fingerprint,
            }
        })
        .collect();

    ProjectAudit {
        root: project.root.clone(),
        verdicts,
        failed_batches: project.failed_batches,
    }
}

/// Evaluate all projects and fold in the artifact scan.
pub fn evaluate(
    projects: &[ProjectObservation],
    rules: &[PackageRule],
    artifacts: Vec<SensitiveArtifact>,
) -> AuditReport {
    let projects: Vec<ProjectAudit> = projects
        .iter()
        .map(|p| evaluate_project(p, rules))
        .collect();

    let counts = VerdictCounts {
        breach: saturating_sum(projects.iter().map(|p| p.count(Verdict::Breach))),
        warning: saturating_sum(projects.iter().map(|p| p.count(Verdict::Warning))),
        artifact: saturating_u32(artifacts.len()),
    };
    let tier = compute_tier(&counts);

    AuditReport {
        projects,
        artifacts,
        counts,
        tier,
    }
}

/// Breach > artifact > warning > clean. Warnings alone never fail a run.
pub fn compute_tier(counts: &VerdictCounts) -> SeverityTier {
    if counts.breach > 0 {
        SeverityTier::Breach
    } else if counts.artifact > 0 {
        SeverityTier::Artifact
    } else if counts.warning > 0 {
        SeverityTier::Warning
    } else {
        SeverityTier::Clean
    }
}
