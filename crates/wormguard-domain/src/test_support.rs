use crate::model::{InstalledVersionMap, ProjectObservation, ProjectRoot, SensitiveArtifact};
use camino::Utf8PathBuf;
use wormguard_rules::{PackageRule, normalize};
use wormguard_types::RepoPath;

pub fn rule(name: &str, versions: &[&str]) -> PackageRule {
    let raw = versions
        .iter()
        .map(|v| format!("= {v}"))
        .collect::<Vec<_>>()
        .join(" || ");
    PackageRule::new(name, versions.iter().map(|v| normalize(v)), raw).expect("valid rule")
}

pub fn observation(relative: &str, installed: &[(&str, &str)]) -> ProjectObservation {
    let installed: InstalledVersionMap = installed
        .iter()
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect();
    ProjectObservation {
        root: ProjectRoot {
            path: Utf8PathBuf::from("/scan").join(relative),
            relative: RepoPath::new(relative),
        },
        installed,
        failed_batches: 0,
    }
}

pub fn artifact(relative: &str) -> SensitiveArtifact {
    SensitiveArtifact {
        path: Utf8PathBuf::from("/scan").join(relative),
        relative: RepoPath::new(relative),
    }
}
