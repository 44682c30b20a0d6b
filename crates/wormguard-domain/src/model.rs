use camino::Utf8PathBuf;
use std::collections::BTreeMap;
use wormguard_types::RepoPath;

/// Directory owning a recognized lockfile. Discovered once per run and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProjectRoot {
    /// Absolute path.
    pub path: Utf8PathBuf,
    /// Path relative to the scan target, used in reports and fingerprints.
    pub relative: RepoPath,
}

/// Package name -> installed version string, as reported by the package manager.
///
/// Built fresh for each project; never shared between projects or runs.
pub type InstalledVersionMap = BTreeMap<String, String>;

/// File under a dependency-install directory whose name is a known indicator.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SensitiveArtifact {
    /// Absolute path.
    pub path: Utf8PathBuf,
    pub relative: RepoPath,
}

/// What the resolver learned about one project.
#[derive(Clone, Debug)]
pub struct ProjectObservation {
    pub root: ProjectRoot,
    pub installed: InstalledVersionMap,
    /// Batches that contributed nothing because the tool or its output failed.
    pub failed_batches: u32,
}
