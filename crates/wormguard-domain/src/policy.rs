use std::collections::BTreeSet;
use std::time::Duration;

/// Filenames dropped by the worm into installed packages.
pub const DEFAULT_INDICATOR_FILES: &[&str] = &[
    "cloud.json",
    "contents.json",
    "environment.json",
    "truffleSecrets.json",
    "setup_bun.js",
    "bun_environment.js",
];

pub const DEFAULT_RULES_URL: &str = "https://raw.githubusercontent.com/DataDog/indicators-of-compromise/refs/heads/main/shai-hulud-2.0/consolidated_iocs.csv";

pub const DEFAULT_BATCH_SIZE: usize = 20;
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_MAX_OUTPUT_MB: usize = 1024;

/// Filesystem conventions of the target package manager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanLayout {
    /// Marks a project root when present directly in a directory.
    pub lockfile: String,
    /// Where installed third-party code lives (`node_modules`).
    pub install_dir: String,
    /// Hidden directory the artifact scanner still enters (`.pnpm`).
    pub store_dir: Option<String>,
}

impl ScanLayout {
    pub fn is_install_dir(&self, name: &str) -> bool {
        name == self.install_dir
    }

    pub fn is_store_dir(&self, name: &str) -> bool {
        self.store_dir.as_deref() == Some(name)
    }
}

/// How to invoke the dependency-listing command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverPolicy {
    pub program: String,
    /// Arguments placed before the package names.
    pub args: Vec<String>,
    /// Arguments placed after the package names.
    pub trailing_args: Vec<String>,
    pub batch_size: usize,
    pub timeout: Duration,
    pub max_output_bytes: usize,
    /// Read the listing even when the tool exits nonzero. `npm ls` exits 1 on tree
    /// problems but still prints the full listing.
    pub tolerate_nonzero_exit: bool,
}

/// Fixed set of indicator filenames, matched against a file's basename.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndicatorSet(BTreeSet<String>);

impl IndicatorSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.0.contains(file_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for IndicatorSet {
    fn default() -> Self {
        Self::new(DEFAULT_INDICATOR_FILES.iter().copied())
    }
}

/// Resolved configuration injected into the audit engine.
#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub rules_url: String,
    pub layout: ScanLayout,
    pub resolver: ResolverPolicy,
    pub indicators: IndicatorSet,
}
