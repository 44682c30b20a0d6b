#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableTier {
    Clean,
    Warning,
    Artifact,
    Breach,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableFindingKind {
    Breach,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFinding {
    pub kind: RenderableFindingKind,
    pub project: String,
    pub package: String,
    pub installed_version: String,
    pub raw_constraint: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableCounts {
    pub breach: u32,
    pub warning: u32,
    pub artifact: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub profile: String,
    pub rules_loaded: u32,
    pub projects_scanned: u32,
    /// Summed over all projects.
    pub failed_batches: u32,
    pub skipped_entries: u32,
    /// Set when the run aborted before auditing.
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub tier: Option<RenderableTier>,
    pub counts: RenderableCounts,
    pub reasons: Vec<String>,
    /// Breaches first, then warnings; report order within each kind.
    pub findings: Vec<RenderableFinding>,
    pub artifacts: Vec<String>,
    pub data: RenderableData,
}

impl RenderableReport {
    pub fn findings_of(&self, kind: RenderableFindingKind) -> impl Iterator<Item = &RenderableFinding> {
        self.findings.iter().filter(move |f| f.kind == kind)
    }
}
