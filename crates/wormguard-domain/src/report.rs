use crate::model::{ProjectRoot, SensitiveArtifact};
use wormguard_types::{SeverityTier, Verdict, VerdictCounts};

/// Verdict for one rule in one project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleVerdict {
    pub package: String,
    pub verdict: Verdict,
    /// Raw installed version; `None` exactly when the verdict is `NotInstalled`.
    pub installed_version: Option<String>,
    pub raw_constraint: String,
    pub fingerprint: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ProjectAudit {
    pub root: ProjectRoot,
    /// One entry per rule, in rule order.
    pub verdicts: Vec<RuleVerdict>,
    pub failed_batches: u32,
}

impl ProjectAudit {
    pub fn count(&self, verdict: Verdict) -> u32 {
        saturating_u32(self.verdicts.iter().filter(|v| v.verdict == verdict).count())
    }
}

/// Counter conversion that pins at `u32::MAX` instead of wrapping.
pub(crate) fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Sum of per-project counters, pinned at `u32::MAX`.
pub(crate) fn saturating_sum(values: impl IntoIterator<Item = u32>) -> u32 {
    values.into_iter().fold(0u32, u32::saturating_add)
}

/// Terminal result of one audit run.
#[derive(Clone, Debug)]
pub struct AuditReport {
    pub projects: Vec<ProjectAudit>,
    pub artifacts: Vec<SensitiveArtifact>,
    pub counts: VerdictCounts,
    pub tier: SeverityTier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_saturate_instead_of_wrapping() {
        assert_eq!(saturating_u32(7), 7);
        assert_eq!(saturating_u32(usize::MAX), u32::MAX);
        assert_eq!(saturating_sum([1, 2, 3]), 6);
        assert_eq!(saturating_sum([u32::MAX, 1]), u32::MAX);
        assert_eq!(saturating_sum(std::iter::empty()), 0);
    }
}
