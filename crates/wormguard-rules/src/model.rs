use crate::CanonicalVersion;
use std::collections::BTreeSet;

/// One compromised-package entry.
///
/// `name` and `raw_constraint` are non-empty and `compromised_versions` never contains the
/// sentinel and is never empty; [`PackageRule::new`] refuses anything else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageRule {
    name: String,
    compromised_versions: BTreeSet<CanonicalVersion>,
    raw_constraint: String,
}

impl PackageRule {
    pub fn new(
        name: impl Into<String>,
        versions: impl IntoIterator<Item = CanonicalVersion>,
        raw_constraint: impl Into<String>,
    ) -> Option<Self> {
        let name = name.into();
        let raw_constraint = raw_constraint.into();
        let compromised_versions: BTreeSet<_> =
            versions.into_iter().filter(|v| !v.is_sentinel()).collect();

        if name.is_empty() || raw_constraint.is_empty() || compromised_versions.is_empty() {
            return None;
        }

        Some(Self {
            name,
            compromised_versions,
            raw_constraint,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn compromised_versions(&self) -> &BTreeSet<CanonicalVersion> {
        &self.compromised_versions
    }

    pub fn raw_constraint(&self) -> &str {
        &self.raw_constraint
    }

    /// Exact token membership. The sentinel never matches.
    pub fn is_compromised(&self, version: &CanonicalVersion) -> bool {
        !version.is_sentinel() && self.compromised_versions.contains(version)
    }
}

/// Distinct package names across `rules`, first occurrence order.
pub fn distinct_names(rules: &[PackageRule]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    rules
        .iter()
        .filter(|r| seen.insert(r.name()))
        .map(|r| r.name().to_string())
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleIssueKind {
    /// Fewer than two comma-separated fields, or an empty name/constraint.
    Malformed,
    /// Well-formed line whose alternatives all normalized to the sentinel.
    NoVersions,
}

/// A non-blank line that did not produce a rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleIssue {
    /// 1-based line number in the source text.
    pub line: usize,
    pub kind: RuleIssueKind,
    pub text: String,
}

/// Parsed rule list in source order, plus everything that was skipped.
///
/// Duplicate names are retained; each entry is evaluated on its own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub rules: Vec<PackageRule>,
    pub issues: Vec<RuleIssue>,
}

impl RuleSet {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn malformed_lines(&self) -> usize {
        self.count(RuleIssueKind::Malformed)
    }

    pub fn lines_without_versions(&self) -> usize {
        self.count(RuleIssueKind::NoVersions)
    }

    /// Distinct package names, first occurrence order.
    pub fn package_names(&self) -> Vec<String> {
        distinct_names(&self.rules)
    }

    fn count(&self, kind: RuleIssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }
}
