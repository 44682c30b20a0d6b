use crate::model::{PackageRule, RuleIssue, RuleIssueKind, RuleSet};
use crate::version::normalize;
use tracing::warn;

/// Separator between alternative versions inside one constraint (`"= 0.1.18 || = 0.1.19"`).
pub const ALTERNATIVE_SEPARATOR: &str = "||";

/// Parse line-oriented `name,constraint` text into rules.
///
/// Never fails: blank lines are skipped, malformed lines and lines without a resolvable
/// version are recorded in [`RuleSet::issues`] and parsing continues. Fields past the second
/// are ignored. Whether an empty result is fatal is the caller's decision.
pub fn parse_rules(text: &str) -> RuleSet {
    let mut set = RuleSet::default();

    for (index, line) in text.split('\n').enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut fields = trimmed.split(',');
        let name = fields.next().map(str::trim).unwrap_or_default();
        let Some(constraint) = fields.next().map(str::trim) else {
            warn!(line = line_no, "rule line has no constraint field; expected `name,constraint`");
            set.issues.push(issue(line_no, RuleIssueKind::Malformed, trimmed));
            continue;
        };
        if name.is_empty() || constraint.is_empty() {
            warn!(line = line_no, "rule line has an empty name or constraint");
            set.issues.push(issue(line_no, RuleIssueKind::Malformed, trimmed));
            continue;
        }

        let versions = constraint
            .split(ALTERNATIVE_SEPARATOR)
            .map(|alt| normalize(alt.trim()));

        match PackageRule::new(name, versions, constraint) {
            Some(rule) => set.rules.push(rule),
            None => {
                warn!(line = line_no, package = name, "no valid versions found; rule dropped");
                set.issues.push(issue(line_no, RuleIssueKind::NoVersions, trimmed));
            }
        }
    }

    set
}

fn issue(line: usize, kind: RuleIssueKind, text: &str) -> RuleIssue {
    RuleIssue {
        line,
        kind,
        text: text.to_string(),
    }
}
