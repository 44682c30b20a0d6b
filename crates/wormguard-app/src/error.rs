use wormguard_types::ids;

/// Conditions that abort a run before any project is audited.
///
/// Everything else is degraded, not fatal: it is logged, counted in the report and the run
/// goes on.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("could not retrieve rules from {origin}: {cause}")]
    RuleRetrieval { origin: String, cause: String },

    #[error(
        "rules retrieved but none valid ({malformed_lines} malformed lines, {lines_without_versions} lines without versions)"
    )]
    NoValidRules {
        malformed_lines: usize,
        lines_without_versions: usize,
    },
}

impl ScanError {
    /// Reason token recorded in the runtime-error report.
    pub fn reason(&self) -> &'static str {
        match self {
            ScanError::RuleRetrieval { .. } => ids::REASON_RULE_RETRIEVAL_FAILED,
            ScanError::NoValidRules { .. } => ids::REASON_NO_VALID_RULES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_distinguish_the_two_fatal_cases() {
        let retrieval = ScanError::RuleRetrieval {
            origin: "https://example.com/iocs.csv".to_string(),
            cause: "HTTP 404".to_string(),
        };
        let empty = ScanError::NoValidRules {
            malformed_lines: 2,
            lines_without_versions: 1,
        };

        assert_eq!(
            retrieval.to_string(),
            "could not retrieve rules from https://example.com/iocs.csv: HTTP 404"
        );
        assert_eq!(
            empty.to_string(),
            "rules retrieved but none valid (2 malformed lines, 1 lines without versions)"
        );
        assert_eq!(retrieval.reason(), "rule_retrieval_failed");
        assert_eq!(empty.reason(), "no_valid_rules");
    }
}
