use crate::ScanError;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use wormguard_rules::{RuleSet, parse_rules};

/// Where the compromised-package list comes from.
///
/// Retrieval happens exactly once per run, before any project is touched.
pub trait RuleSource {
    /// Human-readable location used in error messages.
    fn describe(&self) -> String;

    fn fetch(&self) -> anyhow::Result<String>;
}

/// Rule list read from a local file.
#[derive(Clone, Debug)]
pub struct FileRuleSource {
    path: Utf8PathBuf,
}

impl FileRuleSource {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl RuleSource for FileRuleSource {
    fn describe(&self) -> String {
        self.path.to_string()
    }

    fn fetch(&self) -> anyhow::Result<String> {
        std::fs::read_to_string(&self.path).with_context(|| format!("read {}", self.path))
    }
}

/// Fetch and parse the rule list. Fails only on the two fatal conditions.
pub fn load_rules(source: &dyn RuleSource) -> Result<RuleSet, ScanError> {
    let origin = source.describe();
    tracing::info!(source = %origin, "fetching rules");

    let text = source.fetch().map_err(|err| ScanError::RuleRetrieval {
        origin: origin.clone(),
        cause: format!("{err:#}"),
    })?;

    let rules = parse_rules(&text);
    if rules.malformed_lines() > 0 {
        tracing::warn!(
            count = rules.malformed_lines(),
            "some rule lines were malformed and skipped"
        );
    }
    if rules.is_empty() {
        return Err(ScanError::NoValidRules {
            malformed_lines: rules.malformed_lines(),
            lines_without_versions: rules.lines_without_versions(),
        });
    }

    tracing::info!(rules = rules.len(), "rules loaded");
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(anyhow::Result<&'static str>);

    impl RuleSource for Fixed {
        fn describe(&self) -> String {
            "fixture".to_string()
        }

        fn fetch(&self) -> anyhow::Result<String> {
            match &self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(err) => Err(anyhow::anyhow!("{err}")),
            }
        }
    }

    #[test]
    fn loads_valid_rules_and_keeps_issues() {
        let rules = load_rules(&Fixed(Ok("pkg-a, = 1.0.0\nbadline\n"))).expect("rules");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.malformed_lines(), 1);
    }

    #[test]
    fn retrieval_failure_is_fatal() {
        let err = load_rules(&Fixed(Err(anyhow::anyhow!("connection refused"))))
            .expect_err("must fail");
        assert!(matches!(
            err,
            ScanError::RuleRetrieval { ref origin, ref cause }
                if origin == "fixture" && cause.contains("connection refused")
        ));
    }

    #[test]
    fn empty_rule_set_is_fatal() {
        let err = load_rules(&Fixed(Ok("only-a-name\npkg, latest\n\n"))).expect_err("must fail");
        assert!(matches!(
            err,
            ScanError::NoValidRules {
                malformed_lines: 1,
                lines_without_versions: 1
            }
        ));
    }

    #[test]
    fn file_source_reads_and_reports_missing_file() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let dir = Utf8Path::from_path(tmp.path()).expect("utf8");
        let path = dir.join("iocs.csv");
        std::fs::write(&path, "evil, = 1.0.0\n").expect("write");

        let text = FileRuleSource::new(path.clone()).fetch().expect("read");
        assert_eq!(text, "evil, = 1.0.0\n");

        let err = load_rules(&FileRuleSource::new(dir.join("missing.csv"))).expect_err("missing");
        assert!(matches!(err, ScanError::RuleRetrieval { .. }));
    }
}
