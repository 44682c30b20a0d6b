use camino::Utf8Path;
use wormguard_domain::model::ProjectObservation;
use wormguard_domain::policy::EffectiveConfig;
use wormguard_domain::report::AuditReport;
use wormguard_pm::{CommandLister, DependencyLister, resolve_installed};
use wormguard_repo::{SkippedEntry, locate_projects, scan_artifacts};
use wormguard_rules::{PackageRule, distinct_names};

/// Drives one audit: locate projects, resolve each, scan for artifacts, evaluate.
///
/// Configuration (layout, resolver policy, indicator set) is injected at construction;
/// nothing is read from process-wide state.
#[derive(Clone, Debug)]
pub struct AuditEngine<L> {
    config: EffectiveConfig,
    lister: L,
}

/// The audit result plus the traversal entries that had to be skipped.
#[derive(Clone, Debug)]
pub struct AuditOutcome {
    pub report: AuditReport,
    pub skipped: Vec<SkippedEntry>,
}

impl AuditEngine<CommandLister> {
    /// Engine that runs the configured package-manager command.
    pub fn from_config(config: EffectiveConfig) -> Self {
        let lister = CommandLister::new(config.resolver.clone());
        Self { config, lister }
    }
}

impl<L: DependencyLister> AuditEngine<L> {
    pub fn new(config: EffectiveConfig, lister: L) -> Self {
        Self { config, lister }
    }

    pub fn config(&self) -> &EffectiveConfig {
        &self.config
    }

    pub fn lister(&self) -> &L {
        &self.lister
    }

    /// Audit every project under `root` against `rules`.
    ///
    /// Never fails: unreadable directories and failed resolver batches are recorded and the
    /// run continues with what could be determined.
    pub fn run(&self, root: &Utf8Path, rules: &[PackageRule]) -> AuditOutcome {
        let layout = &self.config.layout;
        let mut skipped = Vec::new();

        tracing::info!(root = %root, lockfile = %layout.lockfile, "locating projects");
        let located = locate_projects(root, layout);
        skipped.extend(located.skipped);
        if located.found.is_empty() {
            tracing::warn!(
                root = %root,
                lockfile = %layout.lockfile,
                "no projects found"
            );
        } else {
            tracing::info!(count = located.found.len(), "found projects");
        }

        let names = distinct_names(rules);
        let observations: Vec<ProjectObservation> = located
            .found
            .into_iter()
            .map(|project| {
                tracing::info!(project = %project.relative, "auditing project");
                let resolution = resolve_installed(
                    &self.lister,
                    &project.path,
                    &names,
                    self.config.resolver.batch_size,
                );
                let failed_batches = resolution.failed_batches();
                if failed_batches > 0 {
                    tracing::warn!(
                        project = %project.relative,
                        failed_batches,
                        "some packages could not be resolved"
                    );
                }
                ProjectObservation {
                    root: project,
                    installed: resolution.installed,
                    failed_batches,
                }
            })
            .collect();

        tracing::info!(root = %root, "scanning installed code for sensitive files");
        let artifacts = scan_artifacts(root, layout, &self.config.indicators);
        skipped.extend(artifacts.skipped);
        if !artifacts.found.is_empty() {
            tracing::warn!(count = artifacts.found.len(), "sensitive files found");
        }

        let report = wormguard_domain::evaluate(&observations, rules, artifacts.found);
        tracing::info!(
            breaches = report.counts.breach,
            warnings = report.counts.warning,
            artifacts = report.counts.artifact,
            tier = ?report.tier,
            "audit complete"
        );

        AuditOutcome { report, skipped }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::time::Duration;
    use wormguard_domain::policy::{IndicatorSet, ResolverPolicy, ScanLayout};
    use wormguard_rules::normalize;
    use wormguard_types::{SeverityTier, Verdict};

    /// Answers from a per-project table keyed by the project's directory name.
    struct TableLister {
        installed: BTreeMap<&'static str, Vec<(&'static str, &'static str)>>,
        calls: RefCell<Vec<(String, usize)>>,
        fail_projects: Vec<&'static str>,
    }

    impl DependencyLister for TableLister {
        fn list(&self, project: &Utf8Path, names: &[String]) -> anyhow::Result<String> {
            let key = project.file_name().unwrap_or_default();
            self.calls.borrow_mut().push((key.to_string(), names.len()));
            if self.fail_projects.iter().any(|p| *p == key) {
                anyhow::bail!("tool crashed");
            }
            let deps: serde_json::Map<String, serde_json::Value> = self
                .installed
                .get(key)
                .into_iter()
                .flatten()
                .map(|(n, v)| (n.to_string(), serde_json::json!({ "version": v })))
                .collect();
            Ok(serde_json::json!({ "dependencies": deps }).to_string())
        }
    }

    fn config(indicators: IndicatorSet) -> EffectiveConfig {
        EffectiveConfig {
            profile: "pnpm".to_string(),
            rules_url: "file:///dev/null".to_string(),
            layout: ScanLayout {
                lockfile: "pnpm-lock.yaml".to_string(),
                install_dir: "node_modules".to_string(),
                store_dir: Some(".pnpm".to_string()),
            },
            resolver: ResolverPolicy {
                program: "unused".to_string(),
                args: Vec::new(),
                trailing_args: Vec::new(),
                batch_size: 20,
                timeout: Duration::from_secs(1),
                max_output_bytes: 1024,
                tolerate_nonzero_exit: false,
            },
            indicators,
        }
    }

    fn rule(name: &str, versions: &[&str]) -> PackageRule {
        PackageRule::new(name, versions.iter().map(|v| normalize(v)), versions.join(" || "))
            .expect("valid rule")
    }

    fn touch(path: &Utf8Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create dirs");
        }
        std::fs::write(path, "").expect("write");
    }

    fn tree() -> (tempfile::TempDir, Utf8PathBuf) {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().join("repo")).expect("utf8");
        touch(&root.join("web/pnpm-lock.yaml"));
        touch(&root.join("api/pnpm-lock.yaml"));
        (tmp, root)
    }

    #[test]
    fn classifies_per_project_and_counts_globally() {
        let (_tmp, root) = tree();
        let lister = TableLister {
            installed: BTreeMap::from([
                ("web", vec![("evil", "1.0.0"), ("left-pad", "1.3.0")]),
                ("api", vec![("evil", "^1.0.1")]),
            ]),
            calls: RefCell::default(),
            fail_projects: Vec::new(),
        };
        let engine = AuditEngine::new(config(IndicatorSet::default()), lister);
        let rules = vec![
            rule("evil", &["1.0.0"]),
            rule("left-pad", &["1.3.1"]),
            rule("absent", &["2.0.0"]),
        ];

        let outcome = engine.run(&root, &rules);

        let report = &outcome.report;
        let paths: Vec<&str> = report.projects.iter().map(|p| p.root.relative.as_str()).collect();
        assert_eq!(paths, vec!["api", "web"]);
        assert_eq!(report.projects[0].verdicts[0].verdict, Verdict::Warning);
        assert_eq!(report.projects[1].verdicts[0].verdict, Verdict::Breach);
        assert_eq!(report.projects[1].verdicts[1].verdict, Verdict::Warning);
        assert_eq!(report.projects[1].verdicts[2].verdict, Verdict::NotInstalled);
        assert_eq!(report.counts.breach, 1);
        assert_eq!(report.counts.warning, 2);
        assert_eq!(report.tier, SeverityTier::Breach);
    }

    #[test]
    fn distinct_names_are_requested_once_per_project() {
        let (_tmp, root) = tree();
        let lister = TableLister {
            installed: BTreeMap::new(),
            calls: RefCell::default(),
            fail_projects: Vec::new(),
        };
        let engine = AuditEngine::new(config(IndicatorSet::default()), lister);
        let rules = vec![rule("a", &["1"]), rule("a", &["2"]), rule("b", &["1"])];

        let outcome = engine.run(&root, &rules);

        let calls = engine.lister.calls.borrow();
        assert_eq!(
            *calls,
            vec![("api".to_string(), 2), ("web".to_string(), 2)]
        );
        assert_eq!(outcome.report.projects[0].verdicts.len(), 3);
        assert_eq!(outcome.report.tier, SeverityTier::Clean);
    }

    #[test]
    fn failing_project_does_not_stop_others() {
        let (_tmp, root) = tree();
        let lister = TableLister {
            installed: BTreeMap::from([("web", vec![("evil", "1.0.0")])]),
            calls: RefCell::default(),
            fail_projects: vec!["api"],
        };
        let engine = AuditEngine::new(config(IndicatorSet::default()), lister);

        let outcome = engine.run(&root, &[rule("evil", &["1.0.0"])]);

        let report = &outcome.report;
        assert_eq!(report.projects[0].failed_batches, 1);
        assert_eq!(report.projects[0].verdicts[0].verdict, Verdict::NotInstalled);
        assert_eq!(report.projects[1].verdicts[0].verdict, Verdict::Breach);
    }

    #[test]
    fn artifacts_use_injected_indicator_set() {
        let (_tmp, root) = tree();
        touch(&root.join("web/node_modules/x/cloud.json"));
        touch(&root.join("web/node_modules/x/marker.txt"));
        let lister = TableLister {
            installed: BTreeMap::new(),
            calls: RefCell::default(),
            fail_projects: Vec::new(),
        };
        let engine = AuditEngine::new(config(IndicatorSet::new(["marker.txt"])), lister);

        let outcome = engine.run(&root, &[rule("evil", &["1.0.0"])]);

        let artifacts: Vec<&str> = outcome
            .report
            .artifacts
            .iter()
            .map(|a| a.relative.as_str())
            .collect();
        assert_eq!(artifacts, vec!["web/node_modules/x/marker.txt"]);
        assert_eq!(outcome.report.tier, SeverityTier::Artifact);
    }

    #[test]
    fn missing_root_is_recorded_as_skip() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().join("nope")).expect("utf8");
        let lister = TableLister {
            installed: BTreeMap::new(),
            calls: RefCell::default(),
            fail_projects: Vec::new(),
        };
        let engine = AuditEngine::new(config(IndicatorSet::default()), lister);

        let outcome = engine.run(&root, &[rule("evil", &["1.0.0"])]);

        assert!(outcome.report.projects.is_empty());
        assert_eq!(outcome.skipped.len(), 2);
    }
}
