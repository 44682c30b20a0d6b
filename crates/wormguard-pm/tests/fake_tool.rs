//! End-to-end resolution against a fake package manager script.

#![cfg(unix)]

use camino::Utf8PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use wormguard_domain::policy::ResolverPolicy;
use wormguard_pm::{CommandLister, resolve_installed};

/// Emits pnpm-style noise, then a workspace listing. Package `broken` makes it fail.
const FAKE_PNPM: &str = r#"
for name in "$@"; do
  if [ "$name" = "broken" ]; then
    echo "ERR_PNPM_BROKEN" >&2
    exit 1
  fi
done
echo "Scope: all 2 workspace projects"
cat <<'JSON'
[
  {
    "name": "web",
    "dependencies": {
      "react": { "version": "18.2.0", "dependencies": {
        "loose-envify": { "version": "1.4.0" }
      }}
    },
    "devDependencies": {
      "@ctrl/tinycolor": { "version": "4.1.1" }
    }
  },
  {
    "name": "api",
    "dependencies": {
      "loose-envify": { "version": "9.9.9" }
    }
  }
]
JSON
"#;

fn setup() -> (TempDir, Utf8PathBuf, CommandLister) {
    let tmp = TempDir::new().expect("temp dir");
    let dir = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
    let script = dir.join("fake-pnpm.sh");
    std::fs::write(&script, FAKE_PNPM).expect("write script");
    let lister = CommandLister::new(ResolverPolicy {
        program: "sh".to_string(),
        args: vec![script.to_string(), "list".to_string()],
        trailing_args: vec![
            "--depth".to_string(),
            "Infinity".to_string(),
            "--json".to_string(),
        ],
        batch_size: 20,
        timeout: Duration::from_secs(30),
        max_output_bytes: 1024 * 1024,
        tolerate_nonzero_exit: false,
    });
    (tmp, dir, lister)
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn resolves_nested_and_dev_dependencies() {
    let (_tmp, dir, lister) = setup();
    let names = strings(&["@ctrl/tinycolor", "loose-envify", "left-pad"]);

    let resolution = resolve_installed(&lister, &dir, &names, 20);

    assert_eq!(resolution.failed_batches(), 0);
    assert_eq!(
        resolution.installed.get("@ctrl/tinycolor").map(String::as_str),
        Some("4.1.1")
    );
    // First occurrence wins: nested under `web` before the `api` entry.
    assert_eq!(
        resolution.installed.get("loose-envify").map(String::as_str),
        Some("1.4.0")
    );
    assert!(!resolution.installed.contains_key("left-pad"));
}

#[test]
fn failing_batch_is_isolated() {
    let (_tmp, dir, lister) = setup();
    let names = strings(&["broken", "react"]);

    let resolution = resolve_installed(&lister, &dir, &names, 1);

    assert_eq!(resolution.batches.len(), 2);
    assert_eq!(resolution.failed_batches(), 1);
    assert_eq!(
        resolution.installed.get("react").map(String::as_str),
        Some("18.2.0")
    );
}

/// `npm ls` style: full listing on stdout, exit 1 because the tree has problems.
const FAKE_NPM_WITH_PROBLEMS: &str = r#"
cat <<'JSON'
{
  "name": "app",
  "problems": ["extraneous: left-pad@1.3.0"],
  "dependencies": {
    "evil": { "version": "1.0.0" }
  }
}
JSON
exit 1
"#;

#[test]
fn npm_listing_with_problems_still_resolves_when_tolerated() {
    let (_tmp, dir, lister) = setup();
    let script = dir.join("fake-npm.sh");
    std::fs::write(&script, FAKE_NPM_WITH_PROBLEMS).expect("write script");
    let policy = ResolverPolicy {
        args: vec![script.to_string(), "ls".to_string()],
        ..lister.policy().clone()
    };
    let names = strings(&["evil"]);

    let strict = resolve_installed(&CommandLister::new(policy.clone()), &dir, &names, 20);
    assert_eq!(strict.failed_batches(), 1);
    assert!(strict.installed.is_empty());

    let tolerant = CommandLister::new(ResolverPolicy {
        tolerate_nonzero_exit: true,
        ..policy
    });
    let resolution = resolve_installed(&tolerant, &dir, &names, 20);
    assert_eq!(resolution.failed_batches(), 0);
    assert_eq!(
        resolution.installed.get("evil").map(String::as_str),
        Some("1.0.0")
    );
}
