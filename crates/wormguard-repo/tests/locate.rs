//! Integration tests for project location and artifact scanning over a fixture tree.
//!
//! The `monorepo` fixture mixes real project roots with lockfiles that must be ignored
//! (inside `node_modules` or hidden directories) and indicator files both inside and
//! outside installed code.

use camino::Utf8PathBuf;
use std::path::PathBuf;
use wormguard_domain::policy::{IndicatorSet, ScanLayout};
use wormguard_repo::{locate_projects, scan_artifacts};

/// Get the path to the test fixtures directory (repo root / tests / fixtures).
fn fixtures_dir() -> Utf8PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // crates/wormguard-repo -> crates -> repo root
    let repo_root = manifest_dir
        .parent()
        .expect("wormguard-repo should have parent (crates)")
        .parent()
        .expect("crates should have parent (repo root)");
    Utf8PathBuf::from_path_buf(repo_root.join("tests").join("fixtures"))
        .expect("fixture path should be valid UTF-8")
}

fn pnpm_layout() -> ScanLayout {
    ScanLayout {
        lockfile: "pnpm-lock.yaml".to_string(),
        install_dir: "node_modules".to_string(),
        store_dir: Some(".pnpm".to_string()),
    }
}

fn read_golden(name: &str) -> Vec<String> {
    let path = fixtures_dir().join("monorepo").join(name);
    let content = std::fs::read_to_string(&path).expect("should read golden file");
    serde_json::from_str(&content).expect("golden file should be a JSON string array")
}

#[test]
fn project_roots_match_golden_order() {
    let root = fixtures_dir().join("monorepo");

    let found = locate_projects(&root, &pnpm_layout());
    let actual: Vec<&str> = found.found.iter().map(|p| p.relative.as_str()).collect();

    assert!(found.skipped.is_empty(), "skipped: {:?}", found.skipped);
    assert_eq!(actual, read_golden("expected.projects.json"));
}

#[test]
fn project_location_is_idempotent() {
    let root = fixtures_dir().join("monorepo");

    let run1 = locate_projects(&root, &pnpm_layout());
    let run2 = locate_projects(&root, &pnpm_layout());

    assert_eq!(run1, run2);
}

#[test]
fn project_paths_are_absolute_under_root() {
    let root = fixtures_dir().join("monorepo");

    let found = locate_projects(&root, &pnpm_layout());

    for project in &found.found {
        assert!(project.path.starts_with(&root), "{}", project.path);
    }
    assert_eq!(found.found[0].path, root);
}

#[test]
fn artifacts_match_golden_list() {
    let root = fixtures_dir().join("monorepo");

    let found = scan_artifacts(&root, &pnpm_layout(), &IndicatorSet::default());
    let actual: Vec<&str> = found.found.iter().map(|a| a.relative.as_str()).collect();

    assert!(found.skipped.is_empty(), "skipped: {:?}", found.skipped);
    assert_eq!(actual, read_golden("expected.artifacts.json"));
}

#[test]
fn artifact_scan_without_store_dir_skips_pnpm_store() {
    let root = fixtures_dir().join("monorepo");
    let layout = ScanLayout {
        store_dir: None,
        ..pnpm_layout()
    };

    let found = scan_artifacts(&root, &layout, &IndicatorSet::default());
    let actual: Vec<&str> = found.found.iter().map(|a| a.relative.as_str()).collect();

    assert_eq!(actual, vec!["node_modules/nested/environment.json"]);
}
