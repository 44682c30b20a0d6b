use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get a Command for the wormguard binary.
#[allow(deprecated)]
fn wormguard_cmd() -> Command {
    Command::cargo_bin("wormguard").unwrap()
}

#[test]
fn help_works() {
    wormguard_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("annotations"));
}

#[test]
fn scan_help_lists_rule_sources() {
    wormguard_cmd()
        .args(["scan", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--rules-url"))
        .stdout(predicate::str::contains("--rules-file"));
}

#[test]
fn rules_url_and_file_conflict() {
    wormguard_cmd()
        .args([
            "scan",
            ".",
            "--rules-url",
            "https://example.com/iocs.csv",
            "--rules-file",
            "iocs.csv",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
