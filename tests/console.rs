//! Integration tests for the `console` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn console_cmd() -> Command {
    Command::cargo_bin("console").expect("console binary not found")
}

#[test]
fn matrix_prints_a_table() {
    console_cmd()
        .args(["matrix", "premium"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("plan: premium"))
        .stdout(predicate::str::contains("exportPDF"));
}

#[test]
fn matrix_accepts_legacy_names() {
    console_cmd()
        .args(["matrix", "Enterprise"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("plan: premium"));
}

#[test]
fn matrix_as_json() {
    let output = console_cmd()
        .args(["matrix", "free", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let matrix: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(matrix["plan"], "free");
    assert_eq!(matrix["dashboard"]["exportPDF"], "paywall");
    assert_eq!(matrix["dashboard"]["assetManager"], "sample_data");
}

#[test]
fn matrix_rejects_unknown_plans() {
    console_cmd()
        .args(["matrix", "platinum"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown plan"));
}

#[test]
fn issued_token_is_printed() {
    console_cmd()
        .args([
            "issue-token",
            "--subject",
            "7",
            "--email",
            "clerk@springfield.gov",
            "--role",
            "staff",
            "--organization-id",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[\w-]+\.[\w-]+\.[\w-]+\s*$").unwrap());
}
