use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn version_flag_prints_build_summary() {
    Command::cargo_bin("vacancy_cli")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "vacancy_cli {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn help_flag_prints_usage() {
    Command::cargo_bin("vacancy_cli")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: vacancy_cli"));
}

#[test]
fn unknown_argument_fails() {
    Command::cargo_bin("vacancy_cli")
        .unwrap()
        .arg("--bogus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown argument `--bogus`"));
}
