//! CLI smoke tests. Network-dependent behavior is covered by the service
//! tests against a fake source; these only exercise argument handling.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_the_four_operations() {
    Command::cargo_bin("builder-catalogue")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("buildable")
                .and(predicate::str::contains("collaborators"))
                .and(predicate::str::contains("build-size"))
                .and(predicate::str::contains("color-flex")),
        );
}

#[test]
fn missing_subcommand_fails_with_usage() {
    Command::cargo_bin("builder-catalogue")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn buildable_requires_an_owner_argument() {
    Command::cargo_bin("builder-catalogue")
        .unwrap()
        .arg("buildable")
        .assert()
        .failure()
        .stderr(predicate::str::contains("OWNER"));
}
