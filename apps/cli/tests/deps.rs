use assert_cmd::Command;
use predicates::prelude::*;

fn plinth() -> Command {
    Command::cargo_bin("plinth").expect("binary should be built")
}

#[test]
fn deps_lists_every_dependency() {
    plinth()
        .arg("deps")
        .assert()
        .success()
        .stdout(predicate::str::contains("hash"))
        .stdout(predicate::str::contains("serialization"))
        .stdout(predicate::str::contains("text"));
}

#[test]
fn check_known_dependency_succeeds() {
    plinth()
        .args(["deps", "--check", "hash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hash"));
}

#[test]
fn check_unknown_dependency_fails_with_exit_code_one() {
    plinth()
        .args(["deps", "--check", "definitely-not-a-dependency"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Dependency check failed"));
}

#[test]
fn quiet_suppresses_the_listing() {
    plinth().args(["deps", "--quiet"]).assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn quiet_never_suppresses_the_exit_code() {
    plinth()
        .args(["deps", "-q", "--check", "definitely-not-a-dependency"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Dependency check failed"));
}

#[test]
fn no_subcommand_prints_help() {
    plinth().assert().failure().stderr(predicate::str::contains("Usage"));
}
