use assert_cmd::Command;
use predicates::prelude::*;

fn cargo_bin() -> Command { Command::cargo_bin("bf").unwrap() }

#[test]
fn valid_program_reports_counts() {
    cargo_bin()
        .arg("check").arg("+[>[-]<]")
        .assert()
        .success()
        .stdout("ok: 8 instructions, 2 loops\n");
}

#[test]
fn check_does_not_execute() {
    cargo_bin()
        .arg("check").arg(",.")
        .write_stdin("A")
        .assert()
        .success()
        .stdout(predicate::str::contains("A").not());
}

#[test]
fn unmatched_open_reports_earliest_position() {
    cargo_bin()
        .arg("check").arg("+[[]")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'[' without matching ']'").and(predicate::str::contains("position: 2")));
}
