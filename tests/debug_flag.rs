use assert_cmd::Command;
use predicates::prelude::*;

fn cargo_bin() -> Command { Command::cargo_bin("bf").unwrap() }

#[test]
fn debug_prints_table_instead_of_output() {
    cargo_bin()
        .arg("run").arg("--debug").arg("+.+")
        .assert()
        .success()
        .stdout(predicate::str::contains("STEP | IP").and(predicate::str::contains("suppressed in debug")))
        .stderr(predicate::str::is_empty());
}

#[test]
fn debug_does_not_consume_stdin() {
    cargo_bin()
        .arg("run").arg("-d").arg(",.")
        .write_stdin("Z")
        .assert()
        .success()
        .stdout(predicate::str::contains("simulated EOF"));
}

#[test]
fn verbose_logs_go_to_stderr() {
    cargo_bin()
        .env_remove("RUST_LOG")
        .arg("-v").arg("run").arg("+.")
        .assert()
        .success()
        .stdout("\u{1}")
        .stderr(predicate::str::contains("evaluation finished"));
}
