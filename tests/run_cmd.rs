use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::time::Duration;

fn cargo_bin() -> Command { Command::cargo_bin("bf").unwrap() }

const HELLO: &str = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";

fn program_tempfile(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}

#[test]
fn hello_world_output_is_exact() {
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg("run").arg(HELLO)
        .assert()
        .success()
        .stdout("Hello World!\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn code_parts_are_concatenated() {
    // "+++++++++[>+++++++<-]>." split across args prints '?' (63)
    cargo_bin()
        .arg("run").arg("+++++++++[>+++++++<-").arg("]>.")
        .assert()
        .success()
        .stdout("?");
}

#[test]
fn reads_from_stdin_and_echoes_byte() {
    cargo_bin()
        .arg("run").arg(",.")
        .write_stdin("A")
        .assert()
        .success()
        .stdout("A");
}

#[test]
fn end_of_input_reads_as_zero() {
    cargo_bin()
        .arg("run").arg(",.,.")
        .write_stdin("")
        .assert()
        .success()
        .stdout("\0\0");
}

#[test]
fn echo_until_end_of_input() {
    cargo_bin()
        .arg("run").arg(",[.,]")
        .write_stdin("echo me")
        .assert()
        .success()
        .stdout("echo me");
}

#[test]
fn program_from_file_with_comments() {
    let tf = program_tempfile("Hello World\n++++++++++[>+++++++>++++++++++>+++>+<<<<-]\n>++.>+.+++++++..+++.>++.<<+++++++++++++++.\n>.+++.------.--------.>+.>.\n");
    cargo_bin()
        .arg("run").arg("--file").arg(tf.path())
        .assert()
        .success()
        .stdout("Hello World!\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn missing_program_is_a_usage_error() {
    cargo_bin()
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn code_and_file_together_is_a_usage_error() {
    let tf = program_tempfile("+.");
    cargo_bin()
        .arg("run").arg("--file").arg(tf.path()).arg("+.")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot use positional code together with --file"));
}

#[test]
fn unreadable_file_fails() {
    cargo_bin()
        .arg("run").arg("--file").arg("/no/such/dir/program.bf")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read program file"));
}

#[test]
fn no_subcommand_prints_usage() {
    cargo_bin()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn subcommand_help_exits_zero() {
    cargo_bin()
        .arg("run").arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::contains("--policy"));
}

#[test]
fn help_says_options_go_before_code() {
    cargo_bin()
        .arg("run").arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::contains("Options must come before the code"));
}

#[test]
fn option_after_code_is_program_text() {
    // "--policy" after the code is joined into the program, so strict is never set
    // and the leftward move wraps instead of failing.
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg("run").arg("<+.").arg("--policy").arg("strict")
        .assert()
        .success();
}
