use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command { Command::cargo_bin("bf").unwrap() }

fn infinite_bf() -> &'static str { "+[]" }

#[test]
fn timeout_flag_aborts_infinite_loop() {
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg("run").arg("--timeout").arg("100").arg(infinite_bf())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Execution aborted: wall-clock timeout exceeded (100 ms)"))
        .stdout(predicate::str::contains("Execution aborted").not());
}

#[test]
fn timeout_from_environment() {
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .env("BF_TIMEOUT_MS", "100")
        .arg("run").arg(infinite_bf())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Execution aborted"));
}

#[test]
fn max_steps_aborts() {
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg("run").arg("--max-steps").arg("50").arg(infinite_bf())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("step limit exceeded (50)"));
}

#[test]
fn step_limit_allows_short_programs() {
    cargo_bin()
        .arg("run").arg("--max-steps").arg("10").arg("+++.")
        .assert()
        .success()
        .stdout("\u{3}");
}

#[test]
fn timeout_aborts_blocked_read() {
    use assert_cmd::cargo::CommandCargoExt;
    use std::io::Read;
    use std::process::Stdio;
    use std::time::Instant;

    let mut child = std::process::Command::cargo_bin("bf")
        .unwrap()
        .arg("run").arg("--timeout").arg("100").arg(",")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn bf");
    // Never written to or closed until bf exits.
    let _stdin = child.stdin.take();

    let start = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait().expect("try_wait") {
            break status;
        }
        if start.elapsed() > Duration::from_secs(5) {
            let _ = child.kill();
            panic!("bf hung on a blocked read past its timeout");
        }
        std::thread::sleep(Duration::from_millis(20));
    };
    assert_eq!(status.code(), Some(1));

    let mut stderr = String::new();
    child.stderr.take().expect("stderr").read_to_string(&mut stderr).unwrap();
    assert!(stderr.contains("Execution aborted"), "stderr: {stderr}");
}
