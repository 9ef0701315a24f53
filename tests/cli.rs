#![cfg(feature = "cli")]

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn websee_bin() -> &'static str {
    env!("CARGO_BIN_EXE_websee")
}

fn run(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(websee_bin())
        .args(args)
        .env("WEBSEE_DEFAULT_OPTIONS", "")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("run websee");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin)
        .expect("write stdin");
    child.wait_with_output().expect("wait websee")
}

#[test]
fn prints_scores_in_input_order() {
    let output = run(&["-q", "furf"], b"foobar\ntest\n\nfunder-sfinder\nsinderfinder\n");
    assert!(output.status.success(), "status={:?}", output.status.code());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "foobar\t2\ntest\t0\n\t0\nfunder-sfinder\t4\nsinderfinder\t4\n");
}

#[test]
fn algorithm_flag_selects_first_occurrence() {
    let output = run(&["-q", "furf", "--algo", "v1"], b"funder-sfinder\nsinderfinder\n");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "funder-sfinder\t3\nsinderfinder\t0\n");
}

#[test]
fn weight_flags_accept_negative_numbers() {
    let output = run(
        &["-q", "abc", "--match-score", "3", "--mismatch-score", "-2", "--gap-penalty", "-2"],
        b"abc\n",
    );
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "abc\t9\n");
}

#[test]
fn nul_separated_io() {
    let output = run(&["-q", "fo", "--read0", "--print0"], b"foo\nbar\0test\0");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"foo\nbar\t4\0test\t0\0");
}

#[test]
fn config_file_and_overrides() {
    let mut config = tempfile::NamedTempFile::new().expect("temp config");
    write!(config, "(algorithm: v1, case: respect)").expect("write config");
    let path = config.path().to_str().expect("utf-8 path");

    let output = run(&["-q", "FO", "--config", path], b"foobar\nFOOBAR\n");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "foobar\t0\nFOOBAR\t4\n");

    let output = run(&["-q", "FO", "--config", path, "--case", "ignore"], b"foobar\nFOOBAR\n");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "foobar\t4\nFOOBAR\t4\n");
}

#[test]
fn invalid_utf8_input_fails() {
    let output = run(&["-q", "fo"], b"foo\n\xff\n");
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not valid UTF-8"));
}

#[test]
fn broken_config_fails() {
    let mut config = tempfile::NamedTempFile::new().expect("temp config");
    write!(config, "(algorithm: v9)").expect("write config");
    let path = config.path().to_str().expect("utf-8 path");

    let output = run(&["-q", "fo", "--config", path], b"foo\n");
    assert_eq!(output.status.code(), Some(2));
}
