//! Integration tests for bankers CLI

use std::io::Write;
use std::process::{Command, Output, Stdio};

const CLASSIC: &str = "5 3
7 5 3  3 2 2  9 0 2  2 2 2  4 3 3
0 1 0  2 0 0  3 0 2  2 1 1  0 0 2
3 3 2
";

const STUCK: &str = "5 3
7 5 3  3 2 2  9 0 2  2 2 2  4 3 3
0 1 0  2 0 0  3 0 2  2 1 1  0 0 2
0 0 0
";

fn bankers(config_home: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bankers"));
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("BANKERS_OUTPUT")
        .env_remove("BANKERS_COLOR")
        .env_remove("BANKERS_SCAN_ORDER")
        .env_remove("BANKERS_TRACE")
        .env_remove("RUST_LOG")
        .args(["--color", "never"]);
    cmd
}

fn run_with_stdin(mut cmd: Command, input: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn bankers");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for bankers")
}

#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_bankers"))
        .arg("--version")
        .output()
        .expect("Failed to execute bankers");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("bankers"));
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_bankers"))
        .arg("--help")
        .output()
        .expect("Failed to execute bankers");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Banker's algorithm safety checker"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("verify"));
    assert!(stdout.contains("template"));
}

#[test]
fn test_cli_invalid_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_bankers"))
        .arg("invalid-command")
        .output()
        .expect("Failed to execute bankers");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn test_check_safe_state_from_stdin() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = bankers(home.path());
    cmd.arg("check");

    let output = run_with_stdin(cmd, CLASSIC);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("System is in a safe state."));
    assert!(stdout.contains("P1 P3 P4 P0 P2"));
    assert!(stdout.contains("10 5 7"));
}

#[test]
fn test_check_restart_order_from_file() {
    let home = tempfile::tempdir().unwrap();
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(CLASSIC.as_bytes()).unwrap();

    let output = bankers(home.path())
        .args(["check", "--scan-order", "restart"])
        .arg(file.path())
        .output()
        .expect("Failed to execute bankers");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("P1 P3 P0 P2 P4"));
}

#[test]
fn test_check_unsafe_state_exits_with_two() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = bankers(home.path());
    cmd.arg("check");

    let output = run_with_stdin(cmd, STUCK);
    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("System is in an unsafe state."));
    assert!(!stdout.contains("System is in a safe state."));
}

#[test]
fn test_check_json_output() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = bankers(home.path());
    cmd.args(["--json", "check", "--trace"]);

    let output = run_with_stdin(cmd, CLASSIC);
    assert_eq!(output.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["type"], "Check");
    assert_eq!(json["data"]["outcome"]["verdict"], "safe");
    assert_eq!(
        json["data"]["outcome"]["sequence"],
        serde_json::json!([1, 3, 4, 0, 2])
    );
    assert_eq!(json["data"]["steps"].as_array().map(Vec::len), Some(5));
}

#[test]
fn test_check_malformed_input_is_an_error() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = bankers(home.path());
    cmd.arg("check");

    let output = run_with_stdin(cmd, "2 1\n1 x\n");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input.invalid_token"));
}

#[test]
fn test_check_missing_file() {
    let home = tempfile::tempdir().unwrap();
    let output = bankers(home.path())
        .args(["check", "/nonexistent/state.toml"])
        .output()
        .expect("Failed to execute bankers");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input.not_found"));
}

#[test]
fn test_verify_sequence() {
    let home = tempfile::tempdir().unwrap();
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(CLASSIC.as_bytes()).unwrap();

    let ok = bankers(home.path())
        .arg("verify")
        .arg(file.path())
        .args(["--sequence", "1,3,4,0,2"])
        .output()
        .expect("Failed to execute bankers");
    assert_eq!(ok.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&ok.stdout).contains("[OK]"));

    let bad = bankers(home.path())
        .arg("verify")
        .arg(file.path())
        .args(["--sequence", "P0 P1 P2 P3 P4"])
        .output()
        .expect("Failed to execute bankers");
    assert_eq!(bad.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&bad.stdout).contains("[FAILED]"));
}

#[test]
fn test_template_is_a_loadable_snapshot() {
    let home = tempfile::tempdir().unwrap();
    let output = bankers(home.path())
        .arg("template")
        .output()
        .expect("Failed to execute bankers");
    assert!(output.status.success());

    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(&output.stdout).unwrap();

    let check = bankers(home.path())
        .arg("check")
        .arg(file.path())
        .output()
        .expect("Failed to execute bankers");
    assert_eq!(check.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&check.stdout).contains("P1 P3 P4 P0 P2"));
}

#[test]
fn test_interactive_prompts() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = bankers(home.path());
    cmd.arg("interactive");

    let output = run_with_stdin(cmd, CLASSIC);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Enter number of processes:"));
    assert!(stdout.contains("Enter the Available resources:"));
    assert!(stdout.contains("P1 P3 P4 P0 P2"));
}

#[test]
fn test_interactive_rejects_oversized_process_count() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = bankers(home.path());
    cmd.arg("interactive");

    let output = run_with_stdin(cmd, "1000000000000000000 1\n");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input.invalid_token"));
    assert!(!stderr.contains("panicked"));
}

#[test]
fn test_check_rejects_oversized_count_without_resources() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = bankers(home.path());
    cmd.args(["check", "--format", "text"]);

    let output = run_with_stdin(cmd, "1000000000 0\n");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input.invalid_token"));
}

#[test]
fn test_plain_output_has_no_tables() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = bankers(home.path());
    cmd.env("BANKERS_OUTPUT", "plain").args(["check", "--trace"]);

    let output = run_with_stdin(cmd, CLASSIC);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("P1 P3 P4 P0 P2"));
    assert!(stdout.contains("pass 1 P1: need 1 2 2, work 3 3 2 -> 5 3 2"));
    assert!(!stdout.contains('│'));
    assert!(!stdout.contains('\u{1b}'));
}

#[test]
fn test_tty_output_traces_in_a_table() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = bankers(home.path());
    cmd.env("BANKERS_OUTPUT", "tty").args(["check", "--trace"]);

    let output = run_with_stdin(cmd, CLASSIC);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Work before"));
    assert!(!stdout.contains("pass 1 P1:"));
}
