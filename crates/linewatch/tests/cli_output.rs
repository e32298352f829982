//! Integration tests for CLI output behavior
//!
//! Every test runs the binary with `HOME` and the working directory pointed
//! at a temp dir, so no real config file is picked up.

use std::fs;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::Duration;

use tempfile::TempDir;

fn run_linewatch(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_linewatch"))
        .args(args)
        .env("HOME", dir)
        .env_remove("RUST_LOG")
        .current_dir(dir)
        .output()
        .expect("Failed to execute linewatch")
}

fn write_project_config(dir: &Path, content: &str) {
    let config_dir = dir.join(".linewatch");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), content).unwrap();
}

#[test]
fn test_config_prints_defaults_as_toml() {
    let dir = TempDir::new().unwrap();
    let output = run_linewatch(dir.path(), &["config"]);

    assert!(
        output.status.success(),
        "linewatch config failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[backend]"));
    assert!(stdout.contains(r#"url = "http://localhost:5000""#));
    assert!(stdout.contains(r#"endpoint = "/api/machine-data""#));
    assert!(stdout.contains("interval_secs = 10"));
    assert!(stdout.contains("auto_refresh = true"));
}

#[test]
fn test_default_mode_is_quiet() {
    let dir = TempDir::new().unwrap();
    let output = run_linewatch(dir.path(), &["config"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stdout.contains(r#""event":"#),
        "stdout should not contain JSON logs, got: {}",
        stdout
    );
    assert!(
        !stderr.contains(r#""level":"INFO""#),
        "Default mode should not emit INFO logs, got: {}",
        stderr
    );
}

#[test]
fn test_verbose_emits_json_logs_on_stderr() {
    let dir = TempDir::new().unwrap();
    let output = run_linewatch(dir.path(), &["-v", "config"]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("core.app.command_started"),
        "Verbose mode should log startup, got: {}",
        stderr
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains(r#""event":"#));
}

#[test]
fn test_project_config_overrides_and_token_is_redacted() {
    let dir = TempDir::new().unwrap();
    write_project_config(
        dir.path(),
        r#"
[backend]
token = "s3cret"

[refresh]
interval_secs = 30
"#,
    );

    let output = run_linewatch(dir.path(), &["config"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("interval_secs = 30"));
    assert!(stdout.contains("<redacted>"));
    assert!(!stdout.contains("s3cret"));
}

#[test]
fn test_invalid_interval_in_config_fails() {
    let dir = TempDir::new().unwrap();
    write_project_config(dir.path(), "[refresh]\ninterval_secs = 7\n");

    let output = run_linewatch(dir.path(), &["config"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid refresh interval 7s"),
        "expected interval error, got: {}",
        stderr
    );
}

#[test]
fn test_snapshot_against_unreachable_backend_fails() {
    let dir = TempDir::new().unwrap();
    let output = run_linewatch(
        dir.path(),
        &["snapshot", "--url", "http://127.0.0.1:1", "--json"],
    );

    assert!(!output.status.success());
    assert!(
        output.stdout.is_empty(),
        "nothing should be printed on failure, got: {}",
        String::from_utf8_lossy(&output.stdout)
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to reach telemetry backend"),
        "expected transport error, got: {}",
        stderr
    );
}

#[test]
fn test_watch_rejects_interval_outside_allowed_set() {
    let dir = TempDir::new().unwrap();
    let output = run_linewatch(dir.path(), &["watch", "--interval", "5"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid refresh interval 5s"));
}

#[test]
fn test_interval_flag_overrides_invalid_file_value() {
    let dir = TempDir::new().unwrap();
    write_project_config(dir.path(), "[refresh]\ninterval_secs = 7\n");

    let mut child = Command::new(env!("CARGO_BIN_EXE_linewatch"))
        .args([
            "watch",
            "--interval",
            "10",
            "--no-auto-refresh",
            "--url",
            "http://127.0.0.1:1",
        ])
        .env("HOME", dir.path())
        .env_remove("RUST_LOG")
        .current_dir(dir.path())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn linewatch watch");

    thread::sleep(Duration::from_secs(2));
    let status = child.try_wait().expect("Failed to poll linewatch watch");
    let _ = child.kill();
    let output = child.wait_with_output().expect("Failed to collect output");

    assert!(
        status.is_none(),
        "watch exited with {:?} although --interval 10 is valid; stderr: {}",
        status,
        String::from_utf8_lossy(&output.stderr)
    );
}
