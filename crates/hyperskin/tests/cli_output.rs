//! Integration tests for CLI output behavior
//!
//! The default behavior is quiet (no logs). Use -v/--verbose to enable logs.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run_hyperskin(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hyperskin"))
        .current_dir(dir)
        .env("HYPERSKIN_CONFIG_DIR", dir.join(".hyperskin"))
        .args(args)
        .output()
        .expect("Failed to execute hyperskin")
}

fn plugins_args(file: &Path) -> Vec<String> {
    vec![
        "hyper".to_string(),
        "plugins".to_string(),
        "--config".to_string(),
        file.display().to_string(),
    ]
}

/// Verify that stdout carries only user-facing output and stderr stays
/// empty by default
#[test]
fn test_default_output_is_quiet() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join(".hyper.js");
    let args = plugins_args(&file);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let output = run_hyperskin(dir.path(), &args);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stdout.contains(r#""event":"#),
        "stdout should not contain JSON logs, got: {}",
        stdout
    );
    assert!(stderr.is_empty(), "stderr should be empty, got: {}", stderr);
}

/// Verify that -v emits JSON log lines on stderr
#[test]
fn test_verbose_logs_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join(".hyper.js");
    let mut args = vec!["-v".to_string()];
    args.extend(plugins_args(&file));
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let output = run_hyperskin(dir.path(), &args);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stdout.contains(r#""event":"#));
    assert!(
        stderr.contains("core.app.startup_completed"),
        "expected startup event in stderr, got: {}",
        stderr
    );
    for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
        assert!(
            serde_json::from_str::<serde_json::Value>(line).is_ok(),
            "log line should be JSON: {}",
            line
        );
    }
}

#[test]
fn test_completions_generate_script() {
    let dir = TempDir::new().unwrap();
    let output = run_hyperskin(dir.path(), &["completions", "bash"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("hyperskin"));
}

#[test]
fn test_missing_subcommand_fails() {
    let dir = TempDir::new().unwrap();
    let output = run_hyperskin(dir.path(), &["wt"]);
    assert!(!output.status.success());
}
