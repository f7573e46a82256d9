//! Integration tests for the `mcp` subcommands.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn setup() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    // Parent directory does not exist yet; the first write creates it
    let file = dir.path().join(".claude").join("claude_desktop_config.json");
    (dir, file)
}

fn run_mcp(dir: &Path, file: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hyperskin"))
        .current_dir(dir)
        .env("HYPERSKIN_CONFIG_DIR", dir.join(".hyperskin"))
        .arg("mcp")
        .args(args)
        .arg("--file")
        .arg(file)
        .output()
        .expect("Failed to execute hyperskin")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "hyperskin failed with exit code {:?}. stderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn list_json(dir: &Path, file: &Path) -> serde_json::Value {
    let output = run_mcp(dir, file, &["list", "--json"]);
    assert_success(&output);
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}

#[test]
fn test_list_on_missing_file_is_empty_array() {
    let (dir, file) = setup();
    let output = run_mcp(dir.path(), &file, &["list", "--json"]);
    assert_success(&output);
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "[]");
}

#[test]
fn test_add_list_toggle_remove() {
    let (dir, file) = setup();

    assert_success(&run_mcp(
        dir.path(),
        &file,
        &[
            "add", "filesystem", "--command", "npx", "--arg", "-y", "--arg", "server-fs",
            "--env", "ROOT=/tmp",
        ],
    ));
    assert_success(&run_mcp(
        dir.path(),
        &file,
        &["add", "memory", "--command", "node", "--disabled"],
    ));

    let servers = list_json(dir.path(), &file);
    assert_eq!(servers[0]["name"], "filesystem");
    assert_eq!(servers[0]["args"], serde_json::json!(["-y", "server-fs"]));
    assert_eq!(servers[0]["env"]["ROOT"], "/tmp");
    assert_eq!(servers[0]["enabled"], true);
    assert_eq!(servers[1]["name"], "memory");
    assert_eq!(servers[1]["enabled"], false);

    // On disk `enabled` is stored inverted
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(raw["mcpServers"]["memory"]["disabled"], true);

    assert_success(&run_mcp(dir.path(), &file, &["enable", "memory"]));
    assert_eq!(list_json(dir.path(), &file)[1]["enabled"], true);

    assert_success(&run_mcp(dir.path(), &file, &["remove", "filesystem"]));
    let servers = list_json(dir.path(), &file);
    assert_eq!(servers.as_array().unwrap().len(), 1);
    assert_eq!(servers[0]["name"], "memory");
}

#[test]
fn test_duplicate_add_fails() {
    let (dir, file) = setup();
    assert_success(&run_mcp(dir.path(), &file, &["add", "a", "--command", "x"]));

    let output = run_mcp(dir.path(), &file, &["add", "a", "--command", "y"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("MCP server \"a\" already exists"));
}

#[test]
fn test_remove_unknown_fails() {
    let (dir, file) = setup();
    let output = run_mcp(dir.path(), &file, &["remove", "ghost"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("MCP server \"ghost\" not found"));
}

#[test]
fn test_update_rename_keeps_other_servers_and_unknown_keys() {
    let (dir, file) = setup();
    std::fs::create_dir_all(file.parent().unwrap()).unwrap();
    std::fs::write(
        &file,
        r#"{
  "globalShortcut": "Ctrl+Space",
  "mcpServers": {
    "old": { "command": "a", "args": [], "cwd": "/srv" },
    "other": { "command": "b" }
  }
}"#,
    )
    .unwrap();

    assert_success(&run_mcp(
        dir.path(),
        &file,
        &["update", "old", "--rename", "new", "--command", "c"],
    ));

    let servers = list_json(dir.path(), &file);
    let names: Vec<&str> = servers
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["name"].as_str())
        .collect();
    assert_eq!(names, vec!["other", "new"]);
    assert_eq!(servers[1]["command"], "c");

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(raw["globalShortcut"], "Ctrl+Space");
    assert_eq!(raw["mcpServers"]["new"]["cwd"], "/srv");
    assert!(raw["mcpServers"].get("old").is_none());
}

#[test]
fn test_update_without_changes_is_rejected() {
    let (dir, file) = setup();
    assert_success(&run_mcp(dir.path(), &file, &["add", "a", "--command", "x"]));

    let output = run_mcp(dir.path(), &file, &["update", "a"]);
    assert!(!output.status.success());
}

#[test]
fn test_add_to_corrupt_file_fails_without_writing() {
    let (dir, file) = setup();
    std::fs::create_dir_all(file.parent().unwrap()).unwrap();
    let corrupt = r#"{"globalShortcut": "Ctrl+Space", "mcpServers": {"github": {"command": "gh"},}}"#;
    std::fs::write(&file, corrupt).unwrap();

    let output = run_mcp(dir.path(), &file, &["add", "new", "--command", "cmd"]);
    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("not a valid JSON object"),
        "unexpected stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(std::fs::read_to_string(&file).unwrap(), corrupt);
}

#[test]
fn test_env_is_written_in_given_order() {
    let (dir, file) = setup();
    assert_success(&run_mcp(
        dir.path(),
        &file,
        &["add", "svc", "--command", "run", "--env", "B=1", "--env", "A=2"],
    ));

    let raw = std::fs::read_to_string(&file).unwrap();
    assert!(raw.find("\"B\"").unwrap() < raw.find("\"A\"").unwrap());
}
