//! Integration tests for the `hyper` subcommands.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const HYPER_JS: &str = "// my hyper config\nmodule.exports = {\n  config: { fontSize: 12, shell: '' },\n  plugins: ['hypercwd'],\n  localPlugins: [],\n};\n";

fn setup() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = dir.path().join(".hyper.js");
    std::fs::write(&config, HYPER_JS).expect("Failed to write .hyper.js");
    (dir, config)
}

fn run_hyper(dir: &Path, config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hyperskin"))
        .current_dir(dir)
        .env("HYPERSKIN_CONFIG_DIR", dir.join(".hyperskin"))
        .arg("hyper")
        .args(args)
        .arg("--config")
        .arg(config)
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

fn plugins(dir: &Path, config: &Path) -> Vec<String> {
    let output = run_hyper(dir, config, &["plugins", "--json"]);
    assert_success(&output);
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    json["plugins"]
        .as_array()
        .expect("plugins should be an array")
        .iter()
        .filter_map(|p| p.as_str().map(String::from))
        .collect()
}

#[test]
fn test_install_and_uninstall_plugin() {
    let (dir, config) = setup();

    assert_success(&run_hyper(dir.path(), &config, &["install", "hyper-snazzy"]));
    assert_eq!(plugins(dir.path(), &config), vec!["hypercwd", "hyper-snazzy"]);

    // Installing again is a no-op
    let output = run_hyper(dir.path(), &config, &["install", "hyper-snazzy"]);
    assert_success(&output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("already installed"));
    assert_eq!(plugins(dir.path(), &config), vec!["hypercwd", "hyper-snazzy"]);

    assert_success(&run_hyper(dir.path(), &config, &["uninstall", "hypercwd"]));
    assert_eq!(plugins(dir.path(), &config), vec!["hyper-snazzy"]);
}

#[test]
fn test_uninstall_missing_plugin_fails() {
    let (dir, config) = setup();
    let output = run_hyper(dir.path(), &config, &["uninstall", "nope"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Plugin \"nope\" is not installed"),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn test_set_then_get_literal() {
    let (dir, config) = setup();

    assert_success(&run_hyper(dir.path(), &config, &["set", "fontSize", "16"]));
    assert_success(&run_hyper(
        dir.path(),
        &config,
        &["set", "cursorShape", "'BEAM'"],
    ));

    let output = run_hyper(dir.path(), &config, &["get", "fontSize"]);
    assert_success(&output);
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "16");

    let output = run_hyper(dir.path(), &config, &["get", "cursorShape"]);
    assert_success(&output);
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "'BEAM'");

    let source = std::fs::read_to_string(&config).unwrap();
    assert!(source.starts_with("module.exports = "));
    assert!(source.ends_with(";\n"));
}

#[test]
fn test_set_rejects_non_literal() {
    let (dir, config) = setup();
    let output = run_hyper(
        dir.path(),
        &config,
        &["set", "shell", "require('child_process')"],
    );

    assert!(!output.status.success());
    assert_eq!(std::fs::read_to_string(&config).unwrap(), HYPER_JS);
}

#[test]
fn test_theme_merges_into_config() {
    let (dir, config) = setup();
    let theme = dir.path().join("theme.json");
    std::fs::write(
        &theme,
        r##"{ "backgroundColor": "#101010", "fontSize": 14 }"##,
    )
    .unwrap();

    assert_success(&run_hyper(
        dir.path(),
        &config,
        &["theme", theme.to_str().unwrap()],
    ));

    let output = run_hyper(dir.path(), &config, &["show", "--json"]);
    assert_success(&output);
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    assert_eq!(json["config"]["backgroundColor"], "#101010");
    assert_eq!(json["config"]["fontSize"], 14);
    assert_eq!(json["plugins"], serde_json::json!(["hypercwd"]));
}

#[test]
fn test_show_on_missing_file_prints_defaults() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("missing.js");

    let output = run_hyper(dir.path(), &config, &["show"]);
    assert_success(&output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("module.exports = {"));
    assert!(stdout.contains("fontSize"));
    assert!(!config.exists(), "show must not create the file");
}

#[test]
fn test_install_refuses_to_overwrite_unevaluable_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join(".hyper.js");
    let source = "module.exports = {\n  config: { shell: process.platform === 'win32' ? 'powershell.exe' : '' },\n};\n";
    std::fs::write(&config, source).unwrap();

    let output = run_hyper(dir.path(), &config, &["install", "hyper-snazzy"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("refusing to overwrite"), "unexpected stderr: {}", stderr);
    assert_eq!(std::fs::read_to_string(&config).unwrap(), source);

    // Display commands still fall back to defaults
    let output = run_hyper(dir.path(), &config, &["show"]);
    assert_success(&output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("fontSize"));
}
