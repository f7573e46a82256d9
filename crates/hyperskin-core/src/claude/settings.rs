//! Claude Code user settings (`~/.claude/settings.json`).
//!
//! The file is treated as a flat bag of values: writes merge one level deep
//! over whatever is on disk. A file that exists but is not a JSON object is
//! an error and is never overwritten.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info};

use super::errors::ClaudeError;

const AVAILABLE_MODELS: &[&str] = &[
    "claude-opus-4-6",
    "claude-sonnet-4-6",
    "claude-haiku-4-5-20251001",
];

/// Model IDs accepted by [`update_subagent_model`].
pub fn available_models() -> &'static [&'static str] {
    AVAILABLE_MODELS
}

/// Read the settings object. A missing file reads as `{}`.
///
/// # Errors
/// Returns `ClaudeError::ParseFailed` if the file is not a JSON object.
pub fn read_claude_settings(path: &Path) -> Result<Map<String, Value>, ClaudeError> {
    if !path.exists() {
        debug!(event = "core.claude.settings_missing", path = %path.display());
        return Ok(Map::new());
    }

    let raw = std::fs::read_to_string(path).map_err(|e| ClaudeError::ReadFailed {
        path: path.display().to_string(),
        source: e,
    })?;

    let parse_failed = |message: String| ClaudeError::ParseFailed {
        path: path.display().to_string(),
        message,
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(settings)) => Ok(settings),
        Ok(_) => Err(parse_failed("expected a JSON object".to_string())),
        Err(e) => Err(parse_failed(e.to_string())),
    }
}

/// Merge `settings` over the file's top-level keys and write it back.
///
/// Keys not in `settings` are kept. Nested objects are replaced, not merged.
pub fn write_claude_settings(path: &Path, settings: &Map<String, Value>) -> Result<(), ClaudeError> {
    let write_failed = |message: String| ClaudeError::WriteFailed {
        path: path.display().to_string(),
        message,
    };

    let mut merged = read_claude_settings(path)?;
    for (key, value) in settings {
        merged.insert(key.clone(), value.clone());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            write_failed(format!(
                "Failed to create directory ({}): {}",
                parent.display(),
                e
            ))
        })?;
    }

    let json = serde_json::to_string_pretty(&merged).map_err(|e| write_failed(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| write_failed(e.to_string()))?;

    info!(
        event = "core.claude.settings_written",
        path = %path.display(),
        keys = settings.len()
    );
    Ok(())
}

/// Set the `model` key used for subagents.
///
/// # Errors
/// Returns `ClaudeError::InvalidModel` for IDs not in [`available_models`].
pub fn update_subagent_model(path: &Path, model: &str) -> Result<(), ClaudeError> {
    if !AVAILABLE_MODELS.contains(&model) {
        return Err(ClaudeError::InvalidModel {
            model: model.to_string(),
            available: AVAILABLE_MODELS.join(", "),
        });
    }

    let mut update = Map::new();
    update.insert("model".to_string(), Value::from(model));
    write_claude_settings(path, &update)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::errors::HyperskinError;

    fn settings_path(dir: &TempDir) -> std::path::PathBuf {
        dir.path().join(".claude").join("settings.json")
    }

    #[test]
    fn test_missing_settings_read_empty() {
        let dir = TempDir::new().unwrap();
        assert!(read_claude_settings(&settings_path(&dir)).unwrap().is_empty());
    }

    #[test]
    fn test_write_merges_shallowly() {
        let dir = TempDir::new().unwrap();
        let path = settings_path(&dir);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"{"theme": "dark", "permissions": {"allow": ["Bash"], "deny": []}}"#,
        )
        .unwrap();

        let update = json!({"permissions": {"allow": []}, "verbose": true});
        write_claude_settings(&path, update.as_object().unwrap()).unwrap();

        let written = read_claude_settings(&path).unwrap();
        assert_eq!(written.get("theme"), Some(&json!("dark")));
        assert_eq!(written.get("permissions"), Some(&json!({"allow": []})));
        assert_eq!(written.get("verbose"), Some(&json!(true)));

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("{\n  \"theme\": \"dark\""));
    }

    #[test]
    fn test_update_subagent_model() {
        let dir = TempDir::new().unwrap();
        let path = settings_path(&dir);

        update_subagent_model(&path, "claude-sonnet-4-6").unwrap();
        assert_eq!(
            read_claude_settings(&path).unwrap().get("model"),
            Some(&json!("claude-sonnet-4-6"))
        );
    }

    #[test]
    fn test_invalid_model_rejected_without_writing() {
        let dir = TempDir::new().unwrap();
        let path = settings_path(&dir);

        let err = update_subagent_model(&path, "gpt-4").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid model: gpt-4. Available models: claude-opus-4-6, claude-sonnet-4-6, claude-haiku-4-5-20251001"
        );
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_settings_are_left_untouched() {
        let dir = TempDir::new().unwrap();
        let path = settings_path(&dir);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let corrupt = r#"{"permissions": {"allow": ["Bash"]}, "env": {"DEBUG": "1"},}"#;
        std::fs::write(&path, corrupt).unwrap();

        let err = update_subagent_model(&path, "claude-opus-4-6").unwrap_err();
        assert!(matches!(err, ClaudeError::ParseFailed { .. }));
        assert!(matches!(
            read_claude_settings(&path),
            Err(ClaudeError::ParseFailed { .. })
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), corrupt);
    }

    #[test]
    fn test_non_object_settings_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = settings_path(&dir);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[1, 2]").unwrap();

        let update = json!({"verbose": true});
        let err = write_claude_settings(&path, update.as_object().unwrap()).unwrap_err();
        assert_eq!(err.error_code(), "CLAUDE_PARSE_FAILED");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[1, 2]");
    }
}
