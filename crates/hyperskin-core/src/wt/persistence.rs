//! Reading and writing Windows Terminal `settings.json`.
//!
//! Reads go JSONC → strict JSON → untyped tree → whitelisted extraction.
//! Writes re-read the file on disk, overwrite only the owned fields in the
//! untyped tree and serialize the whole tree back with 4-space indentation.
//! Comments in the file on disk do not survive a write.

use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::errors::WtError;
use super::types::{GLOBAL_KEYS, WtConfig, WtProfile, WtProfiles, WtSchemeEntry};
use crate::jsonc;

/// Read and parse `settings.json` at `path`.
///
/// # Errors
/// I/O failures and malformed JSON (after comment stripping) are returned
/// as errors; nothing falls back to defaults.
pub fn read_wt_config(path: &Path) -> Result<WtConfig, WtError> {
    let raw = std::fs::read_to_string(path).map_err(|e| WtError::ReadFailed {
        path: path.display().to_string(),
        source: e,
    })?;

    let document = parse_document(&raw).map_err(|message| WtError::ParseFailed {
        path: path.display().to_string(),
        message,
    })?;

    let config = extract_config(&document);

    debug!(
        event = "core.wt.read_completed",
        path = %path.display(),
        profiles = config.profiles.list.len(),
        schemes = config.schemes.len()
    );

    Ok(config)
}

/// Merge the owned fields of `config` into the file at `path`.
///
/// - whitelisted globals present in `config.globals` overwrite the file's
/// - `profiles.defaults` is merged one level deep; `profiles.list` is replaced
/// - `schemes` is replaced
/// - `actions` is replaced only when `config.actions` is non-empty
///
/// A missing or unparsable file is treated as `{}`.
pub fn write_wt_config(config: &WtConfig, path: &Path) -> Result<(), WtError> {
    let existing = match std::fs::read_to_string(path) {
        Ok(raw) => parse_document(&raw).unwrap_or_else(|message| {
            warn!(
                event = "core.wt.existing_unparsable",
                path = %path.display(),
                error = %message,
                "Rewriting settings from scratch"
            );
            Value::Object(Map::new())
        }),
        Err(e) => {
            debug!(
                event = "core.wt.existing_unreadable",
                path = %path.display(),
                error = %e
            );
            Value::Object(Map::new())
        }
    };

    let document = merge_into_document(existing, config)?;
    let output = to_pretty_json(&document)?;

    std::fs::write(path, output).map_err(|e| WtError::WriteFailed {
        path: path.display().to_string(),
        source: e,
    })?;

    info!(
        event = "core.wt.write_completed",
        path = %path.display(),
        profiles = config.profiles.list.len(),
        schemes = config.schemes.len()
    );

    Ok(())
}

fn parse_document(raw: &str) -> Result<Value, String> {
    let cleaned = jsonc::strip(raw);
    serde_json::from_str(&cleaned).map_err(|e| e.to_string())
}

fn extract_config(document: &Value) -> WtConfig {
    let empty = Map::new();
    let root = document.as_object().unwrap_or(&empty);

    let globals = GLOBAL_KEYS
        .iter()
        .filter_map(|key| root.get(*key).map(|value| (key.to_string(), value.clone())))
        .collect();

    WtConfig {
        globals,
        profiles: extract_profiles(root.get("profiles")),
        schemes: extract_schemes(root.get("schemes")),
        actions: extract_actions(root),
    }
}

fn extract_profiles(profiles: Option<&Value>) -> WtProfiles {
    match profiles {
        Some(Value::Object(profiles)) => WtProfiles {
            defaults: profiles
                .get("defaults")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
            list: profile_list(profiles.get("list")),
        },
        // Older settings files store the profile list directly.
        Some(list @ Value::Array(_)) => WtProfiles {
            defaults: Map::new(),
            list: profile_list(Some(list)),
        },
        _ => WtProfiles::default(),
    }
}

fn profile_list(list: Option<&Value>) -> Vec<WtProfile> {
    let Some(Value::Array(entries)) = list else {
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry {
            Value::Object(fields) => Some(WtProfile::from_fields(fields.clone())),
            other => {
                warn!(
                    event = "core.wt.profile_skipped",
                    index = index,
                    value = %other,
                    "Profile entry is not an object"
                );
                None
            }
        })
        .collect()
}

fn extract_schemes(schemes: Option<&Value>) -> Vec<WtSchemeEntry> {
    let Some(Value::Array(entries)) = schemes else {
        return Vec::new();
    };

    entries
        .iter()
        .map(|entry| WtSchemeEntry::from_value(entry.clone()))
        .collect()
}

fn extract_actions(root: &Map<String, Value>) -> Vec<Value> {
    match (root.get("actions"), root.get("keybindings")) {
        (Some(Value::Array(actions)), _) => actions.clone(),
        (_, Some(Value::Array(legacy))) => legacy.clone(),
        _ => Vec::new(),
    }
}

fn merge_into_document(existing: Value, config: &WtConfig) -> Result<Value, WtError> {
    let mut root = match existing {
        Value::Object(root) => root,
        _ => Map::new(),
    };

    for key in GLOBAL_KEYS {
        if let Some(value) = config.globals.get(*key) {
            root.insert(key.to_string(), value.clone());
        }
    }

    let mut profiles = take_object(&mut root, "profiles");
    let mut defaults = take_object(&mut profiles, "defaults");
    for (key, value) in &config.profiles.defaults {
        defaults.insert(key.clone(), value.clone());
    }
    profiles.insert("defaults".to_string(), Value::Object(defaults));
    profiles.insert("list".to_string(), to_json(&config.profiles.list)?);
    root.insert("profiles".to_string(), Value::Object(profiles));

    root.insert("schemes".to_string(), to_json(&config.schemes)?);

    if !config.actions.is_empty() {
        root.insert("actions".to_string(), Value::Array(config.actions.clone()));
    }

    Ok(Value::Object(root))
}

/// Take the object stored under `key`, or an empty one if the value is
/// missing or not an object. Re-inserting under the same key keeps its
/// position.
fn take_object(map: &mut Map<String, Value>, key: &str) -> Map<String, Value> {
    match map.get_mut(key) {
        Some(Value::Object(object)) => std::mem::take(object),
        _ => Map::new(),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, WtError> {
    serde_json::to_value(value).map_err(|e| WtError::SerializeFailed {
        message: e.to_string(),
    })
}

fn to_pretty_json(document: &Value) -> Result<String, WtError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    document
        .serialize(&mut serializer)
        .map_err(|e| WtError::SerializeFailed {
            message: e.to_string(),
        })?;
    String::from_utf8(buf).map_err(|e| WtError::SerializeFailed {
        message: e.to_string(),
    })
}
