//! MCP server registry stored in `claude_desktop_config.json`.
//!
//! The file is a JSON object whose `mcpServers` member maps server names to
//! `{ command, args, env, disabled }`. Every operation re-reads the file,
//! changes only the server it was asked about and writes the whole file
//! back with 2-space indentation. Other top-level keys and unknown
//! per-server keys are kept. A file that is not a JSON object is an error
//! and is never overwritten.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info};

use super::errors::McpError;
use super::types::{McpServer, McpServerUpdate};

const SERVERS_KEY: &str = "mcpServers";

/// All configured servers in file order.
pub fn list_servers(path: &Path) -> Result<Vec<McpServer>, McpError> {
    let document = read_document(path)?;

    let servers = match document.get(SERVERS_KEY) {
        Some(Value::Object(servers)) => servers
            .iter()
            .map(|(name, entry)| server_from_entry(name, entry))
            .collect(),
        _ => Vec::new(),
    };

    Ok(servers)
}

/// Register a new server.
///
/// # Errors
/// Returns `McpError::DuplicateName` if a server with that name exists.
pub fn add_server(path: &Path, server: &McpServer) -> Result<(), McpError> {
    let mut document = read_document(path)?;
    let mut servers = take_servers(&mut document);

    if servers.contains_key(&server.name) {
        return Err(McpError::DuplicateName {
            name: server.name.clone(),
        });
    }

    servers.insert(server.name.clone(), Value::Object(entry_from_server(server)));
    document.insert(SERVERS_KEY.to_string(), Value::Object(servers));
    write_document(path, &document)?;

    info!(event = "core.mcp.server_added", server = %server.name);
    Ok(())
}

/// Delete a server.
///
/// # Errors
/// Returns `McpError::NotFound` if there is no server with that name.
pub fn remove_server(path: &Path, name: &str) -> Result<(), McpError> {
    let mut document = read_document(path)?;
    let mut servers = take_servers(&mut document);

    if !servers.contains_key(name) {
        return Err(not_found(name));
    }

    remove_keeping_order(&mut servers, name);
    document.insert(SERVERS_KEY.to_string(), Value::Object(servers));
    write_document(path, &document)?;

    info!(event = "core.mcp.server_removed", server = name);
    Ok(())
}

/// Change fields of an existing server, renaming it if `update.name`
/// differs from `name`.
///
/// A rename deletes the old key and inserts the new one at the end of the
/// map in the same write.
///
/// # Errors
/// Returns `McpError::NotFound` if `name` does not exist and
/// `McpError::DuplicateName` if the rename target is already taken.
pub fn update_server(path: &Path, name: &str, update: &McpServerUpdate) -> Result<(), McpError> {
    let mut document = read_document(path)?;
    let mut servers = take_servers(&mut document);

    let mut entry = match servers.get(name) {
        Some(Value::Object(entry)) => entry.clone(),
        Some(_) => Map::new(),
        None => return Err(not_found(name)),
    };
    apply_update(&mut entry, update);

    match update.name.as_deref().filter(|new_name| *new_name != name) {
        Some(new_name) => {
            if servers.contains_key(new_name) {
                return Err(McpError::DuplicateName {
                    name: new_name.to_string(),
                });
            }
            remove_keeping_order(&mut servers, name);
            servers.insert(new_name.to_string(), Value::Object(entry));
            info!(
                event = "core.mcp.server_renamed",
                from = name,
                to = new_name
            );
        }
        None => {
            servers.insert(name.to_string(), Value::Object(entry));
        }
    }

    document.insert(SERVERS_KEY.to_string(), Value::Object(servers));
    write_document(path, &document)?;
    info!(event = "core.mcp.server_updated", server = name);
    Ok(())
}

/// Enable or disable a server.
///
/// # Errors
/// Returns `McpError::NotFound` if there is no server with that name.
pub fn toggle_server(path: &Path, name: &str, enabled: bool) -> Result<(), McpError> {
    update_server(
        path,
        name,
        &McpServerUpdate {
            enabled: Some(enabled),
            ..Default::default()
        },
    )
}

fn not_found(name: &str) -> McpError {
    McpError::NotFound {
        name: name.to_string(),
    }
}

fn server_from_entry(name: &str, entry: &Value) -> McpServer {
    let command = entry
        .get("command")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let args = entry
        .get("args")
        .and_then(Value::as_array)
        .map(|args| {
            args.iter()
                .filter_map(|arg| arg.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    let env = entry.get("env").and_then(Value::as_object).cloned();

    let disabled = entry
        .get("disabled")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    McpServer {
        name: name.to_string(),
        command,
        args,
        env,
        enabled: !disabled,
    }
}

fn entry_from_server(server: &McpServer) -> Map<String, Value> {
    let mut entry = Map::new();
    entry.insert("command".to_string(), Value::from(server.command.clone()));
    entry.insert("args".to_string(), Value::from(server.args.clone()));
    if let Some(env) = &server.env {
        entry.insert("env".to_string(), Value::Object(env.clone()));
    }
    entry.insert("disabled".to_string(), Value::Bool(!server.enabled));
    entry
}

fn apply_update(entry: &mut Map<String, Value>, update: &McpServerUpdate) {
    if let Some(command) = &update.command {
        entry.insert("command".to_string(), Value::from(command.clone()));
    }
    if let Some(args) = &update.args {
        entry.insert("args".to_string(), Value::from(args.clone()));
    }
    if let Some(env) = &update.env {
        entry.insert("env".to_string(), Value::Object(env.clone()));
    }
    if let Some(enabled) = update.enabled {
        entry.insert("disabled".to_string(), Value::Bool(!enabled));
    }
}

/// Take the `mcpServers` map out of `document`. A missing or non-object
/// value yields an empty map; callers insert the result back before writing.
fn take_servers(document: &mut Map<String, Value>) -> Map<String, Value> {
    match document.get_mut(SERVERS_KEY) {
        Some(Value::Object(servers)) => std::mem::take(servers),
        _ => Map::new(),
    }
}

fn remove_keeping_order(map: &mut Map<String, Value>, key: &str) {
    *map = std::mem::take(map)
        .into_iter()
        .filter(|(k, _)| k != key)
        .collect();
}

fn read_document(path: &Path) -> Result<Map<String, Value>, McpError> {
    if !path.exists() {
        debug!(event = "core.mcp.config_missing", path = %path.display());
        return Ok(Map::new());
    }

    let raw = std::fs::read_to_string(path).map_err(|e| McpError::ReadFailed {
        path: path.display().to_string(),
        source: e,
    })?;

    let parse_failed = |message: String| McpError::ParseFailed {
        path: path.display().to_string(),
        message,
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(parse_failed(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
        Err(e) => Err(parse_failed(e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn write_document(path: &Path, document: &Map<String, Value>) -> Result<(), McpError> {
    let write_failed = |message: String| McpError::WriteFailed {
        path: path.display().to_string(),
        message,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            write_failed(format!(
                "Failed to create directory ({}): {}",
                parent.display(),
                e
            ))
        })?;
    }

    let json = serde_json::to_string_pretty(document).map_err(|e| write_failed(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| write_failed(e.to_string()))?;

    debug!(
        event = "core.mcp.config_saved",
        path = %path.display()
    );
    Ok(())
}
