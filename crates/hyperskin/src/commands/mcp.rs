use std::path::Path;

use clap::ArgMatches;
use serde_json::{Map, Value};
use tracing::{error, info};

use hyperskin_core::mcp::{self, McpServer, McpServerUpdate};

use super::{Context, path_from_flag_or, report_failure};

pub(crate) fn handle_mcp_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::load();
    let path = path_from_flag_or(matches, "file", &ctx, |p| p.mcp_config())?;

    match matches.subcommand() {
        Some(("list", sub)) => handle_list(&path, sub.get_flag("json")),
        Some(("add", sub)) => handle_add(&path, sub),
        Some(("remove", sub)) => handle_remove(&path, server_name(sub)?),
        Some(("enable", sub)) => handle_toggle(&path, server_name(sub)?, true),
        Some(("disable", sub)) => handle_toggle(&path, server_name(sub)?, false),
        Some(("update", sub)) => handle_update(&path, sub),
        _ => {
            error!(event = "cli.mcp.command_unknown");
            Err("Unknown mcp command".into())
        }
    }
}

fn server_name(matches: &ArgMatches) -> Result<&str, Box<dyn std::error::Error>> {
    matches
        .get_one::<String>("name")
        .map(String::as_str)
        .ok_or_else(|| "Server name is required".into())
}

fn collect_args(matches: &ArgMatches) -> Option<Vec<String>> {
    matches
        .get_many::<String>("arg")
        .map(|values| values.cloned().collect())
}

/// Parse repeated `KEY=VALUE` pairs, keeping the order given.
fn parse_env(matches: &ArgMatches) -> Result<Option<Map<String, Value>>, String> {
    let Some(values) = matches.get_many::<String>("env") else {
        return Ok(None);
    };

    let mut env = Map::new();
    for pair in values {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(format!("Invalid --env '{}': expected KEY=VALUE", pair));
        };
        if key.is_empty() {
            return Err(format!("Invalid --env '{}': empty key", pair));
        }
        env.insert(key.to_string(), Value::from(value));
    }
    Ok(Some(env))
}

fn handle_list(path: &Path, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.mcp.list_started", json_output = json_output);

    let servers = mcp::list_servers(path)
        .map_err(|e| report_failure("Failed to list MCP servers", "cli.mcp.list_failed", e))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&servers)?);
    } else if servers.is_empty() {
        println!("No MCP servers registered.");
    } else {
        let width = servers
            .iter()
            .map(|s| s.name.len())
            .max()
            .unwrap_or(4)
            .clamp(4, 40);
        for server in &servers {
            let state = if server.enabled { "enabled" } else { "disabled" };
            let mut command = server.command.clone();
            for arg in &server.args {
                command.push(' ');
                command.push_str(arg);
            }
            println!("{:<width$}  {:<8}  {}", server.name, state, command, width = width);
        }
    }

    info!(event = "cli.mcp.list_completed", count = servers.len());
    Ok(())
}

fn handle_add(path: &Path, matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let name = server_name(matches)?;
    let command = matches
        .get_one::<String>("command")
        .ok_or("--command is required")?;

    let mut server = McpServer::new(name, command.as_str());
    server.args = collect_args(matches).unwrap_or_default();
    server.env = parse_env(matches)?;
    server.enabled = !matches.get_flag("disabled");

    info!(event = "cli.mcp.add_started", server = name);

    match mcp::add_server(path, &server) {
        Ok(()) => {
            println!("✅ MCP server '{}' added.", name);
            info!(event = "cli.mcp.add_completed", server = name);
            Ok(())
        }
        Err(e) => Err(report_failure(
            "Failed to add MCP server",
            "cli.mcp.add_failed",
            e,
        )),
    }
}

fn handle_remove(path: &Path, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.mcp.remove_started", server = name);

    match mcp::remove_server(path, name) {
        Ok(()) => {
            println!("✅ MCP server '{}' removed.", name);
            info!(event = "cli.mcp.remove_completed", server = name);
            Ok(())
        }
        Err(e) => Err(report_failure(
            "Failed to remove MCP server",
            "cli.mcp.remove_failed",
            e,
        )),
    }
}

fn handle_toggle(path: &Path, name: &str, enabled: bool) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        event = "cli.mcp.toggle_started",
        server = name,
        enabled = enabled
    );

    match mcp::toggle_server(path, name, enabled) {
        Ok(()) => {
            let state = if enabled { "enabled" } else { "disabled" };
            println!("✅ MCP server '{}' {}.", name, state);
            info!(event = "cli.mcp.toggle_completed", server = name);
            Ok(())
        }
        Err(e) => Err(report_failure(
            "Failed to update MCP server",
            "cli.mcp.toggle_failed",
            e,
        )),
    }
}

fn handle_update(path: &Path, matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let name = server_name(matches)?;
    let update = McpServerUpdate {
        name: matches.get_one::<String>("rename").cloned(),
        command: matches.get_one::<String>("command").cloned(),
        args: collect_args(matches),
        ..Default::default()
    };

    if update == McpServerUpdate::default() {
        return Err("Nothing to update: pass --rename, --command or --arg".into());
    }

    info!(event = "cli.mcp.update_started", server = name);

    match mcp::update_server(path, name, &update) {
        Ok(()) => {
            let shown = update.name.as_deref().unwrap_or(name);
            println!("✅ MCP server '{}' updated.", shown);
            info!(event = "cli.mcp.update_completed", server = shown);
            Ok(())
        }
        Err(e) => Err(report_failure(
            "Failed to update MCP server",
            "cli.mcp.update_failed",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::build_cli;

    fn add_matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["hyperskin", "mcp", "add", "files", "--command", "npx"];
        argv.extend_from_slice(args);
        let matches = build_cli().try_get_matches_from(argv).unwrap();
        matches
            .subcommand_matches("mcp")
            .and_then(|m| m.subcommand_matches("add"))
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_parse_env_pairs() {
        let matches = add_matches(&["--env", "TOKEN=abc", "--env", "URL=http://x?a=b"]);
        let env = parse_env(&matches).unwrap().unwrap();
        assert_eq!(env.get("TOKEN").and_then(Value::as_str), Some("abc"));
        assert_eq!(env.get("URL").and_then(Value::as_str), Some("http://x?a=b"));
    }

    #[test]
    fn test_parse_env_keeps_order() {
        let matches = add_matches(&["--env", "B=1", "--env", "A=2"]);
        let env = parse_env(&matches).unwrap().unwrap();
        assert_eq!(env.keys().collect::<Vec<_>>(), vec!["B", "A"]);
    }

    #[test]
    fn test_parse_env_absent_is_none() {
        let matches = add_matches(&[]);
        assert_eq!(parse_env(&matches).unwrap(), None);
    }

    #[test]
    fn test_parse_env_rejects_missing_separator() {
        let matches = add_matches(&["--env", "TOKEN"]);
        assert!(parse_env(&matches).is_err());

        let matches = add_matches(&["--env", "=value"]);
        assert!(parse_env(&matches).is_err());
    }
}
