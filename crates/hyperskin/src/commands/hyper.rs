use std::path::Path;

use clap::ArgMatches;
use tracing::{error, info};

use hyperskin_core::hyper::{self, HyperError};
use hyperskin_core::jsliteral::{self, Object, Value};

use super::{Context, path_from_flag_or, report_failure, report_input_failure};

pub(crate) fn handle_hyper_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::load();
    let path = path_from_flag_or(matches, "config", &ctx, |p| p.hyper_config.clone())?;

    match matches.subcommand() {
        Some(("path", _)) => {
            println!("{}", path.display());
            Ok(())
        }
        Some(("show", sub)) => handle_show(&path, sub.get_flag("json")),
        Some(("plugins", sub)) => handle_plugins(&path, sub.get_flag("json")),
        Some(("install", sub)) => handle_install(&path, required(sub, "name")?),
        Some(("uninstall", sub)) => handle_uninstall(&path, required(sub, "name")?),
        Some(("get", sub)) => handle_get(&path, required(sub, "key")?),
        Some(("theme", sub)) => handle_theme(&path, Path::new(required(sub, "file")?)),
        Some(("set", sub)) => handle_set(&path, required(sub, "key")?, required(sub, "value")?),
        _ => {
            error!(event = "cli.hyper.command_unknown");
            Err("Unknown hyper command".into())
        }
    }
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a str, Box<dyn std::error::Error>> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| format!("Argument '{}' is required", id).into())
}

fn handle_show(path: &Path, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = hyper::read_hyper_config(path);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", jsliteral::to_module_source(&config.to_value()));
    }
    Ok(())
}

fn handle_plugins(path: &Path, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = hyper::read_hyper_config(path);
    let plugins = config.plugins();
    let local_plugins = config.local_plugins();

    if json_output {
        let output = serde_json::json!({
            "plugins": plugins,
            "localPlugins": local_plugins,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if plugins.is_empty() && local_plugins.is_empty() {
        println!("No plugins installed.");
        return Ok(());
    }
    for plugin in &plugins {
        println!("{}", plugin);
    }
    for plugin in &local_plugins {
        println!("{} (local)", plugin);
    }
    Ok(())
}

fn handle_install(path: &Path, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.hyper.install_started", plugin = name);

    let already = hyper::list_plugins(path).iter().any(|p| p == name);
    hyper::install_plugin(path, name)
        .map_err(|e| report_failure("Failed to install plugin", "cli.hyper.install_failed", e))?;

    if already {
        println!("Plugin '{}' is already installed.", name);
    } else {
        println!("✅ Plugin '{}' installed.", name);
    }
    info!(event = "cli.hyper.install_completed", plugin = name);
    Ok(())
}

fn handle_uninstall(path: &Path, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.hyper.uninstall_started", plugin = name);

    match hyper::uninstall_plugin(path, name) {
        Ok(()) => {
            println!("✅ Plugin '{}' uninstalled.", name);
            info!(event = "cli.hyper.uninstall_completed", plugin = name);
            Ok(())
        }
        Err(e) => Err(report_failure(
            "Failed to uninstall plugin",
            "cli.hyper.uninstall_failed",
            e,
        )),
    }
}

fn handle_get(path: &Path, key: &str) -> Result<(), Box<dyn std::error::Error>> {
    match hyper::get_config_value(path, key) {
        Some(value) => {
            println!("{}", jsliteral::serialize(&value));
            Ok(())
        }
        None => Err(format!("config.{} is not set", key).into()),
    }
}

fn handle_theme(path: &Path, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.hyper.theme_started", file = %file.display());

    let overrides = read_theme_file(file)?;
    hyper::apply_theme_to_hyper(path, &overrides)
        .map_err(|e| report_failure("Failed to apply theme", "cli.hyper.theme_failed", e))?;

    println!("✅ Applied {} setting(s) to {}.", overrides.len(), path.display());
    info!(event = "cli.hyper.theme_completed", keys = overrides.len());
    Ok(())
}

fn read_theme_file(file: &Path) -> Result<Object, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(file).map_err(|e| {
        report_input_failure(
            &format!("Failed to read {}", file.display()),
            "cli.hyper.theme_file_unreadable",
            e,
        )
    })?;
    let json: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
        report_input_failure(
            &format!("{} is not valid JSON", file.display()),
            "cli.hyper.theme_file_invalid",
            e,
        )
    })?;

    match Value::from(json) {
        Value::Object(object) => Ok(object),
        other => Err(format!(
            "{} must hold a JSON object, found {}",
            file.display(),
            other.kind()
        )
        .into()),
    }
}

fn handle_set(path: &Path, key: &str, literal: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.hyper.set_started", key = key);

    match hyper::set_config_literal(path, key, literal) {
        Ok(()) => {
            println!("✅ config.{} updated.", key);
            info!(event = "cli.hyper.set_completed", key = key);
            Ok(())
        }
        Err(e @ HyperError::InvalidValue { .. }) => {
            eprintln!("Hint: strings need quotes, e.g. '\"BEAM\"'.");
            Err(report_failure("Invalid value", "cli.hyper.set_failed", e))
        }
        Err(e) => Err(report_failure(
            "Failed to update config",
            "cli.hyper.set_failed",
            e,
        )),
    }
}
