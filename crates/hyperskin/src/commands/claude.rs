use std::path::Path;

use clap::ArgMatches;
use serde_json::{Map, Value};
use tracing::{error, info};

use hyperskin_core::claude;

use super::{Context, path_from_flag_or, report_failure, report_input_failure};

pub(crate) fn handle_claude_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(("models", _)) = matches.subcommand() {
        for model in claude::available_models() {
            println!("{}", model);
        }
        return Ok(());
    }

    let ctx = Context::load();
    let path = path_from_flag_or(matches, "settings", &ctx, |p| p.claude_settings())?;

    match matches.subcommand() {
        Some(("show", _)) => handle_show(&path),
        Some(("set-model", sub)) => {
            let model = sub.get_one::<String>("model").ok_or("Model is required")?;
            handle_set_model(&path, model)
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").ok_or("Key is required")?;
            let value = sub.get_one::<String>("value").ok_or("Value is required")?;
            handle_set(&path, key, value)
        }
        _ => {
            error!(event = "cli.claude.command_unknown");
            Err("Unknown claude command".into())
        }
    }
}

fn handle_show(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let settings = claude::read_claude_settings(path)
        .map_err(|e| report_failure("Failed to read Claude settings", "cli.claude.show_failed", e))?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

fn handle_set_model(path: &Path, model: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.claude.set_model_started", model = model);

    match claude::update_subagent_model(path, model) {
        Ok(()) => {
            println!("✅ Subagent model set to '{}'.", model);
            info!(event = "cli.claude.set_model_completed", model = model);
            Ok(())
        }
        Err(e) => Err(report_failure(
            "Failed to set model",
            "cli.claude.set_model_failed",
            e,
        )),
    }
}

fn handle_set(path: &Path, key: &str, raw: &str) -> Result<(), Box<dyn std::error::Error>> {
    let value: Value = serde_json::from_str(raw).map_err(|e| {
        report_input_failure(
            &format!("Value for '{}' is not valid JSON", key),
            "cli.claude.set_invalid_value",
            e,
        )
    })?;

    info!(event = "cli.claude.set_started", key = key);

    let mut update = Map::new();
    update.insert(key.to_string(), value);
    match claude::write_claude_settings(path, &update) {
        Ok(()) => {
            println!("✅ '{}' updated.", key);
            info!(event = "cli.claude.set_completed", key = key);
            Ok(())
        }
        Err(e) => Err(report_failure(
            "Failed to write Claude settings",
            "cli.claude.set_failed",
            e,
        )),
    }
}
