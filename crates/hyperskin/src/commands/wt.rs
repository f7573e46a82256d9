use std::path::Path;

use clap::ArgMatches;
use tracing::{error, info};

use hyperskin_core::wt::{self, DEFAULT_WT_COLOR_SCHEME, WtColorScheme};

use super::{Context, path_from_flag_or, report_failure, report_input_failure};

pub(crate) fn handle_wt_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::load();
    let path = path_from_flag_or(matches, "settings", &ctx, |p| p.wt_settings.clone())?;

    match matches.subcommand() {
        Some(("path", _)) => {
            println!("{}", path.display());
            Ok(())
        }
        Some(("show", sub)) => handle_show(&path, sub.get_flag("json")),
        Some(("profiles", sub)) => handle_profiles(&path, sub.get_flag("json")),
        Some(("schemes", sub)) => handle_schemes(&path, sub.get_flag("json")),
        Some(("add-scheme", sub)) => handle_add_scheme(&path, sub),
        Some(("remove-scheme", sub)) => {
            let name = sub
                .get_one::<String>("name")
                .ok_or("Scheme name is required")?;
            handle_remove_scheme(&path, name)
        }
        Some(("history", sub)) => {
            let enabled = !sub.get_flag("disable");
            let size = sub
                .get_one::<u64>("enable")
                .copied()
                .unwrap_or_else(|| ctx.config.history.size());
            handle_history(&path, enabled, size)
        }
        _ => {
            error!(event = "cli.wt.command_unknown");
            Err("Unknown wt command".into())
        }
    }
}

fn handle_show(path: &Path, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = wt::read_wt_config(path)
        .map_err(|e| report_failure("Failed to read settings", "cli.wt.show_failed", e))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("Settings: {}", path.display());
    for key in wt::GLOBAL_KEYS {
        if let Some(value) = config.globals.get(*key) {
            println!("   {}: {}", key, value);
        }
    }
    println!("   Profiles: {}", config.profiles.list.len());
    println!("   Schemes: {}", config.schemes.len());
    println!("   Actions: {}", config.actions.len());
    Ok(())
}

fn handle_profiles(path: &Path, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.wt.profiles_started", json_output = json_output);

    let profiles = wt::list_profiles(path)
        .map_err(|e| report_failure("Failed to list profiles", "cli.wt.profiles_failed", e))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
    } else if profiles.is_empty() {
        println!("No profiles found.");
    } else {
        let width = profiles
            .iter()
            .map(|p| p.name().len())
            .max()
            .unwrap_or(4)
            .clamp(4, 40);
        for profile in &profiles {
            let history = profile
                .history_size()
                .map_or("-".to_string(), |size| size.to_string());
            println!(
                "{:<width$}  {:<38}  history={}",
                profile.name(),
                profile.guid().unwrap_or("-"),
                history,
                width = width
            );
        }
    }

    info!(event = "cli.wt.profiles_completed", count = profiles.len());
    Ok(())
}

fn handle_schemes(path: &Path, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.wt.schemes_started", json_output = json_output);

    let schemes = wt::list_schemes(path)
        .map_err(|e| report_failure("Failed to list schemes", "cli.wt.schemes_failed", e))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&schemes)?);
    } else if schemes.is_empty() {
        println!("No color schemes found.");
    } else {
        for scheme in &schemes {
            let incomplete = if scheme.as_complete().is_some() {
                ""
            } else {
                "  [incomplete]"
            };
            println!(
                "{}  (background {}, foreground {}){}",
                scheme.name().unwrap_or("(unnamed)"),
                scheme.background().unwrap_or("-"),
                scheme.foreground().unwrap_or("-"),
                incomplete
            );
        }
    }

    info!(event = "cli.wt.schemes_completed", count = schemes.len());
    Ok(())
}

fn handle_add_scheme(path: &Path, matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let scheme = if matches.get_flag("default") {
        DEFAULT_WT_COLOR_SCHEME.clone()
    } else {
        let file = matches
            .get_one::<String>("file")
            .ok_or("Scheme file is required")?;
        read_scheme_file(Path::new(file))?
    };
    let name = scheme.name.clone();

    info!(event = "cli.wt.add_scheme_started", scheme = %name);

    match wt::add_scheme(path, scheme) {
        Ok(()) => {
            println!("✅ Color scheme '{}' added.", name);
            info!(event = "cli.wt.add_scheme_completed", scheme = %name);
            Ok(())
        }
        Err(e) => Err(report_failure(
            "Failed to add color scheme",
            "cli.wt.add_scheme_failed",
            e,
        )),
    }
}

fn read_scheme_file(file: &Path) -> Result<WtColorScheme, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(file).map_err(|e| {
        report_input_failure(
            &format!("Failed to read {}", file.display()),
            "cli.wt.scheme_file_unreadable",
            e,
        )
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        report_input_failure(
            &format!("{} is not a complete color scheme", file.display()),
            "cli.wt.scheme_file_invalid",
            e,
        )
    })
}

fn handle_remove_scheme(path: &Path, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.wt.remove_scheme_started", scheme = name);

    let existed = wt::list_schemes(path)
        .map_err(|e| report_failure("Failed to read settings", "cli.wt.remove_scheme_failed", e))?
        .iter()
        .any(|s| s.name() == Some(name));

    wt::remove_scheme(path, name).map_err(|e| {
        report_failure(
            "Failed to remove color scheme",
            "cli.wt.remove_scheme_failed",
            e,
        )
    })?;

    if existed {
        println!("✅ Color scheme '{}' removed.", name);
    } else {
        println!("Color scheme '{}' was not present.", name);
    }
    info!(
        event = "cli.wt.remove_scheme_completed",
        scheme = name,
        found = existed
    );
    Ok(())
}

fn handle_history(path: &Path, enabled: bool, size: u64) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        event = "cli.wt.history_started",
        enabled = enabled,
        history_size = size
    );

    match wt::set_persistent_history(path, enabled, size) {
        Ok(()) => {
            if enabled {
                println!("✅ Persistent history enabled (historySize = {}).", size);
            } else {
                println!(
                    "✅ Persistent history disabled (historySize = {}).",
                    wt::DEFAULT_HISTORY_SIZE
                );
            }
            info!(event = "cli.wt.history_completed");
            Ok(())
        }
        Err(e) => Err(report_failure(
            "Failed to update history settings",
            "cli.wt.history_failed",
            e,
        )),
    }
}
