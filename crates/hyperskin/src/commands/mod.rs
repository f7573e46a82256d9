use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{error, warn};

use hyperskin_core::{ConfigError, HyperskinError};
use hyperskin_core::config::{HyperskinConfig, Paths};
use hyperskin_core::events;

mod claude;
mod completions;
mod hyper;
mod mcp;
mod wt;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let result = match matches.subcommand() {
        Some(("wt", sub_matches)) => wt::handle_wt_command(sub_matches),
        Some(("hyper", sub_matches)) => hyper::handle_hyper_command(sub_matches),
        Some(("mcp", sub_matches)) => mcp::handle_mcp_command(sub_matches),
        Some(("claude", sub_matches)) => claude::handle_claude_command(sub_matches),
        Some(("completions", sub_matches)) => {
            completions::handle_completions_command(sub_matches)
        }
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    };

    events::log_app_shutdown();
    result
}

/// Load the config hierarchy, falling back to defaults on error.
fn load_config_with_warning() -> HyperskinConfig {
    match HyperskinConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.hyperskin/config.toml and ./.hyperskin/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            HyperskinConfig::default()
        }
    }
}

/// Loaded configuration shared by a command's handlers.
struct Context {
    config: HyperskinConfig,
}

impl Context {
    fn load() -> Self {
        Self {
            config: load_config_with_warning(),
        }
    }

    fn paths(&self) -> Result<Paths, ConfigError> {
        Paths::resolve(&self.config)
    }
}

/// Path from an explicit flag, or from the resolved [`Paths`].
fn path_from_flag_or(
    matches: &ArgMatches,
    flag: &str,
    ctx: &Context,
    pick: impl FnOnce(&Paths) -> PathBuf,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = matches.get_one::<String>(flag) {
        return Ok(PathBuf::from(path));
    }
    Ok(pick(&ctx.paths()?))
}

/// Print `message` to stderr, log the failure, and hand the error back.
///
/// User errors (bad names, invalid values) log at warn.
fn report_failure<E: HyperskinError>(
    message: &str,
    event: &'static str,
    e: E,
) -> Box<dyn std::error::Error> {
    eprintln!("❌ {}: {}", message, e);
    if e.is_user_error() {
        warn!(event = event, error_code = e.error_code(), error = %e);
    } else {
        error!(event = event, error_code = e.error_code(), error = %e);
    }
    events::log_app_error(&e);
    Box::new(e)
}

/// Like [`report_failure`], for errors reading command-line input files.
fn report_input_failure<E>(message: &str, event: &'static str, e: E) -> Box<dyn std::error::Error>
where
    E: std::error::Error + Send + Sync + 'static,
{
    eprintln!("❌ {}: {}", message, e);
    warn!(event = event, error = %e);
    Box::new(e)
}
