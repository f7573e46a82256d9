use clap::{Arg, ArgAction, ArgGroup, Command};

pub fn build_cli() -> Command {
    Command::new("hyperskin")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage Windows Terminal, Hyper, MCP and Claude settings")
        .long_about("HyperSkin edits the configuration files of Windows Terminal, the Hyper terminal, the MCP server registry and Claude Code. Every edit keeps the parts of the file HyperSkin does not manage.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(wt_command())
        .subcommand(hyper_command())
        .subcommand(mcp_command())
        .subcommand(claude_command())
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .help("Shell to generate completions for")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(clap_complete::Shell)),
                ),
        )
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Output in JSON format")
        .action(ArgAction::SetTrue)
}

fn wt_command() -> Command {
    Command::new("wt")
        .about("Windows Terminal settings.json")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("settings")
                .long("settings")
                .help("Path to settings.json (overrides detection)")
                .global(true),
        )
        .subcommand(Command::new("path").about("Print the resolved settings.json path"))
        .subcommand(
            Command::new("show")
                .about("Print the parsed settings")
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("profiles")
                .about("List terminal profiles")
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("schemes")
                .about("List color schemes")
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("add-scheme")
                .about("Add or replace a color scheme")
                .arg(
                    Arg::new("file")
                        .help("JSON file holding the scheme")
                        .required_unless_present("default")
                        .index(1),
                )
                .arg(
                    Arg::new("default")
                        .long("default")
                        .help("Add the built-in HyperSkin Default scheme")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("file"),
                ),
        )
        .subcommand(
            Command::new("remove-scheme")
                .about("Remove a color scheme by name")
                .arg(
                    Arg::new("name")
                        .help("Scheme name")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("history")
                .about("Enable or disable persistent shell history")
                .arg(
                    Arg::new("enable")
                        .long("enable")
                        .help("Enable with the given history size (default: history.size from config)")
                        .value_name("SIZE")
                        .num_args(0..=1)
                        .value_parser(clap::value_parser!(u64).range(1..)),
                )
                .arg(
                    Arg::new("disable")
                        .long("disable")
                        .help("Disable and restore the default history size")
                        .action(ArgAction::SetTrue),
                )
                .group(
                    ArgGroup::new("mode")
                        .args(["enable", "disable"])
                        .required(true),
                ),
        )
}

fn hyper_command() -> Command {
    Command::new("hyper")
        .about("Hyper .hyper.js")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to .hyper.js (overrides detection)")
                .global(true),
        )
        .subcommand(Command::new("path").about("Print the resolved .hyper.js path"))
        .subcommand(
            Command::new("show")
                .about("Print the effective configuration")
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("plugins")
                .about("List installed plugins")
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("install")
                .about("Add a plugin")
                .arg(Arg::new("name").help("Plugin name").required(true).index(1)),
        )
        .subcommand(
            Command::new("uninstall")
                .about("Remove a plugin")
                .arg(Arg::new("name").help("Plugin name").required(true).index(1)),
        )
        .subcommand(
            Command::new("get")
                .about("Print one config value as a JavaScript literal")
                .arg(Arg::new("key").help("Key under config").required(true).index(1)),
        )
        .subcommand(
            Command::new("theme")
                .about("Merge a theme's config object into config")
                .arg(
                    Arg::new("file")
                        .help("JSON file holding the config overrides")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("set")
                .about("Set a config key to a JavaScript literal")
                .arg(Arg::new("key").help("Key under config").required(true).index(1))
                .arg(
                    Arg::new("value")
                        .help("Literal value, e.g. 14, '\"#fff\"', '[1, 2]'")
                        .required(true)
                        .allow_hyphen_values(true)
                        .index(2),
                ),
        )
}

fn mcp_command() -> Command {
    Command::new("mcp")
        .about("MCP server registry")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("file")
                .long("file")
                .help("Path to the registry file (overrides detection)")
                .global(true),
        )
        .subcommand(
            Command::new("list")
                .about("List registered servers")
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("add")
                .about("Register a new server")
                .arg(Arg::new("name").help("Server name").required(true).index(1))
                .arg(
                    Arg::new("command")
                        .long("command")
                        .help("Executable to launch")
                        .required(true),
                )
                .arg(
                    Arg::new("arg")
                        .long("arg")
                        .help("Argument passed to the command (repeatable)")
                        .action(ArgAction::Append)
                        .allow_hyphen_values(true),
                )
                .arg(
                    Arg::new("env")
                        .long("env")
                        .help("Environment variable as KEY=VALUE (repeatable)")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("disabled")
                        .long("disabled")
                        .help("Register the server disabled")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove a server")
                .arg(Arg::new("name").help("Server name").required(true).index(1)),
        )
        .subcommand(
            Command::new("enable")
                .about("Enable a server")
                .arg(Arg::new("name").help("Server name").required(true).index(1)),
        )
        .subcommand(
            Command::new("disable")
                .about("Disable a server")
                .arg(Arg::new("name").help("Server name").required(true).index(1)),
        )
        .subcommand(
            Command::new("update")
                .about("Change fields of an existing server")
                .arg(Arg::new("name").help("Server name").required(true).index(1))
                .arg(Arg::new("rename").long("rename").help("New server name"))
                .arg(Arg::new("command").long("command").help("New executable"))
                .arg(
                    Arg::new("arg")
                        .long("arg")
                        .help("Replacement argument list (repeatable)")
                        .action(ArgAction::Append)
                        .allow_hyphen_values(true),
                ),
        )
}

fn claude_command() -> Command {
    Command::new("claude")
        .about("Claude Code settings")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("settings")
                .long("settings")
                .help("Path to Claude settings.json (overrides detection)")
                .global(true),
        )
        .subcommand(Command::new("show").about("Print the settings file"))
        .subcommand(
            Command::new("set-model")
                .about("Set the subagent model")
                .arg(Arg::new("model").help("Model id").required(true).index(1)),
        )
        .subcommand(Command::new("models").about("List selectable models"))
        .subcommand(
            Command::new("set")
                .about("Set a top-level key to a JSON value")
                .arg(Arg::new("key").help("Top-level key").required(true).index(1))
                .arg(
                    Arg::new("value")
                        .help("JSON value, e.g. true, 3, '\"text\"', '{\"a\": 1}'")
                        .required(true)
                        .allow_hyphen_values(true)
                        .index(2),
                ),
        )
}
