//! Hyper terminal configuration (`~/.hyper.js`).

pub mod defaults;
pub mod errors;
pub mod persistence;
pub mod plugins;
pub mod types;

pub use defaults::DEFAULT_HYPER_CONFIG;
pub use errors::HyperError;
pub use persistence::{read_hyper_config, try_read_hyper_config, write_hyper_config};
pub use plugins::{
    apply_theme_to_hyper, get_config_value, install_plugin, list_plugins, set_config_literal,
    uninstall_plugin,
};
pub use types::HyperConfig;
