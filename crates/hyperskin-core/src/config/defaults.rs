//! Default values for configuration.

use crate::wt::DEFAULT_HISTORY_SIZE;

/// Directory holding HyperSkin's own config, relative to the home directory.
pub const CONFIG_DIR_NAME: &str = ".hyperskin";

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable that replaces `~/.hyperskin` as the user config
/// directory.
pub const CONFIG_DIR_ENV: &str = "HYPERSKIN_CONFIG_DIR";

/// Returns the default history size (9001), matching Windows Terminal.
pub fn default_history_size() -> u64 {
    DEFAULT_HISTORY_SIZE
}
