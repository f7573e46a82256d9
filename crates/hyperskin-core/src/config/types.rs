//! Configuration type definitions.
//!
//! # Example Configuration
//!
//! ```toml
//! [paths]
//! wt_settings_path = 'C:\Users\me\AppData\Local\Packages\Microsoft.WindowsTerminal_8wekyb3d8bbwe\LocalState\settings.json'
//! hyper_config_path = "/home/me/dotfiles/hyper.js"
//! claude_dir = "/home/me/.claude"
//!
//! [history]
//! persistent = true
//! size = 50000
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::default_history_size;

/// Configuration loaded from TOML config files.
///
/// Loaded from:
/// 1. User config: `~/.hyperskin/config.toml`
/// 2. Project config: `./.hyperskin/config.toml`
///
/// Project config values override user config values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HyperskinConfig {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub history: HistoryConfig,
}

/// Overrides for auto-detected file locations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Windows Terminal `settings.json`. Used only if the file exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wt_settings_path: Option<PathBuf>,

    /// Hyper `.hyper.js`. Used only if the file exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hyper_config_path: Option<PathBuf>,

    /// Claude Code config directory (default `~/.claude`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claude_dir: Option<PathBuf>,
}

/// Preferred terminal history settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent: Option<bool>,

    /// Scrollback lines applied when persistent history is enabled.
    /// Default: 9001.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl HistoryConfig {
    pub fn persistent(&self) -> bool {
        self.persistent.unwrap_or(false)
    }

    pub fn size(&self) -> u64 {
        self.size.unwrap_or_else(default_history_size)
    }
}
