//! Resolved locations of every file HyperSkin manages.
//!
//! Built once from the loaded config and the environment, then passed
//! explicitly to whatever needs a path.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use super::types::HyperskinConfig;
use crate::errors::ConfigError;
use crate::wt::discover_settings_path;

const HYPER_CONFIG_FILE: &str = ".hyper.js";
const CLAUDE_DIR_NAME: &str = ".claude";
const CLAUDE_SETTINGS_FILE: &str = "settings.json";
const MCP_CONFIG_FILE: &str = "claude_desktop_config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paths {
    pub wt_settings: PathBuf,
    pub hyper_config: PathBuf,
    pub claude_dir: PathBuf,
}

impl Paths {
    /// Resolve paths using the real home directory and `%LOCALAPPDATA%`.
    pub fn resolve(config: &HyperskinConfig) -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        let local_app_data = local_app_data_dir(&home);
        Ok(Self::from_parts(config, &home, &local_app_data))
    }

    /// Resolve paths against explicit home and local-app-data directories.
    ///
    /// Windows Terminal and Hyper overrides are honored only when the file
    /// they name exists; otherwise auto-detection applies.
    pub fn from_parts(config: &HyperskinConfig, home: &Path, local_app_data: &Path) -> Self {
        let wt_settings = existing_override(config.paths.wt_settings_path.as_deref())
            .unwrap_or_else(|| discover_settings_path(local_app_data));

        let hyper_config = existing_override(config.paths.hyper_config_path.as_deref())
            .unwrap_or_else(|| home.join(HYPER_CONFIG_FILE));

        let claude_dir = config
            .paths
            .claude_dir
            .clone()
            .unwrap_or_else(|| home.join(CLAUDE_DIR_NAME));

        let paths = Self {
            wt_settings,
            hyper_config,
            claude_dir,
        };

        debug!(
            event = "core.config.paths_resolved",
            wt_settings = %paths.wt_settings.display(),
            hyper_config = %paths.hyper_config.display(),
            claude_dir = %paths.claude_dir.display()
        );

        paths
    }

    pub fn claude_settings(&self) -> PathBuf {
        self.claude_dir.join(CLAUDE_SETTINGS_FILE)
    }

    pub fn mcp_config(&self) -> PathBuf {
        self.claude_dir.join(MCP_CONFIG_FILE)
    }
}

fn existing_override(path: Option<&Path>) -> Option<PathBuf> {
    path.filter(|p| p.exists()).map(Path::to_path_buf)
}

fn local_app_data_dir(home: &Path) -> PathBuf {
    if let Ok(dir) = std::env::var("LOCALAPPDATA")
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }
    dirs::data_local_dir().unwrap_or_else(|| home.to_path_buf())
}
