//! Configuration loading and merging logic.
//!
//! Configuration is loaded in the following order (later sources override
//! earlier ones):
//! 1. **Hardcoded defaults**
//! 2. **User config** - `~/.hyperskin/config.toml` (or `$HYPERSKIN_CONFIG_DIR/config.toml`)
//! 3. **Project config** - `./.hyperskin/config.toml`
//! 4. **CLI arguments** - explicit path flags (highest priority)

use std::path::{Path, PathBuf};

use tracing::debug;

use super::defaults::{CONFIG_DIR_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use super::types::{HistoryConfig, HyperskinConfig, PathsConfig};
use super::validation::validate_config;
use crate::errors::ConfigError;

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed,
/// or if validation fails. Missing config files are not errors.
pub fn load_hierarchy() -> Result<HyperskinConfig, ConfigError> {
    let mut config = HyperskinConfig::default();

    if let Some(user_config) = load_config_file(&user_config_dir()?.join(CONFIG_FILE_NAME))? {
        config = merge_configs(config, user_config);
    }

    let project_path = std::env::current_dir()?
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME);
    if let Some(project_config) = load_config_file(&project_path)? {
        config = merge_configs(config, project_config);
    }

    validate_config(&config)?;
    Ok(config)
}

/// The user config directory: `$HYPERSKIN_CONFIG_DIR` if set and non-empty,
/// otherwise `~/.hyperskin`.
pub fn user_config_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Ok(PathBuf::from(dir));
    }

    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR_NAME))
        .ok_or(ConfigError::HomeDirNotFound)
}

/// Load a single config file. Returns `Ok(None)` if it does not exist.
pub fn load_config_file(path: &Path) -> Result<Option<HyperskinConfig>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let config = toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    debug!(
        event = "core.config.file_loaded",
        path = %path.display()
    );
    Ok(Some(config))
}

/// Merge two configurations, with `override_config` taking precedence for
/// every value it sets.
pub fn merge_configs(base: HyperskinConfig, override_config: HyperskinConfig) -> HyperskinConfig {
    HyperskinConfig {
        paths: PathsConfig {
            wt_settings_path: override_config
                .paths
                .wt_settings_path
                .or(base.paths.wt_settings_path),
            hyper_config_path: override_config
                .paths
                .hyper_config_path
                .or(base.paths.hyper_config_path),
            claude_dir: override_config.paths.claude_dir.or(base.paths.claude_dir),
        },
        history: HistoryConfig {
            persistent: override_config
                .history
                .persistent
                .or(base.history.persistent),
            size: override_config.history.size.or(base.history.size),
        },
    }
}

/// Test utilities for the config directory override.
#[doc(hidden)]
pub mod test_helpers {
    use std::sync::Mutex;

    use super::CONFIG_DIR_ENV;

    /// Serializes tests that modify `HYPERSKIN_CONFIG_DIR`.
    pub static CONFIG_DIR_ENV_LOCK: Mutex<()> = Mutex::new(());

    /// RAII guard that removes `HYPERSKIN_CONFIG_DIR` on drop.
    pub struct ConfigDirEnvGuard;

    impl ConfigDirEnvGuard {
        pub fn new(path: &std::path::Path) -> Self {
            // SAFETY: Caller must hold CONFIG_DIR_ENV_LOCK to serialize access
            // from Rust test code.
            unsafe { std::env::set_var(CONFIG_DIR_ENV, path) };
            Self
        }
    }

    impl Drop for ConfigDirEnvGuard {
        fn drop(&mut self) {
            // SAFETY: Caller must hold CONFIG_DIR_ENV_LOCK throughout guard
            // lifetime.
            unsafe { std::env::remove_var(CONFIG_DIR_ENV) };
        }
    }
}
