use std::path::PathBuf;

use super::types::HyperskinConfig;
use crate::errors::ConfigError;

/// Validate a merged configuration.
pub fn validate_config(config: &HyperskinConfig) -> Result<(), ConfigError> {
    if config.history.size == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "history.size must be greater than 0".to_string(),
        });
    }

    let overrides: [(&str, &Option<PathBuf>); 3] = [
        ("paths.wt_settings_path", &config.paths.wt_settings_path),
        ("paths.hyper_config_path", &config.paths.hyper_config_path),
        ("paths.claude_dir", &config.paths.claude_dir),
    ];
    for (name, path) in overrides {
        if let Some(path) = path
            && path.as_os_str().is_empty()
        {
            return Err(ConfigError::InvalidConfiguration {
                message: format!("{name} must not be empty"),
            });
        }
    }

    Ok(())
}
