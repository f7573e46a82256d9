use std::path::Path;

use tracing::{debug, info, warn};

use super::errors::HyperError;
use super::types::HyperConfig;
use crate::jsliteral::{evaluate_config_source, to_module_source};

/// Load `.hyper.js` from `path`.
///
/// Never fails. A missing file, a file without a `module.exports =`
/// assignment, an expression that cannot be evaluated, an evaluation that
/// exceeds the time limit or a non-object export all produce the complete
/// default configuration.
pub fn read_hyper_config(path: &Path) -> HyperConfig {
    match try_read_hyper_config(path) {
        Ok(config) => config,
        Err(e @ HyperError::ReadFailed { .. }) => {
            warn!(
                event = "core.hyper.read_failed",
                path = %path.display(),
                error = %e,
                "Using default Hyper config"
            );
            HyperConfig::default()
        }
        Err(e) => {
            warn!(
                event = "core.hyper.evaluation_failed",
                path = %path.display(),
                error = %e,
                "Using default Hyper config"
            );
            HyperConfig::default()
        }
    }
}

/// Load `.hyper.js` for an edit. A missing file is the default
/// configuration.
///
/// # Errors
/// Returns `HyperError::ReadFailed` if the file cannot be read and
/// `HyperError::Unevaluable` if it exists but its export cannot be
/// evaluated, so callers never write defaults over it.
pub fn try_read_hyper_config(path: &Path) -> Result<HyperConfig, HyperError> {
    if !path.exists() {
        debug!(
            event = "core.hyper.config_missing",
            path = %path.display()
        );
        return Ok(HyperConfig::default());
    }

    let source = std::fs::read_to_string(path).map_err(|e| HyperError::ReadFailed {
        path: path.display().to_string(),
        source: e,
    })?;

    let exported = evaluate_config_source(&source).map_err(|e| HyperError::Unevaluable {
        path: path.display().to_string(),
        source: e,
    })?;

    debug!(
        event = "core.hyper.read_completed",
        path = %path.display()
    );
    Ok(HyperConfig::from_overlay(&exported))
}

/// Write `config` to `path` as `module.exports = …;`.
///
/// The whole file is replaced; nothing from the previous contents survives.
pub fn write_hyper_config(config: &HyperConfig, path: &Path) -> Result<(), HyperError> {
    let source = to_module_source(&config.to_value());

    std::fs::write(path, source).map_err(|e| HyperError::WriteFailed {
        path: path.display().to_string(),
        source: e,
    })?;

    info!(
        event = "core.hyper.write_completed",
        path = %path.display(),
        plugins = config.plugins().len()
    );

    Ok(())
}
