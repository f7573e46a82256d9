use crate::errors::HyperskinError;
use crate::jsliteral::EvalError;

#[derive(Debug, thiserror::Error)]
pub enum HyperError {
    #[error("Failed to read Hyper config '{path}': {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },

    #[error("Hyper config '{path}' cannot be evaluated, refusing to overwrite it: {source}")]
    Unevaluable { path: String, source: EvalError },

    #[error("Failed to write Hyper config '{path}': {source}")]
    WriteFailed {
        path: String,
        source: std::io::Error,
    },

    #[error("Plugin \"{name}\" is not installed")]
    PluginNotInstalled { name: String },

    #[error("Invalid value for config key '{key}': {source}")]
    InvalidValue { key: String, source: EvalError },
}

impl HyperskinError for HyperError {
    fn error_code(&self) -> &'static str {
        match self {
            HyperError::ReadFailed { .. } => "HYPER_READ_FAILED",
            HyperError::Unevaluable { .. } => "HYPER_UNEVALUABLE",
            HyperError::WriteFailed { .. } => "HYPER_WRITE_FAILED",
            HyperError::PluginNotInstalled { .. } => "HYPER_PLUGIN_NOT_INSTALLED",
            HyperError::InvalidValue { .. } => "HYPER_INVALID_VALUE",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            HyperError::PluginNotInstalled { .. }
            | HyperError::InvalidValue { .. }
            | HyperError::Unevaluable { .. } => true,
            HyperError::ReadFailed { .. } | HyperError::WriteFailed { .. } => false,
        }
    }
}
