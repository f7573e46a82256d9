use crate::errors::HyperskinError;

#[derive(Debug, thiserror::Error)]
pub enum ClaudeError {
    #[error("Invalid model: {model}. Available models: {available}")]
    InvalidModel { model: String, available: String },

    #[error("Failed to read Claude settings '{path}': {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },

    #[error("Claude settings '{path}' are not a valid JSON object: {message}")]
    ParseFailed { path: String, message: String },

    #[error("Failed to write Claude settings '{path}': {message}")]
    WriteFailed { path: String, message: String },
}

impl HyperskinError for ClaudeError {
    fn error_code(&self) -> &'static str {
        match self {
            ClaudeError::InvalidModel { .. } => "CLAUDE_INVALID_MODEL",
            ClaudeError::ReadFailed { .. } => "CLAUDE_READ_FAILED",
            ClaudeError::ParseFailed { .. } => "CLAUDE_PARSE_FAILED",
            ClaudeError::WriteFailed { .. } => "CLAUDE_WRITE_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            ClaudeError::InvalidModel { .. } | ClaudeError::ParseFailed { .. } => true,
            ClaudeError::ReadFailed { .. } | ClaudeError::WriteFailed { .. } => false,
        }
    }
}
