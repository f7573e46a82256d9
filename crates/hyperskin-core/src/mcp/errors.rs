use crate::errors::HyperskinError;

#[derive(Debug, thiserror::Error)]
pub enum McpError {
    #[error("MCP server \"{name}\" already exists")]
    DuplicateName { name: String },

    #[error("MCP server \"{name}\" not found")]
    NotFound { name: String },

    #[error("Failed to read MCP config '{path}': {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },

    #[error("MCP config '{path}' is not a valid JSON object: {message}")]
    ParseFailed { path: String, message: String },

    #[error("Failed to write MCP config '{path}': {message}")]
    WriteFailed { path: String, message: String },
}

impl HyperskinError for McpError {
    fn error_code(&self) -> &'static str {
        match self {
            McpError::DuplicateName { .. } => "MCP_SERVER_ALREADY_EXISTS",
            McpError::NotFound { .. } => "MCP_SERVER_NOT_FOUND",
            McpError::ReadFailed { .. } => "MCP_READ_FAILED",
            McpError::ParseFailed { .. } => "MCP_PARSE_FAILED",
            McpError::WriteFailed { .. } => "MCP_WRITE_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            McpError::DuplicateName { .. }
            | McpError::NotFound { .. }
            | McpError::ParseFailed { .. } => true,
            McpError::ReadFailed { .. } | McpError::WriteFailed { .. } => false,
        }
    }
}
