use crate::errors::HyperskinError;

#[derive(Debug, thiserror::Error)]
pub enum WtError {
    #[error("Failed to read Windows Terminal settings '{path}': {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },

    #[error("Windows Terminal settings '{path}' are not valid JSON: {message}")]
    ParseFailed { path: String, message: String },

    #[error("Failed to serialize Windows Terminal settings: {message}")]
    SerializeFailed { message: String },

    #[error("Failed to write Windows Terminal settings '{path}': {source}")]
    WriteFailed {
        path: String,
        source: std::io::Error,
    },
}

impl HyperskinError for WtError {
    fn error_code(&self) -> &'static str {
        match self {
            WtError::ReadFailed { .. } => "WT_READ_FAILED",
            WtError::ParseFailed { .. } => "WT_PARSE_FAILED",
            WtError::SerializeFailed { .. } => "WT_SERIALIZE_FAILED",
            WtError::WriteFailed { .. } => "WT_WRITE_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            WtError::ParseFailed { .. } => true,

            WtError::ReadFailed { .. }
            | WtError::SerializeFailed { .. }
            | WtError::WriteFailed { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_failed_display() {
        let error = WtError::ParseFailed {
            path: "settings.json".to_string(),
            message: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Windows Terminal settings 'settings.json' are not valid JSON: expected value at line 1 column 1"
        );
        assert_eq!(error.error_code(), "WT_PARSE_FAILED");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_read_failed_is_not_user_error() {
        let error = WtError::ReadFailed {
            path: "settings.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(error.error_code(), "WT_READ_FAILED");
        assert!(!error.is_user_error());
    }
}
