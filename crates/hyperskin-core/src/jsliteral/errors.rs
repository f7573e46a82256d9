use crate::errors::HyperskinError;

/// Why a JavaScript literal could not be turned into plain data.
///
/// The Hyper reader never surfaces these to its caller (it falls back to
/// defaults), but they are logged and are useful when evaluating directly.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("No `module.exports =` assignment found")]
    NoExportAssignment,

    #[error("Syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("Unexpected end of input")]
    UnexpectedEnd,

    #[error("Unsupported expression at offset {offset}: {what}")]
    Unsupported { offset: usize, what: String },

    #[error("Literal nesting exceeds {limit} levels")]
    TooDeep { limit: usize },

    #[error("Evaluation did not finish within {millis}ms")]
    Timeout { millis: u128 },

    #[error("Evaluation worker failed: {message}")]
    WorkerFailed { message: String },

    #[error("Exported value is {kind}, expected an object")]
    NotAnObject { kind: &'static str },
}

impl HyperskinError for EvalError {
    fn error_code(&self) -> &'static str {
        match self {
            EvalError::NoExportAssignment => "EVAL_NO_EXPORT_ASSIGNMENT",
            EvalError::Syntax { .. } => "EVAL_SYNTAX_ERROR",
            EvalError::UnexpectedEnd => "EVAL_UNEXPECTED_END",
            EvalError::Unsupported { .. } => "EVAL_UNSUPPORTED_EXPRESSION",
            EvalError::TooDeep { .. } => "EVAL_TOO_DEEP",
            EvalError::Timeout { .. } => "EVAL_TIMEOUT",
            EvalError::WorkerFailed { .. } => "EVAL_WORKER_FAILED",
            EvalError::NotAnObject { .. } => "EVAL_NOT_AN_OBJECT",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            EvalError::NoExportAssignment
            | EvalError::Syntax { .. }
            | EvalError::UnexpectedEnd
            | EvalError::Unsupported { .. }
            | EvalError::TooDeep { .. }
            | EvalError::NotAnObject { .. } => true,

            EvalError::Timeout { .. } | EvalError::WorkerFailed { .. } => false,
        }
    }
}
