//! Bounded evaluation of `module.exports = <literal>` config sources.

use std::sync::LazyLock;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use regex::Regex;
use tracing::{debug, warn};

use super::errors::EvalError;
use super::parser::parse_expression;
use super::value::Value;

/// Wall-clock limit for a single evaluation.
pub const EVALUATION_TIMEOUT: Duration = Duration::from_secs(2);

/// Stack size for the evaluation worker. The parser is recursive and
/// `MAX_DEPTH` levels of nesting need more than the default thread stack.
const WORKER_STACK_SIZE: usize = 8 * 1024 * 1024;

static EXPORT_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"module\.exports\s*=\s*").expect("export pattern is valid")
});

/// Return the text following the first `module.exports =` assignment.
///
/// Comparisons such as `module.exports === x` are skipped.
pub fn extract_export_expression(source: &str) -> Option<&str> {
    EXPORT_ASSIGNMENT
        .find_iter(source)
        .map(|m| &source[m.end()..])
        .find(|rest| !rest.starts_with('='))
}

/// Evaluate a CommonJS config source and return its exported object.
///
/// Uses [`EVALUATION_TIMEOUT`].
pub fn evaluate_config_source(source: &str) -> Result<Value, EvalError> {
    evaluate_source(source, EVALUATION_TIMEOUT)
}

/// Evaluate a CommonJS config source with an explicit time limit.
///
/// The exported expression is parsed on a worker thread; if it has not
/// finished within `timeout` the call fails with [`EvalError::Timeout`] and
/// the worker is abandoned.
pub fn evaluate_source(source: &str, timeout: Duration) -> Result<Value, EvalError> {
    let expression = extract_export_expression(source)
        .ok_or(EvalError::NoExportAssignment)?
        .to_string();

    debug!(
        event = "core.jsliteral.evaluate_started",
        source_len = source.len(),
        timeout_ms = timeout.as_millis()
    );

    let value = run_with_timeout(move || parse_expression(&expression), timeout)??;

    if !value.is_object() {
        return Err(EvalError::NotAnObject { kind: value.kind() });
    }

    debug!(event = "core.jsliteral.evaluate_completed");
    Ok(value)
}

/// Run `work` on a dedicated thread, waiting at most `timeout` for it.
pub(crate) fn run_with_timeout<T, F>(work: F, timeout: Duration) -> Result<T, EvalError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();

    thread::Builder::new()
        .name("hyperskin-eval".to_string())
        .stack_size(WORKER_STACK_SIZE)
        .spawn(move || {
            // Receiver may be gone after a timeout.
            let _ = tx.send(work());
        })
        .map_err(|e| EvalError::WorkerFailed {
            message: e.to_string(),
        })?;

    match rx.recv_timeout(timeout) {
        Ok(result) => Ok(result),
        Err(mpsc::RecvTimeoutError::Timeout) => {
            warn!(
                event = "core.jsliteral.evaluate_timed_out",
                timeout_ms = timeout.as_millis()
            );
            Err(EvalError::Timeout {
                millis: timeout.as_millis(),
            })
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(EvalError::WorkerFailed {
            message: "evaluation worker panicked".to_string(),
        }),
    }
}
