//! Side-channel effects.
//!
//! Each constructor returns a fresh effect over the [`ProcessHandle`]
//! environment; nothing touches the node until the effect is run.

use crate::core::GuessResult;
use crate::process::{ProcessError, ProcessHandle, QUESTION_KEY};
use stillwater::effect::Effect;
use stillwater::prelude::*;

/// Output key the result is stored under.
pub const RESULT_KEY: &str = "result";

/// Make `question` visible to the driver.
pub fn publish_question(
    question: String,
) -> impl Effect<Output = (), Error = ProcessError, Env = ProcessHandle> {
    from_fn(move |node: &ProcessHandle| {
        node.set_extra(QUESTION_KEY, question.clone());
        Ok::<_, ProcessError>(())
    })
}

/// Read the pending answer and clear it in the same step.
pub fn consume_answer(
) -> impl Effect<Output = Option<String>, Error = ProcessError, Env = ProcessHandle> {
    from_fn(|node: &ProcessHandle| Ok::<_, ProcessError>(node.take_answer()))
}

/// Annotate the node's status. Observational only.
pub fn mark_status(
    status: &'static str,
) -> impl Effect<Output = (), Error = ProcessError, Env = ProcessHandle> {
    from_fn(move |node: &ProcessHandle| {
        node.set_status(Some(status.to_string()));
        Ok::<_, ProcessError>(())
    })
}

/// Store the result as the `result` output. Fails if one already exists.
pub fn emit_result(
    result: GuessResult,
) -> impl Effect<Output = (), Error = ProcessError, Env = ProcessHandle> {
    from_fn(move |node: &ProcessHandle| {
        let value = serde_json::to_value(&result).map_err(|e| ProcessError::InvalidValue {
            key: RESULT_KEY.to_string(),
            reason: e.to_string(),
        })?;
        tracing::info!(process = %node.id(), message = %result.message, "Result emitted");
        node.set_output(RESULT_KEY, value)
    })
}

/// Read back the result of a finished guessing process.
pub fn read_result(node: &ProcessHandle) -> Option<GuessResult> {
    let value = node.output(RESULT_KEY)?;
    serde_json::from_value(value).ok()
}
