//! Process error types.

use thiserror::Error;

/// Errors raised by the pause/resume host
#[derive(Debug, Error)]
pub enum ProcessError {
    /// `start` was called on a process that already ran
    #[error("Process {id} cannot start from state '{state}'")]
    AlreadyStarted { id: String, state: String },

    /// `play` was called on a process that is not paused
    #[error("Process {id} is not paused (state '{state}')")]
    NotPaused { id: String, state: String },

    /// An output key was written twice
    #[error("Output '{key}' already exists on process {id}")]
    OutputExists { id: String, key: String },

    /// A value could not be converted for the side-channel or outputs
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}
