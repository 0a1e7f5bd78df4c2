//! Checkpoint error types.

use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised while capturing, storing or restoring a paused process
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Written by a newer (or older) format than this build reads
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Only a paused, finished or not-yet-started process can be restored
    #[error("Process {id} was captured while running")]
    CapturedWhileRunning { id: Uuid },

    #[error("Checkpoint file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
