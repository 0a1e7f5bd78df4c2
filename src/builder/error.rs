//! Build errors for the machine builder.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a guessing machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Target {target} lies outside {low}..={high}")]
    TargetOutOfRange { target: i64, low: i64, high: i64 },
}
