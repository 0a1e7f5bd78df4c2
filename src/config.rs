//! Workflow configuration.
//!
//! ```toml
//! max_iters = 10
//!
//! [target_range]
//! low = 1
//! high = 100
//! ```

use crate::core::TargetRange;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Attempt budget used when none is configured.
pub const DEFAULT_MAX_ITERS: u32 = 20;

/// Errors from loading or validating a [`WorkflowConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("max_iters must be positive")]
    InvalidMaxIters,

    #[error("Target range {low}..={high} is empty")]
    EmptyRange { low: i64, high: i64 },
}

/// Construction parameters of a guessing workflow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkflowConfig {
    /// Cap on charged attempts
    pub max_iters: u32,
    pub target_range: TargetRange,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            max_iters: DEFAULT_MAX_ITERS,
            target_range: TargetRange::default(),
        }
    }
}

impl WorkflowConfig {
    pub fn with_max_iters(mut self, max_iters: u32) -> Self {
        self.max_iters = max_iters;
        self
    }

    pub fn with_target_range(mut self, range: TargetRange) -> Self {
        self.target_range = range;
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iters == 0 {
            return Err(ConfigError::InvalidMaxIters);
        }
        if self.target_range.is_empty() {
            return Err(ConfigError::EmptyRange {
                low: self.target_range.low,
                high: self.target_range.high,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = WorkflowConfig::default();
        assert_eq!(config.max_iters, 20);
        assert_eq!(config.target_range, TargetRange::new(1, 100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = WorkflowConfig::from_toml_str("max_iters = 10").unwrap();
        assert_eq!(config.max_iters, 10);
        assert_eq!(config.target_range, TargetRange::default());
    }

    #[test]
    fn full_toml_parses() {
        let config = WorkflowConfig::from_toml_str(
            "max_iters = 5\n\n[target_range]\nlow = 10\nhigh = 20\n",
        )
        .unwrap();
        assert_eq!(config.max_iters, 5);
        assert_eq!(config.target_range, TargetRange::new(10, 20));
    }

    #[test]
    fn partial_range_table_keeps_other_bound() {
        let config = WorkflowConfig::from_toml_str("[target_range]\nlow = 5\n").unwrap();
        assert_eq!(config.target_range, TargetRange::new(5, 100));

        let config = WorkflowConfig::from_toml_str("[target_range]\nhigh = 50\n").unwrap();
        assert_eq!(config.target_range, TargetRange::new(1, 50));
    }

    #[test]
    fn zero_budget_rejected() {
        let err = WorkflowConfig::from_toml_str("max_iters = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMaxIters));
    }

    #[test]
    fn empty_range_rejected() {
        let config = WorkflowConfig::default().with_target_range(TargetRange::new(5, 4));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyRange { low: 5, high: 4 })
        ));
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = WorkflowConfig::from_toml_str("max_tries = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = WorkflowConfig::from_file("/nonexistent/humanloop.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/humanloop.toml"));
    }
}
