//! Builder API for guessing machines.
//!
//! The builder is the one place a target gets chosen. Everything it returns
//! is fully set up, so a machine never needs to re-check whether it was
//! initialized after a resume.

pub mod error;

pub use error::BuildError;

use crate::config::WorkflowConfig;
use crate::core::{GuessContext, TargetRange};
use crate::effects::GuessingMachine;
use crate::process::Process;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Fluent builder for [`GuessingMachine`].
///
/// # Example
///
/// ```
/// use humanloop::builder::MachineBuilder;
///
/// let machine = MachineBuilder::new()
///     .max_iters(7)
///     .target(42)
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.context().max_attempts(), 7);
/// assert_eq!(machine.context().target(), 42);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MachineBuilder {
    config: WorkflowConfig,
    target: Option<i64>,
    seed: Option<u64>,
}

impl MachineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: WorkflowConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_iters(mut self, max_iters: u32) -> Self {
        self.config.max_iters = max_iters;
        self
    }

    pub fn range(mut self, range: TargetRange) -> Self {
        self.config.target_range = range;
        self
    }

    /// Force the hidden target instead of drawing it.
    pub fn target(mut self, target: i64) -> Self {
        self.target = Some(target);
        self
    }

    /// Draw the target from a seeded RNG for reproducible runs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<GuessingMachine, BuildError> {
        self.config.validate()?;
        let WorkflowConfig {
            max_iters,
            target_range: range,
        } = self.config;

        let context = match (self.target, self.seed) {
            (Some(target), _) => {
                if !range.contains(target) {
                    return Err(BuildError::TargetOutOfRange {
                        target,
                        low: range.low,
                        high: range.high,
                    });
                }
                GuessContext::with_target(target, max_iters, range)
            }
            (None, Some(seed)) => {
                GuessContext::new(max_iters, range, &mut StdRng::seed_from_u64(seed))
            }
            (None, None) => GuessContext::new(max_iters, range, &mut rand::thread_rng()),
        };

        Ok(GuessingMachine::new(context))
    }

    /// Build and wrap in a not yet started process.
    pub fn spawn(self) -> Result<Process<GuessingMachine>, BuildError> {
        Ok(Process::new(self.build()?))
    }
}
