//! Humanloop: pausable human-in-the-loop workflows
//!
//! A workflow runs until it needs input, publishes a question into a
//! side-channel and pauses. An outside driver writes an answer into the same
//! side-channel and resumes it. The crate follows a "pure core, imperative
//! shell" split:
//!
//! - [`core`]: pure guessing logic, attempt history, guards and phases
//! - [`effects`]: side-channel effects and the [`GuessingMachine`] workflow
//! - [`process`]: the in-process pause/resume host
//! - [`checkpoint`]: snapshots that let a paused process outlive its run
//! - [`driver`]: answer sources and the polling loop
//!
//! # Example
//!
//! ```rust
//! use humanloop::builder::MachineBuilder;
//! use humanloop::effects::read_result;
//! use humanloop::process::ProcessState;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let mut process = MachineBuilder::new().target(42).spawn().unwrap();
//! let node = process.handle();
//!
//! process.start().await.unwrap();
//! assert_eq!(node.question().as_deref(), Some("Guess a number between 1 and 100."));
//!
//! node.set_answer("42");
//! assert_eq!(process.play().await.unwrap(), ProcessState::Finished);
//! assert_eq!(read_result(&node).unwrap().message, "Found 42 in 1 attempts");
//! # });
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod driver;
pub mod effects;
pub mod logging;
pub mod process;

// Re-export commonly used types
pub use crate::builder::MachineBuilder;
pub use crate::config::WorkflowConfig;
pub use crate::core::{AttemptRecord, Feedback, GuessContext, GuessResult, Phase, State};
pub use crate::effects::GuessingMachine;
pub use crate::process::{Process, ProcessHandle, ProcessState, Workflow};
