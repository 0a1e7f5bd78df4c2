//! Effectful workflow operations using Stillwater 0.11.0.
//!
//! This module provides the "imperative shell" around the pure core:
//! everything that reads or writes the process side-channel is an effect
//! over the [`ProcessHandle`](crate::process::ProcessHandle) environment.
//!
//! # Key Concepts
//!
//! - **Channel effects**: publish a question, consume an answer, annotate
//!   status, emit the result
//! - **Guessing machine**: composes those effects with the pure
//!   [`GuessContext`](crate::core::GuessContext) into a pausable workflow
//!
//! Following Stillwater 0.11.0 conventions, effect constructors return
//! `impl Effect` and build nothing until run.

mod channel;
mod machine;

pub use channel::{
    consume_answer, emit_result, mark_status, publish_question, read_result, RESULT_KEY,
};
pub use machine::{loop_guard, GuessingMachine};
