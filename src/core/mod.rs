//! Core workflow types and logic.
//!
//! This module contains the pure functional core:
//! - Phases via the `State` trait
//! - Guard predicates for the ask/answer loop
//! - Append-only attempt history
//! - The guessing context and its answer evaluation
//!
//! All logic in this module is pure (no side effects), following
//! the "pure core, imperative shell" philosophy.

mod game;
mod guard;
mod history;
mod state;

pub use game::{AnswerOutcome, GuessContext, GuessResult, TargetRange};
pub use guard::Guard;
pub use history::{AttemptHistory, AttemptRecord, Feedback};
pub use state::{Phase, PhaseTransition, State};
