//! Pure guessing logic.
//!
//! [`GuessContext`] holds everything a guessing workflow knows. It is built
//! once, before any suspension can happen, and afterwards is only changed by
//! [`GuessContext::apply_answer`]. Nothing here touches the side-channel; the
//! effectful shell in `crate::effects` publishes what this module computes.

use super::history::{AttemptHistory, AttemptRecord, Feedback};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive range the hidden target is drawn from.
///
/// A missing bound keeps its default.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetRange {
    pub low: i64,
    pub high: i64,
}

impl Default for TargetRange {
    fn default() -> Self {
        Self { low: 1, high: 100 }
    }
}

impl TargetRange {
    pub fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.low..=self.high).contains(&value)
    }

    pub fn is_empty(&self) -> bool {
        self.low > self.high
    }

    /// Draw a value uniformly from the range. The range must not be empty.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        rng.gen_range(self.low..=self.high)
    }

    /// The opening question for this range.
    pub fn prompt(&self) -> String {
        format!("Guess a number between {} and {}.", self.low, self.high)
    }
}

/// What a single answer did to the context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The answer was not an integer; nothing was charged.
    Invalid { raw: String },
    /// The guess hit the target; the context is now finished.
    Correct { guess: i64, attempts: u32 },
    /// The guess missed; the next question has been prepared.
    Miss {
        guess: i64,
        feedback: Feedback,
        attempts: u32,
    },
    /// The context no longer accepts answers.
    Closed,
}

/// Final output of a guessing workflow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResult {
    pub message: String,
    pub history: Vec<AttemptRecord>,
}

impl GuessResult {
    pub fn is_success(&self) -> bool {
        self.history
            .last()
            .is_some_and(|a| a.feedback == Feedback::Correct)
    }
}

/// Mutable state of one guessing workflow instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessContext {
    target: i64,
    attempts: u32,
    max_attempts: u32,
    history: AttemptHistory,
    last_guess: Option<i64>,
    current_question: String,
    finished: bool,
}

impl GuessContext {
    /// Set up a fresh context with a target drawn from `range`.
    pub fn new<R: Rng + ?Sized>(max_attempts: u32, range: TargetRange, rng: &mut R) -> Self {
        Self::with_target(range.sample(rng), max_attempts, range)
    }

    /// Set up a fresh context with a known target.
    pub fn with_target(target: i64, max_attempts: u32, range: TargetRange) -> Self {
        Self {
            target,
            attempts: 0,
            max_attempts,
            history: AttemptHistory::new(),
            last_guess: None,
            current_question: range.prompt(),
            finished: false,
        }
    }

    /// Loop predicate: more answers are wanted.
    pub fn not_finished(&self) -> bool {
        !self.finished && self.attempts < self.max_attempts
    }

    /// Parse `raw` as a guess and fold it into the context.
    ///
    /// Unparseable answers and answers arriving after the loop has closed
    /// leave the context untouched.
    pub fn apply_answer(&mut self, raw: &str) -> AnswerOutcome {
        if !self.not_finished() {
            return AnswerOutcome::Closed;
        }

        let Ok(guess) = raw.trim().parse::<i64>() else {
            return AnswerOutcome::Invalid {
                raw: raw.to_string(),
            };
        };

        self.attempts += 1;
        self.last_guess = Some(guess);

        let feedback = Feedback::for_guess(guess, self.target);
        self.history = self.history.record(AttemptRecord { guess, feedback });

        if feedback == Feedback::Correct {
            self.finished = true;
            return AnswerOutcome::Correct {
                guess,
                attempts: self.attempts,
            };
        }

        self.current_question = format!("My number is {feedback} than {guess}. Try again.");
        AnswerOutcome::Miss {
            guess,
            feedback,
            attempts: self.attempts,
        }
    }

    /// The result, once the loop has closed.
    pub fn result(&self) -> Option<GuessResult> {
        let message = if self.finished {
            let guess = self.last_guess?;
            format!("Found {} in {} attempts", guess, self.attempts)
        } else if self.attempts >= self.max_attempts {
            format!("Failed after {} attempts", self.attempts)
        } else {
            return None;
        };

        Some(GuessResult {
            message,
            history: self.history.entries().to_vec(),
        })
    }

    /// Text published once the target has been found.
    pub fn success_notice(&self) -> String {
        format!(
            "Correct! The number was {}. Attempts: {}. Finished!",
            self.last_guess.unwrap_or(self.target),
            self.attempts
        )
    }

    /// Text published when the budget ran out.
    pub fn stopped_notice(&self) -> String {
        format!("Stopped after {} attempts. (target hidden)", self.attempts)
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn history(&self) -> &AttemptHistory {
        &self.history
    }

    pub fn last_guess(&self) -> Option<i64> {
        self.last_guess
    }

    pub fn current_question(&self) -> &str {
        &self.current_question
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
