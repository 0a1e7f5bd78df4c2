//! Attempt history tracking.
//!
//! Every parsed guess is recorded together with the feedback it earned. The
//! history is append-only: `record` returns a new history with the attempt
//! added and never rewrites earlier entries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Feedback given for a single guess.
///
/// Serialized as the lowercase words `"correct"`, `"higher"` and `"lower"`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Correct,
    /// The hidden number is higher than the guess
    Higher,
    /// The hidden number is lower than the guess
    Lower,
}

impl Feedback {
    /// Compare a guess against the target.
    pub fn for_guess(guess: i64, target: i64) -> Self {
        use std::cmp::Ordering;

        match guess.cmp(&target) {
            Ordering::Equal => Self::Correct,
            Ordering::Less => Self::Higher,
            Ordering::Greater => Self::Lower,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Higher => "higher",
            Self::Lower => "lower",
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One charged attempt.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub guess: i64,
    pub feedback: Feedback,
}

/// Ordered, append-only history of attempts.
///
/// # Example
///
/// ```rust
/// use humanloop::core::{AttemptHistory, AttemptRecord, Feedback};
///
/// let history = AttemptHistory::new()
///     .record(AttemptRecord { guess: 10, feedback: Feedback::Higher })
///     .record(AttemptRecord { guess: 40, feedback: Feedback::Correct });
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.guesses(), vec![10, 40]);
/// assert!(history.ends_correct());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttemptHistory {
    attempts: Vec<AttemptRecord>,
}

impl AttemptHistory {
    pub fn new() -> Self {
        Self {
            attempts: Vec::new(),
        }
    }

    /// Record an attempt, returning a new history.
    ///
    /// The receiver is left untouched.
    pub fn record(&self, attempt: AttemptRecord) -> Self {
        let mut attempts = self.attempts.clone();
        attempts.push(attempt);
        Self { attempts }
    }

    /// All attempts in the order they were made.
    pub fn entries(&self) -> &[AttemptRecord] {
        &self.attempts
    }

    pub fn last(&self) -> Option<&AttemptRecord> {
        self.attempts.last()
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// The guesses alone, in order.
    pub fn guesses(&self) -> Vec<i64> {
        self.attempts.iter().map(|a| a.guess).collect()
    }

    /// Whether the most recent attempt was correct.
    pub fn ends_correct(&self) -> bool {
        matches!(
            self.last(),
            Some(AttemptRecord {
                feedback: Feedback::Correct,
                ..
            })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(guess: i64, feedback: Feedback) -> AttemptRecord {
        AttemptRecord { guess, feedback }
    }

    #[test]
    fn new_history_is_empty() {
        let history = AttemptHistory::new();
        assert!(history.is_empty());
        assert!(history.last().is_none());
        assert!(!history.ends_correct());
    }

    #[test]
    fn record_is_immutable() {
        let history = AttemptHistory::new();
        let next = history.record(attempt(5, Feedback::Higher));

        assert_eq!(history.len(), 0);
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn record_preserves_order() {
        let history = AttemptHistory::new()
            .record(attempt(50, Feedback::Lower))
            .record(attempt(25, Feedback::Higher))
            .record(attempt(37, Feedback::Correct));

        assert_eq!(history.guesses(), vec![50, 25, 37]);
        assert_eq!(history.last(), Some(&attempt(37, Feedback::Correct)));
        assert!(history.ends_correct());
    }

    #[test]
    fn feedback_points_towards_target() {
        assert_eq!(Feedback::for_guess(10, 50), Feedback::Higher);
        assert_eq!(Feedback::for_guess(90, 50), Feedback::Lower);
        assert_eq!(Feedback::for_guess(50, 50), Feedback::Correct);
    }

    #[test]
    fn history_serializes_as_plain_list() {
        let history = AttemptHistory::new().record(attempt(50, Feedback::Correct));
        let json = serde_json::to_value(&history).unwrap();

        assert_eq!(
            json,
            serde_json::json!([{"guess": 50, "feedback": "correct"}])
        );

        let back: AttemptHistory = serde_json::from_value(json).unwrap();
        assert_eq!(back, history);
    }

    #[test]
    fn feedback_display_matches_wire_form() {
        assert_eq!(Feedback::Higher.to_string(), "higher");
        assert_eq!(Feedback::Lower.to_string(), "lower");
        assert_eq!(Feedback::Correct.to_string(), "correct");
    }
}
