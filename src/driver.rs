//! Drivers: the outside actors that answer a paused workflow.
//!
//! A driver polls the process, reads the published question, writes an
//! answer into the side-channel and triggers resume. [`drive`] implements
//! that loop for any [`AnswerSource`].

use crate::core::Feedback;
use crate::process::{Process, ProcessError, ProcessState, Workflow};
use std::collections::VecDeque;

/// Something that can answer questions.
pub trait AnswerSource {
    /// Answer `question`, or return `None` to stop driving.
    fn answer(&mut self, question: &str) -> Option<String>;
}

impl<F> AnswerSource for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn answer(&mut self, question: &str) -> Option<String> {
        self(question)
    }
}

/// Replays a fixed list of answers.
#[derive(Clone, Debug, Default)]
pub struct ScriptedAnswers {
    answers: VecDeque<String>,
}

impl ScriptedAnswers {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl AnswerSource for ScriptedAnswers {
    fn answer(&mut self, _question: &str) -> Option<String> {
        self.answers.pop_front()
    }
}

/// Plays the guessing game by halving its search range.
///
/// The range is narrowed from the feedback embedded in each question, so the
/// source needs nothing but the published text.
#[derive(Clone, Debug)]
pub struct Bisection {
    low: i64,
    high: i64,
    last: Option<i64>,
}

impl Bisection {
    pub fn new(low: i64, high: i64) -> Self {
        Self {
            low,
            high,
            last: None,
        }
    }

    /// Current candidate range, inclusive.
    pub fn range(&self) -> (i64, i64) {
        (self.low, self.high)
    }
}

impl Default for Bisection {
    fn default() -> Self {
        Self::new(1, 100)
    }
}

impl AnswerSource for Bisection {
    fn answer(&mut self, question: &str) -> Option<String> {
        if let Some(last) = self.last {
            match feedback_in(question) {
                Some(Feedback::Higher) => self.low = last.checked_add(1)?,
                Some(Feedback::Lower) => self.high = last.checked_sub(1)?,
                _ => {}
            }
        }
        if self.low > self.high {
            return None;
        }

        // floor((low + high) / 2) without overflow
        let guess = (self.low & self.high) + ((self.low ^ self.high) >> 1);
        self.last = Some(guess);
        Some(guess.to_string())
    }
}

/// Feedback carried by a "My number is ... than N" question.
fn feedback_in(question: &str) -> Option<Feedback> {
    let rest = question.strip_prefix("My number is ")?;
    if rest.starts_with("higher") {
        Some(Feedback::Higher)
    } else if rest.starts_with("lower") {
        Some(Feedback::Lower)
    } else {
        None
    }
}

/// Answer questions until the process finishes or the source gives up.
///
/// Starts the process first if it has not run yet. Returns the state the
/// process was left in.
pub async fn drive<W, A>(
    process: &mut Process<W>,
    source: &mut A,
) -> Result<ProcessState, ProcessError>
where
    W: Workflow,
    A: AnswerSource + ?Sized,
{
    let node = process.handle();
    if node.state() == ProcessState::Created {
        process.start().await?;
    }

    while node.is_paused() {
        let question = node.question().unwrap_or_default();
        let Some(answer) = source.answer(&question) else {
            tracing::info!(process = %node.id(), "Answer source exhausted, leaving process paused");
            break;
        };
        tracing::debug!(process = %node.id(), %question, %answer, "Submitting answer");
        node.set_answer(answer);
        process.play().await?;
    }

    Ok(node.state())
}
