//! Guessing workflow that pauses for every answer.

use crate::core::{AnswerOutcome, GuessContext, Guard, Phase, PhaseTransition, State};
use crate::effects::channel::{consume_answer, emit_result, mark_status, publish_question};
use crate::process::{
    Advance, ProcessError, ProcessHandle, Workflow, ANSWER_KEY, NEEDS_INPUT_STATUS,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use stillwater::effect::Effect;

/// Loop predicate: keep asking while the target is unfound and budget remains.
pub fn loop_guard() -> Guard<GuessContext> {
    Guard::new(GuessContext::not_finished)
}

/// Hidden-number game driven by out-of-band answers.
///
/// Each `advance` runs one step for the current phase and then either
/// publishes the next question and pauses, or finishes:
///
/// - `Init`: report setup, then ask.
/// - `AwaitingAnswer`: consume the answer (if any), then ask again or finish.
/// - `Done`: nothing left to do.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GuessingMachine {
    phase: Phase,
    context: GuessContext,
    transitions: Vec<PhaseTransition>,
    #[serde(skip, default = "loop_guard")]
    guard: Guard<GuessContext>,
}

impl GuessingMachine {
    /// Wrap an already set-up context. The machine starts in `Init`.
    pub fn new(context: GuessContext) -> Self {
        Self {
            phase: Phase::Init,
            context,
            transitions: Vec::new(),
            guard: loop_guard(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn context(&self) -> &GuessContext {
        &self.context
    }

    /// Every phase change so far, oldest first. Re-asking while already
    /// awaiting an answer is not a change.
    pub fn transitions(&self) -> &[PhaseTransition] {
        &self.transitions
    }

    pub fn is_final(&self) -> bool {
        self.phase.is_final()
    }

    /// Move to `to`. Staying in the same phase records nothing.
    fn enter(&mut self, to: Phase) {
        if self.phase == to {
            return;
        }
        self.transitions.push(PhaseTransition {
            from: self.phase,
            to,
            timestamp: Utc::now(),
            attempts: self.context.attempts(),
        });
        self.phase = to;
    }

    fn setup(&self, node: &ProcessHandle) {
        node.report("initialized (target hidden)");
    }

    async fn ask_and_pause(&mut self, node: &ProcessHandle) -> Result<Advance, ProcessError> {
        let question = self.context.current_question().to_string();
        publish_question(question.clone()).run(node).await?;
        node.report(format!("asked: {question:?}"));
        self.enter(Phase::AwaitingAnswer);
        Ok(Advance::Pause)
    }

    async fn process_answer(&mut self, node: &ProcessHandle) -> Result<(), ProcessError> {
        mark_status("processing answer").run(node).await?;
        node.report(format!(
            "Checking answer... (attempt {})",
            self.context.attempts()
        ));

        let Some(raw) = consume_answer().run(node).await? else {
            node.report("No answer found!");
            return Ok(());
        };
        node.report(format!("Answer: {raw:?}. Cleared it, parsing as an integer..."));

        match self.context.apply_answer(&raw) {
            AnswerOutcome::Invalid { raw } => {
                node.report(format!(
                    "Invalid answer {raw:?}; please set an integer in extra '{ANSWER_KEY}'"
                ));
            }
            AnswerOutcome::Correct { guess, attempts } => {
                node.report(format!("Attempt {attempts}: {guess} - CORRECT"));
                publish_question(self.context.success_notice())
                    .run(node)
                    .await?;
                self.emit(node).await?;
            }
            AnswerOutcome::Miss {
                guess,
                feedback,
                attempts,
            } => {
                node.report(format!("Attempt {attempts}: {guess} - answer is {feedback}"));
            }
            AnswerOutcome::Closed => {
                node.report("Answer ignored, no attempts left");
            }
        }
        Ok(())
    }

    async fn finish(&mut self, node: &ProcessHandle) -> Result<Advance, ProcessError> {
        if !self.context.is_finished() {
            node.report(format!(
                "finished without finding the number in {} attempts",
                self.context.attempts()
            ));
            publish_question(self.context.stopped_notice())
                .run(node)
                .await?;
            self.emit(node).await?;
        }
        self.enter(Phase::Done);
        Ok(Advance::Finish)
    }

    async fn emit(&self, node: &ProcessHandle) -> Result<(), ProcessError> {
        match self.context.result() {
            Some(result) => emit_result(result).run(node).await,
            None => Ok(()),
        }
    }
}

impl Workflow for GuessingMachine {
    fn label(&self) -> &str {
        "GuessingMachine"
    }

    async fn advance(&mut self, node: &ProcessHandle) -> Result<Advance, ProcessError> {
        match self.phase {
            Phase::Init => self.setup(node),
            Phase::AwaitingAnswer => self.process_answer(node).await?,
            Phase::Done => return Ok(Advance::Finish),
        }

        if self.guard.check(&self.context) {
            self.ask_and_pause(node).await
        } else {
            self.finish(node).await
        }
    }

    fn on_paused(&self, node: &ProcessHandle) {
        if node.question().is_some() {
            node.set_status(Some(NEEDS_INPUT_STATUS.to_string()));
        }
    }
}
