//! In-process pause/resume host.
//!
//! A [`Process`] owns a [`Workflow`] and the [`ProcessNode`] that outside
//! actors observe through a [`ProcessHandle`]. Running a workflow means
//! calling [`Workflow::advance`] until it asks to pause or reports that it
//! is done:
//!
//! ```text
//!  Created --start--> Running --Pause--> Paused --play--> Running --Finish--> Finished
//!                        ^                                   |
//!                        +-----------------------------------+
//! ```
//!
//! While paused no code of the workflow runs; the driver reads the node's
//! extras, writes an answer and calls [`Process::play`]. Durability across
//! restarts is handled by `crate::checkpoint`.

mod error;
mod extras;
mod node;

pub use error::ProcessError;
pub use extras::{Extras, ANSWER_KEY, QUESTION_KEY};
pub use node::{ProcessHandle, ProcessNode, ProcessState, Report};

use crate::core::State;

/// Status set on a paused process that has a question waiting.
pub const NEEDS_INPUT_STATUS: &str = "Need user input via \"answer\" extra before replaying!";

/// What a workflow wants the host to do after one `advance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Suspend until the next `play`.
    Pause,
    /// The workflow has produced its outputs.
    Finish,
}

/// A workflow the host can suspend and resume.
///
/// `advance` runs from the current resume point up to the next pause point
/// (or to completion). The workflow keeps its own position between calls.
#[allow(async_fn_in_trait)]
pub trait Workflow {
    /// Label given to the process node.
    fn label(&self) -> &str;

    async fn advance(&mut self, node: &ProcessHandle) -> Result<Advance, ProcessError>;

    /// Called every time the process enters `Paused`. Must be idempotent.
    fn on_paused(&self, node: &ProcessHandle) {
        let _ = node;
    }
}

/// A running workflow plus its externally visible node.
pub struct Process<W: Workflow> {
    workflow: W,
    node: ProcessHandle,
}

impl<W: Workflow> Process<W> {
    pub fn new(workflow: W) -> Self {
        let node = ProcessHandle::new(ProcessNode::new(workflow.label()));
        Self { workflow, node }
    }

    pub(crate) fn from_parts(workflow: W, node: ProcessHandle) -> Self {
        Self { workflow, node }
    }

    /// Handle for drivers; clones share the same node.
    pub fn handle(&self) -> ProcessHandle {
        self.node.clone()
    }

    pub fn workflow(&self) -> &W {
        &self.workflow
    }

    pub fn state(&self) -> ProcessState {
        self.node.state()
    }

    /// Run a freshly created process up to its first pause point.
    pub async fn start(&mut self) -> Result<ProcessState, ProcessError> {
        let state = self.node.state();
        if state != ProcessState::Created {
            return Err(ProcessError::AlreadyStarted {
                id: self.node.id().to_string(),
                state: state.name().to_string(),
            });
        }
        self.run().await
    }

    /// Resume a paused process.
    pub async fn play(&mut self) -> Result<ProcessState, ProcessError> {
        let state = self.node.state();
        if state != ProcessState::Paused {
            return Err(ProcessError::NotPaused {
                id: self.node.id().to_string(),
                state: state.name().to_string(),
            });
        }
        tracing::debug!(process = %self.node.id(), "Resuming process");
        self.run().await
    }

    async fn run(&mut self) -> Result<ProcessState, ProcessError> {
        self.node.set_state(ProcessState::Running);

        match self.workflow.advance(&self.node).await {
            Ok(Advance::Pause) => {
                self.node.set_state(ProcessState::Paused);
                self.workflow.on_paused(&self.node);
                Ok(ProcessState::Paused)
            }
            Ok(Advance::Finish) => {
                self.node.set_status(None);
                self.node.set_state(ProcessState::Finished);
                Ok(ProcessState::Finished)
            }
            Err(e) => {
                tracing::error!(process = %self.node.id(), error = %e, "Process excepted");
                self.node.set_status(Some(e.to_string()));
                self.node.set_state(ProcessState::Excepted);
                Err(e)
            }
        }
    }
}
