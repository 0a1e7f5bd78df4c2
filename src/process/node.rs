//! Process node: the externally visible record of a running workflow.

use super::error::ProcessError;
use super::extras::{value_text, Extras, ANSWER_KEY, QUESTION_KEY};
use crate::core::State;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

/// Lifecycle state of a process.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ProcessState {
    Created,
    Running,
    Paused,
    Finished,
    Excepted,
}

impl State for ProcessState {
    fn name(&self) -> &str {
        match self {
            Self::Created => "Created",
            Self::Running => "Running",
            Self::Paused => "Paused",
            Self::Finished => "Finished",
            Self::Excepted => "Excepted",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Finished | Self::Excepted)
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Excepted)
    }
}

/// One line of the process log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Everything known about a process from the outside.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProcessNode {
    pub id: Uuid,
    pub label: String,
    pub state: ProcessState,
    /// Human-readable status annotation; observational only
    pub status: Option<String>,
    pub extras: Extras,
    pub outputs: BTreeMap<String, Value>,
    pub reports: Vec<Report>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProcessNode {
    pub fn new(label: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            state: ProcessState::Created,
            status: None,
            extras: Extras::new(),
            outputs: BTreeMap::new(),
            reports: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Shared handle to a process node.
///
/// The workflow and its driver each hold a clone. Every method takes the
/// lock for the duration of the call only.
#[derive(Clone, Debug)]
pub struct ProcessHandle {
    inner: Arc<RwLock<ProcessNode>>,
}

impl ProcessHandle {
    pub fn new(node: ProcessNode) -> Self {
        Self {
            inner: Arc::new(RwLock::new(node)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.inner.read().id
    }

    pub fn label(&self) -> String {
        self.inner.read().label.clone()
    }

    pub fn state(&self) -> ProcessState {
        self.inner.read().state
    }

    pub fn is_paused(&self) -> bool {
        self.state() == ProcessState::Paused
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_final()
    }

    pub fn status(&self) -> Option<String> {
        self.inner.read().status.clone()
    }

    pub fn extra(&self, key: &str) -> Option<Value> {
        self.inner.read().extras.get(key).cloned()
    }

    pub fn set_extra(&self, key: impl Into<String>, value: impl Into<Value>) {
        let mut node = self.inner.write();
        node.extras.set(key, value);
        node.touch();
    }

    /// Remove and return an extra.
    pub fn take_extra(&self, key: &str) -> Option<Value> {
        let mut node = self.inner.write();
        let value = node.extras.take(key);
        node.touch();
        value
    }

    /// The question currently published by the workflow.
    pub fn question(&self) -> Option<String> {
        self.inner.read().extras.get_text(QUESTION_KEY)
    }

    /// Hand an answer to the workflow. Takes effect on the next `play`.
    pub fn set_answer(&self, answer: impl Into<String>) {
        self.set_extra(ANSWER_KEY, answer.into());
    }

    pub fn output(&self, key: &str) -> Option<Value> {
        self.inner.read().outputs.get(key).cloned()
    }

    pub fn reports(&self) -> Vec<Report> {
        self.inner.read().reports.clone()
    }

    /// A copy of the whole node.
    pub fn snapshot(&self) -> ProcessNode {
        self.inner.read().clone()
    }

    /// Append to the process log and mirror it to tracing.
    pub fn report(&self, message: impl Into<String>) {
        let message = message.into();
        let mut node = self.inner.write();
        tracing::info!(process = %node.id, label = %node.label, "{}", message);
        node.reports.push(Report {
            timestamp: Utc::now(),
            message,
        });
        node.touch();
    }

    pub(crate) fn set_state(&self, state: ProcessState) {
        let mut node = self.inner.write();
        tracing::debug!(
            process = %node.id,
            from = node.state.name(),
            to = state.name(),
            "Process state changed"
        );
        node.state = state;
        node.touch();
    }

    pub(crate) fn set_status(&self, status: Option<String>) {
        let mut node = self.inner.write();
        node.status = status;
        node.touch();
    }

    /// Attach an output. Each key can be written once.
    pub(crate) fn set_output(&self, key: &str, value: Value) -> Result<(), ProcessError> {
        let mut node = self.inner.write();
        if node.outputs.contains_key(key) {
            return Err(ProcessError::OutputExists {
                id: node.id.to_string(),
                key: key.to_string(),
            });
        }
        node.outputs.insert(key.to_string(), value);
        node.touch();
        Ok(())
    }

    /// Remove the pending answer, returning its text.
    pub(crate) fn take_answer(&self) -> Option<String> {
        self.take_extra(ANSWER_KEY).map(|v| value_text(&v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_node_is_created_and_empty() {
        let handle = ProcessHandle::new(ProcessNode::new("test"));

        assert_eq!(handle.state(), ProcessState::Created);
        assert!(!handle.is_paused());
        assert!(!handle.is_finished());
        assert!(handle.question().is_none());
        assert!(handle.status().is_none());
        assert_eq!(handle.label(), "test");
    }

    #[test]
    fn clones_share_the_node() {
        let handle = ProcessHandle::new(ProcessNode::new("test"));
        let driver = handle.clone();

        driver.set_answer("12");

        assert_eq!(handle.extra(ANSWER_KEY), Some(json!("12")));
        assert_eq!(handle.take_answer().as_deref(), Some("12"));
        assert!(driver.extra(ANSWER_KEY).is_none());
        assert!(handle.take_answer().is_none());
    }

    #[test]
    fn outputs_are_write_once() {
        let handle = ProcessHandle::new(ProcessNode::new("test"));

        handle.set_output("result", json!({"message": "ok"})).unwrap();
        let err = handle.set_output("result", json!({})).unwrap_err();

        assert!(matches!(err, ProcessError::OutputExists { .. }));
        assert_eq!(handle.output("result"), Some(json!({"message": "ok"})));
    }

    #[test]
    fn reports_accumulate_in_order() {
        let handle = ProcessHandle::new(ProcessNode::new("test"));

        handle.report("first");
        handle.report("second");

        let messages: Vec<_> = handle.reports().into_iter().map(|r| r.message).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn final_states() {
        assert!(ProcessState::Finished.is_final());
        assert!(ProcessState::Excepted.is_final());
        assert!(ProcessState::Excepted.is_error());
        assert!(!ProcessState::Paused.is_final());
    }
}
