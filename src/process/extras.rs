//! String-keyed side-channel attached to a process.
//!
//! Extras stay readable and writable while the process is paused, which is
//! how a driver hands answers to a suspended workflow.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Key the workflow publishes its question under.
pub const QUESTION_KEY: &str = "question";

/// Key the driver writes its answer under.
pub const ANSWER_KEY: &str = "answer";

/// Side-channel key-value store.
///
/// A key holding JSON `null` counts as absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Extras {
    values: BTreeMap<String, Value>,
}

impl Extras {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|v| !v.is_null())
    }

    /// Text form of a value: strings as-is, other scalars via JSON.
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.get(key).map(value_text)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Remove and return a value.
    pub fn take(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key).filter(|v| !v.is_null())
    }
}

pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
