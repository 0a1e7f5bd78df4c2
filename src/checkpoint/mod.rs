//! Checkpoint and resume for suspended processes.
//!
//! A paused process holds all of its state in two places: the workflow value
//! and the process node. A [`Checkpoint`] captures both so a process can be
//! rebuilt in another run and resumed with [`Process::play`] exactly where
//! it stopped.

use crate::process::{Process, ProcessHandle, ProcessNode, ProcessState, Workflow};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a process and its workflow.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint<W> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    pub node: ProcessNode,

    pub workflow: W,
}

impl<W: Serialize + DeserializeOwned> Checkpoint<W> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Write to `path` atomically: temp file first, then rename.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CheckpointError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        let temp = temp_path(path);
        let io_err = |source| CheckpointError::Io {
            path: path.to_path_buf(),
            source,
        };

        fs::write(&temp, json).map_err(io_err)?;
        fs::rename(&temp, path).map_err(io_err)?;
        tracing::debug!(checkpoint = %self.id, path = %path.display(), "Checkpoint saved");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CheckpointError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CheckpointError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if self.node.state == ProcessState::Running {
            return Err(CheckpointError::CapturedWhileRunning { id: self.node.id });
        }
        Ok(())
    }
}

/// Sibling of `path` with `.tmp` appended to the full file name.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

impl<W> Process<W>
where
    W: Workflow + Clone + Serialize + DeserializeOwned,
{
    /// Snapshot the process. Only meaningful between runs.
    pub fn checkpoint(&self) -> Checkpoint<W> {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            node: self.handle().snapshot(),
            workflow: self.workflow().clone(),
        }
    }

    /// Rebuild a process from a checkpoint.
    pub fn from_checkpoint(checkpoint: Checkpoint<W>) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;
        tracing::info!(
            process = %checkpoint.node.id,
            checkpoint = %checkpoint.id,
            state = ?checkpoint.node.state,
            "Restoring process from checkpoint"
        );
        Ok(Process::from_parts(
            checkpoint.workflow,
            ProcessHandle::new(checkpoint.node),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MachineBuilder;
    use crate::effects::{read_result, GuessingMachine};

    #[tokio::test]
    async fn paused_process_resumes_from_json() {
        let mut process = MachineBuilder::new().target(50).spawn().unwrap();
        process.start().await.unwrap();
        process.handle().set_answer("20");
        process.play().await.unwrap();

        let json = process.checkpoint().to_json().unwrap();
        drop(process);

        let checkpoint = Checkpoint::<GuessingMachine>::from_json(&json).unwrap();
        let mut restored = Process::from_checkpoint(checkpoint).unwrap();
        let node = restored.handle();

        assert!(node.is_paused());
        assert_eq!(
            node.question().as_deref(),
            Some("My number is higher than 20. Try again.")
        );
        assert_eq!(restored.workflow().context().attempts(), 1);

        node.set_answer("50");
        restored.play().await.unwrap();

        let result = read_result(&node).unwrap();
        assert_eq!(result.message, "Found 50 in 2 attempts");
        assert_eq!(result.history.len(), 2);
    }

    #[tokio::test]
    async fn pending_answer_survives_checkpoint() {
        let mut process = MachineBuilder::new().target(7).spawn().unwrap();
        process.start().await.unwrap();
        process.handle().set_answer("7");

        let checkpoint = process.checkpoint();
        let mut restored = Process::from_checkpoint(checkpoint).unwrap();
        restored.play().await.unwrap();

        assert!(restored.workflow().context().is_finished());
    }

    #[test]
    fn unsupported_version_rejected() {
        let process = MachineBuilder::new().target(7).spawn().unwrap();
        let mut checkpoint = process.checkpoint();
        checkpoint.version = 99;

        let err = Process::from_checkpoint(checkpoint).err().unwrap();
        assert!(matches!(
            err,
            CheckpointError::UnsupportedVersion {
                found: 99,
                supported: 1
            }
        ));
    }

    #[test]
    fn running_snapshot_rejected() {
        let process = MachineBuilder::new().target(7).spawn().unwrap();
        let mut checkpoint = process.checkpoint();
        checkpoint.node.state = ProcessState::Running;

        let err = checkpoint.validate().unwrap_err();
        assert!(matches!(err, CheckpointError::CapturedWhileRunning { .. }));
    }

    #[test]
    fn temp_path_keeps_original_extension() {
        assert_eq!(
            temp_path(Path::new("/data/a.json")),
            PathBuf::from("/data/a.json.tmp")
        );
        assert_ne!(temp_path(Path::new("a.json")), temp_path(Path::new("a.bin")));
        assert_eq!(temp_path(Path::new("a.tmp")), PathBuf::from("a.tmp.tmp"));
    }

    #[tokio::test]
    async fn save_to_tmp_named_target() {
        let dir = std::env::temp_dir().join(format!("humanloop-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("game.tmp");

        let mut process = MachineBuilder::new().target(3).spawn().unwrap();
        process.start().await.unwrap();
        process.checkpoint().save(&path).unwrap();

        assert!(path.exists());
        assert!(!temp_path(&path).exists());
        let loaded = Checkpoint::<GuessingMachine>::load(&path).unwrap();
        assert_eq!(loaded.node.id, process.handle().id());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn garbage_json_is_a_deserialization_error() {
        let err = Checkpoint::<GuessingMachine>::from_json("{not json").unwrap_err();
        assert!(matches!(err, CheckpointError::DeserializationFailed(_)));
    }

    #[tokio::test]
    async fn save_and_load_through_file() {
        let dir = std::env::temp_dir().join(format!("humanloop-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("checkpoint.json");

        let mut process = MachineBuilder::new().target(3).spawn().unwrap();
        process.start().await.unwrap();
        process.checkpoint().save(&path).unwrap();

        let loaded = Checkpoint::<GuessingMachine>::load(&path).unwrap();
        assert_eq!(loaded.node.id, process.handle().id());
        assert!(!temp_path(&path).exists());

        fs::remove_dir_all(&dir).ok();
    }
}
