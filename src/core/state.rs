//! State trait and the phases of the guessing workflow.
//!
//! All state machine states implement [`State`], which provides pure methods
//! for inspecting state properties without side effects. The guessing
//! workflow moves through three [`Phase`]s; every move is recorded as a
//! [`PhaseTransition`] so a resumed instance keeps its full audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure - no side effects.
///
/// # Required Traits
///
/// - `Clone` + `PartialEq`: states are compared and copied into history
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states are captured in checkpoints
///
/// # Example
///
/// ```rust
/// use humanloop::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
///     Broken,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///             Self::Broken => "Broken",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Broken)
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Broken)
///     }
/// }
///
/// assert!(Door::Broken.is_final());
/// assert!(!Door::Open.is_error());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Position of a guessing workflow in its lifecycle.
///
/// `Init` means setup has not been reported yet, `AwaitingAnswer` means a
/// question is published and the instance is suspended until resumed, and
/// `Done` means the result has been produced.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Phase {
    Init,
    AwaitingAnswer,
    Done,
}

impl State for Phase {
    fn name(&self) -> &str {
        match self {
            Self::Init => "Init",
            Self::AwaitingAnswer => "AwaitingAnswer",
            Self::Done => "Done",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Record of a single phase change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub from: Phase,
    pub to: Phase,
    pub timestamp: DateTime<Utc>,
    /// Number of charged attempts when the transition happened
    pub attempts: u32,
}
