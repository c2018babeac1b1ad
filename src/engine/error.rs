//! Step outcomes and step errors.

use crate::core::{ActionError, Phase};
use thiserror::Error;

/// Successful result of a single [`step`](crate::engine::Machine::step).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A phase was processed while an event was present.
    Changed,
    /// A phase was processed without an event. Callers driving the machine to
    /// quiescence keep stepping until they see this.
    NoEvent,
}

impl StepOutcome {
    /// Numeric status code: `0` for `Changed`, `1` for `NoEvent`.
    pub fn code(&self) -> i32 {
        match self {
            StepOutcome::Changed => 0,
            StepOutcome::NoEvent => 1,
        }
    }
}

/// Errors returned by [`step`](crate::engine::Machine::step) and
/// [`reset`](crate::engine::Machine::reset). None of them leave a partial
/// update behind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StepError {
    #[error("machine has no current state; it was not built successfully")]
    InvalidMachine,

    #[error("{phase} callback of state '{state}' failed: {source}")]
    ActionFailed {
        state: String,
        phase: Phase,
        #[source]
        source: ActionError,
    },

    #[error("state '{state}' is exiting but no transition target can be resolved")]
    NoPendingTransition { state: String },
}

impl StepError {
    /// Numeric status code shared by every error: `-1`.
    pub fn code(&self) -> i32 {
        -1
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StepError::InvalidMachine => "INVALID_MACHINE",
            StepError::ActionFailed { .. } => "ACTION_FAILED",
            StepError::NoPendingTransition { .. } => "NO_PENDING_TRANSITION",
        }
    }
}
