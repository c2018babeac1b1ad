//! Checkpoint and resume functionality for state machines.
//!
//! A checkpoint captures the runtime part of a machine: its initial and
//! current state, and the phase and history reference of every node.
//! Callbacks and the topology itself are never serialized, so a checkpoint
//! can only be restored into a machine built from the same topology.

use crate::core::{Phase, Registry, StateId};
use crate::engine::Machine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Runtime fields of one node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Name of the node, used to detect a mismatched topology
    pub name: String,

    pub phase: Phase,

    pub history: Option<StateId>,
}

/// Serializable checkpoint of a machine's runtime state.
/// Does NOT include callbacks or guards (not serializable).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Initial state of the machine
    pub initial: StateId,

    /// Current state of the machine
    pub current: StateId,

    /// One entry per node, in registry order
    pub states: Vec<StateSnapshot>,
}

impl Checkpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version == CHECKPOINT_VERSION {
            Ok(())
        } else {
            Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            })
        }
    }

    /// Check that this checkpoint fits `registry` and the machine's
    /// initial state.
    fn validate_against<D>(
        &self,
        registry: &Registry<D>,
        initial: StateId,
    ) -> Result<(), CheckpointError> {
        let invalid = |message: String| Err(CheckpointError::ValidationFailed(message));

        if self.states.len() != registry.len() {
            return invalid(format!(
                "checkpoint has {} states, machine has {}",
                self.states.len(),
                registry.len()
            ));
        }
        if self.initial != initial {
            return invalid(format!(
                "checkpoint starts at {}, machine starts at {}",
                self.initial, initial
            ));
        }
        if !registry.contains(self.current) {
            return invalid(format!("current state {} is unknown", self.current));
        }

        for (node, snapshot) in registry.iter().zip(&self.states) {
            if node.name() != snapshot.name {
                return invalid(format!(
                    "state {} is '{}' in the checkpoint but '{}' in the machine",
                    node.id(),
                    snapshot.name,
                    node.name()
                ));
            }

            let history_fits = match (node.default_child(), snapshot.history) {
                (None, None) => true,
                (Some(_), Some(child)) => registry
                    .get(child)
                    .is_some_and(|c| c.parent() == Some(node.id())),
                _ => false,
            };
            if !history_fits {
                return invalid(format!(
                    "history of '{}' is not one of its children",
                    node.name()
                ));
            }
        }

        Ok(())
    }
}

impl<D> Machine<D> {
    /// Capture the runtime state of this machine.
    pub fn checkpoint(&self) -> Result<Checkpoint, CheckpointError> {
        let (Some(initial), Some(current)) = (self.initial_state(), self.current_state()) else {
            return Err(CheckpointError::InvalidMachine);
        };

        let states = self
            .registry()
            .iter()
            .map(|node| StateSnapshot {
                name: node.name().to_string(),
                phase: node.phase(),
                history: node.history_child(),
            })
            .collect();

        Ok(Checkpoint {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            initial,
            current,
            states,
        })
    }

    /// Restore runtime state captured by [`checkpoint`](Self::checkpoint).
    ///
    /// The whole checkpoint is validated first; on error the machine is left
    /// untouched.
    pub fn restore(&mut self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        checkpoint.check_version()?;
        let initial = self.initial_state().ok_or(CheckpointError::InvalidMachine)?;
        checkpoint.validate_against(self.registry(), initial)?;

        let registry = self.registry_mut();
        for (index, snapshot) in checkpoint.states.iter().enumerate() {
            let node = registry.node_mut(StateId::new(index));
            node.phase = snapshot.phase;
            node.history = snapshot.history;
        }
        self.set_current(checkpoint.current);

        tracing::debug!(
            checkpoint = %checkpoint.id,
            current = %checkpoint.current,
            "machine restored from checkpoint"
        );
        Ok(())
    }
}
