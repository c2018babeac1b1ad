//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The machine was never built successfully, so there is nothing to
    /// capture or restore into
    #[error("Machine is invalid")]
    InvalidMachine,

    /// Checkpoint does not describe the topology of the machine it is
    /// restored into
    #[error("Checkpoint validation failed: {0}")]
    ValidationFailed(String),
}
