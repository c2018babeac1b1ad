//! Build errors for machine and transition builders.

use crate::core::StateId;
use thiserror::Error;

/// Errors that can occur when building machines and transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Registry not specified. Call .registry(registry) before .build()")]
    MissingRegistry,

    #[error("Registry has no states")]
    EmptyRegistry,

    #[error("Initial state {id} is not part of the registry")]
    UnknownInitialState { id: StateId },

    #[error("Initial state '{name}' has a parent. A machine must start at a root state")]
    InitialStateNotRoot { name: String },

    #[error("Transition target not specified. Call .to(state)")]
    MissingTarget,
}
