//! Core data model of the state tree.
//!
//! This module contains the static topology and its runtime bookkeeping:
//! - Node records and their phase marker
//! - Guard predicates, callbacks and transition tables
//! - The node arena with its tree navigation primitives
//! - History pseudostate bookkeeping

mod action;
mod event;
mod guard;
mod history;
mod registry;
mod state;
mod transition;

pub use action::{Action, ActionError};
pub use event::Event;
pub use guard::Guard;
pub use registry::Registry;
pub use state::{Phase, StateId, StateNode};
pub use transition::Transition;
