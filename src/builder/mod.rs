//! Builder API for ergonomic topology and machine construction.
//!
//! This module provides fluent builders for declaring a state tree, its
//! transitions, and the machine that runs it. Topologies are validated when
//! the registry is built and again, for the initial state, when the machine
//! is built.

pub mod error;
pub mod machine;
pub mod registry;
pub mod transition;

pub use error::BuildError;
pub use machine::MachineBuilder;
pub use registry::RegistryBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Event, Guard, StateId, StateNode, Transition};

/// Create an unconditional transition without an action.
///
/// # Example
///
/// ```
/// use stepwise_hsm::builder::{simple_transition, RegistryBuilder};
///
/// let mut builder = RegistryBuilder::<()>::new();
/// let start = builder.state("start");
/// let end = builder.state("end");
/// builder.add_transition(start, simple_transition(end));
/// ```
pub fn simple_transition<D>(target: StateId) -> Transition<D> {
    Transition::new(target)
}

/// Create a transition with a guard predicate.
///
/// # Example
///
/// ```
/// use stepwise_hsm::builder::{guarded_transition, RegistryBuilder};
///
/// let mut builder = RegistryBuilder::<()>::new();
/// let idle = builder.state("idle");
/// let busy = builder.state("busy");
/// builder.add_transition(
///     idle,
///     guarded_transition(busy, |_, event| event.is_some_and(|e| e.kind == 1)),
/// );
/// ```
pub fn guarded_transition<D, F>(target: StateId, guard: F) -> Transition<D>
where
    F: Fn(&StateNode<D>, Option<&Event<D>>) -> bool + Send + Sync + 'static,
{
    Transition {
        guard: Some(Guard::new(guard)),
        action: None,
        target,
    }
}
