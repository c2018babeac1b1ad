//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Action, ActionError, Event, Guard, StateId, StateNode, Transition};

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<D = ()> {
    target: Option<StateId>,
    guard: Option<Guard<D>>,
    action: Option<Action<D>>,
}

impl<D> TransitionBuilder<D> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            target: None,
            guard: None,
            action: None,
        }
    }

    /// Set the target state (required).
    pub fn to(mut self, target: StateId) -> Self {
        self.target = Some(target);
        self
    }

    /// Add a guard predicate (optional).
    pub fn guard(mut self, guard: Guard<D>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&StateNode<D>, Option<&Event<D>>) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Set the action run when the transition fires (optional).
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&StateNode<D>, Option<&Event<D>>) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.action = Some(Action::new(action));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<D>, BuildError> {
        let target = self.target.ok_or(BuildError::MissingTarget)?;

        Ok(Transition {
            guard: self.guard,
            action: self.action,
            target,
        })
    }
}

impl<D> Default for TransitionBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}
