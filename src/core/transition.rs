//! Transition table entries.

use super::action::{Action, ActionError};
use super::event::Event;
use super::guard::Guard;
use super::state::{StateId, StateNode};

/// One entry of a node's transition table: optional guard, optional
/// action, and the target node.
pub struct Transition<D = ()> {
    pub guard: Option<Guard<D>>,
    pub action: Option<Action<D>>,
    pub target: StateId,
}

impl<D> Transition<D> {
    /// An unconditional transition with no action.
    pub fn new(target: StateId) -> Self {
        Self {
            guard: None,
            action: None,
            target,
        }
    }

    pub fn is_unconditional(&self) -> bool {
        self.guard.is_none()
    }

    /// Check if this transition may fire out of `source`. An absent guard
    /// always allows it.
    pub fn can_fire(&self, source: &StateNode<D>, event: Option<&Event<D>>) -> bool {
        self.guard
            .as_ref()
            .is_none_or(|guard| guard.check(source, event))
    }

    /// Run the transition action, if any.
    pub fn take_action(
        &self,
        source: &StateNode<D>,
        event: Option<&Event<D>>,
    ) -> Result<(), ActionError> {
        match &self.action {
            Some(action) => action.run(source, event),
            None => Ok(()),
        }
    }
}

impl<D> std::fmt::Debug for Transition<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("guarded", &self.guard.is_some())
            .field("action", &self.action.is_some())
            .field("target", &self.target)
            .finish()
    }
}
