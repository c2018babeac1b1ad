//! Callbacks run by the engine: entry, during and exit actions of a node,
//! and the action of a transition.

use super::event::Event;
use super::state::StateNode;
use thiserror::Error;

/// Failure reported by a callback.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ActionError {
    pub message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

type Callback<D> =
    Box<dyn Fn(&StateNode<D>, Option<&Event<D>>) -> Result<(), ActionError> + Send + Sync>;

/// A callback invoked with the node being processed and the current event.
pub struct Action<D = ()> {
    callback: Callback<D>,
}

impl<D> Action<D> {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&StateNode<D>, Option<&Event<D>>) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Action {
            callback: Box::new(callback),
        }
    }

    pub fn run(&self, node: &StateNode<D>, event: Option<&Event<D>>) -> Result<(), ActionError> {
        (self.callback)(node, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateId;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn action_runs_callback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let action: Action = Action::new(move |_, _| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let node = StateNode::new(StateId::new(0), "idle");

        action.run(&node, None).unwrap();
        action.run(&node, None).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn action_failure_is_reported() {
        let action: Action = Action::new(|node, _| Err(ActionError::new(format!("{} jammed", node.name()))));
        let node = StateNode::new(StateId::new(0), "valve");

        let err = action.run(&node, None).unwrap_err();

        assert_eq!(err.to_string(), "valve jammed");
    }
}
