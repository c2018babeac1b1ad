//! Guard predicates for controlling transitions.
//!
//! Guards are boolean functions of the source node and the event being
//! processed. A transition without a guard is unconditional.

use super::event::Event;
use super::state::StateNode;

type Predicate<D> = Box<dyn Fn(&StateNode<D>, Option<&Event<D>>) -> bool + Send + Sync>;

/// Predicate that determines whether a transition may fire.
///
/// # Example
///
/// ```rust
/// use stepwise_hsm::core::Guard;
///
/// // Only fire on event type 7.
/// let on_seven: Guard = Guard::new(|_node, event| event.is_some_and(|e| e.kind == 7));
/// ```
pub struct Guard<D = ()> {
    predicate: Predicate<D>,
}

impl<D> Guard<D> {
    /// Create a guard from a predicate.
    ///
    /// The predicate should be deterministic and free of side effects; it may
    /// be evaluated on every guard-checking pass of its node.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&StateNode<D>, Option<&Event<D>>) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Check if the guard allows the transition out of `node`.
    pub fn check(&self, node: &StateNode<D>, event: Option<&Event<D>>) -> bool {
        (self.predicate)(node, event)
    }
}
