//! History pseudostate bookkeeping.
//!
//! Each composite remembers the child it should resume at. The reference is
//! written only when a child exits towards a sibling, and read by the
//! `During` and `CheckingGuard` passes. `OnEntry` always descends through the
//! default child instead.

use super::registry::Registry;
use super::state::{Phase, StateId};

impl<D> Registry<D> {
    /// The child a composite descends into at the end of its `During` pass.
    ///
    /// When the default child is itself already in `During` the composite is
    /// on its first pass after entry and follows the default child; otherwise
    /// it resumes at its history child. Returns `None` for leaves.
    pub(crate) fn during_child(&self, composite: StateId) -> Option<StateId> {
        let node = self.node(composite);
        let default = node.default_child?;
        if self.node(default).phase == Phase::During {
            Some(default)
        } else {
            node.history
        }
    }

    /// Resolve the target of the transition an exit is carrying out.
    ///
    /// A node with transitions exits towards its first target. An ancestor
    /// continuing a cascade has none of its own, so the target is found by
    /// following history references down to the node that started the exit.
    pub fn pending_target(&self, from: StateId) -> Option<StateId> {
        let mut current = from;
        for _ in 0..self.len() {
            let node = self.node(current);
            if let Some(transition) = node.transitions.first() {
                return Some(transition.target);
            }
            current = node.history?;
        }
        None
    }

    /// Record `child` as the state `parent` resumes at.
    pub(crate) fn remember(&mut self, parent: StateId, child: StateId) {
        debug_assert_eq!(
            self.node(child).parent,
            Some(parent),
            "history of {} must be one of its own children",
            self.node(parent).name
        );
        self.node_mut(parent).history = Some(child);
    }

    /// Whether the history reference of `id` satisfies the tree invariants:
    /// leaves have none, composites point at one of their own children.
    pub fn history_is_consistent(&self, id: StateId) -> bool {
        let Some(node) = self.get(id) else {
            return false;
        };
        match node.history {
            None => !self.has_child(id),
            Some(child) => {
                self.has_child(id) && self.get(child).is_some_and(|c| c.parent == Some(id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{Registry, StateId, StateNode, Transition};

    // top { a, b }   a -> b
    fn registry() -> Registry {
        let mut top = StateNode::new(StateId::new(0), "top");
        let mut a = StateNode::new(StateId::new(1), "a");
        let mut b = StateNode::new(StateId::new(2), "b");
        top.default_child = Some(StateId::new(1));
        a.parent = Some(StateId::new(0));
        a.transitions.push(Transition::new(StateId::new(2)));
        b.parent = Some(StateId::new(0));
        let mut registry = Registry::from_nodes(vec![top, a, b]);
        registry.reset_all();
        registry
    }

    #[test]
    fn during_child_follows_default_on_first_pass() {
        let mut registry = registry();
        registry.node_mut(StateId::new(1)).phase = crate::core::Phase::During;
        registry.node_mut(StateId::new(0)).history = Some(StateId::new(2));

        assert_eq!(registry.during_child(StateId::new(0)), Some(StateId::new(1)));
    }

    #[test]
    fn during_child_resumes_history_otherwise() {
        let mut registry = registry();
        registry.remember(StateId::new(0), StateId::new(2));

        assert_eq!(registry.during_child(StateId::new(0)), Some(StateId::new(2)));
    }

    #[test]
    fn during_child_of_leaf_is_none() {
        assert_eq!(registry().during_child(StateId::new(2)), None);
    }

    #[test]
    fn pending_target_prefers_own_transition() {
        assert_eq!(registry().pending_target(StateId::new(1)), Some(StateId::new(2)));
    }

    #[test]
    fn pending_target_follows_history_for_ancestors() {
        assert_eq!(registry().pending_target(StateId::new(0)), Some(StateId::new(2)));
    }

    #[test]
    fn pending_target_descends_several_levels() {
        // top { mid { leaf } }   other   leaf -> other
        let mut top = StateNode::new(StateId::new(0), "top");
        let mut mid = StateNode::new(StateId::new(1), "mid");
        let mut leaf = StateNode::new(StateId::new(2), "leaf");
        let other = StateNode::new(StateId::new(3), "other");
        top.default_child = Some(StateId::new(1));
        mid.parent = Some(StateId::new(0));
        mid.default_child = Some(StateId::new(2));
        leaf.parent = Some(StateId::new(1));
        leaf.transitions.push(Transition::new(StateId::new(3)));
        let mut registry: Registry = Registry::from_nodes(vec![top, mid, leaf, other]);
        registry.reset_all();

        assert_eq!(registry.pending_target(StateId::new(1)), Some(StateId::new(3)));
        assert_eq!(registry.pending_target(StateId::new(0)), Some(StateId::new(3)));
    }

    #[test]
    fn pending_target_is_none_without_any_transition() {
        let mut registry = registry();
        registry.remember(StateId::new(0), StateId::new(2));

        assert_eq!(registry.pending_target(StateId::new(0)), None);
        assert_eq!(registry.pending_target(StateId::new(2)), None);
    }

    #[test]
    fn history_consistency() {
        let mut registry = registry();
        assert!(registry.history_is_consistent(StateId::new(0)));
        assert!(registry.history_is_consistent(StateId::new(1)));

        registry.node_mut(StateId::new(0)).history = Some(StateId::new(0));
        assert!(!registry.history_is_consistent(StateId::new(0)));

        registry.node_mut(StateId::new(2)).history = Some(StateId::new(1));
        assert!(!registry.history_is_consistent(StateId::new(2)));
    }
}
