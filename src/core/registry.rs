//! The node arena and tree navigation primitives.

use super::state::{Phase, StateId, StateNode};

/// The complete, statically built set of nodes belonging to one machine.
///
/// Nodes reference each other through [`StateId`] handles into this arena.
/// A registry produced by [`RegistryBuilder`](crate::builder::RegistryBuilder)
/// has passed topology validation: every handle is in range and every parent
/// chain ends at a root, so the navigation methods here always terminate.
pub struct Registry<D = ()> {
    nodes: Vec<StateNode<D>>,
}

impl<D> Registry<D> {
    pub(crate) fn from_nodes(nodes: Vec<StateNode<D>>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: StateId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn get(&self, id: StateId) -> Option<&StateNode<D>> {
        self.nodes.get(id.index())
    }

    /// Look a node up by its debug label.
    pub fn find(&self, name: &str) -> Option<StateId> {
        self.nodes.iter().find(|n| n.name == name).map(|n| n.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateNode<D>> {
        self.nodes.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    pub fn has_child(&self, id: StateId) -> bool {
        self.node(id).default_child.is_some()
    }

    pub fn has_parent(&self, id: StateId) -> bool {
        self.node(id).parent.is_some()
    }

    /// Follow parent links up to the root.
    pub fn root_of(&self, id: StateId) -> StateId {
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            current = parent;
        }
        current
    }

    /// The child of `ancestor` on the path down to `target`, or `None` when
    /// `target` is not a strict descendant of `ancestor`.
    pub fn child_towards(&self, ancestor: StateId, target: StateId) -> Option<StateId> {
        let mut current = target;
        while let Some(parent) = self.node(current).parent {
            if parent == ancestor {
                return Some(current);
            }
            current = parent;
        }
        None
    }

    pub fn phase_of(&self, id: StateId) -> Option<Phase> {
        self.get(id).map(|n| n.phase)
    }

    pub fn history_of(&self, id: StateId) -> Option<StateId> {
        self.get(id).and_then(|n| n.history)
    }

    /// Put every node back into its just-built condition: `OnEntry` phase,
    /// history at the default child.
    pub fn reset_all(&mut self) {
        for node in &mut self.nodes {
            node.reset();
        }
    }

    pub(crate) fn node(&self, id: StateId) -> &StateNode<D> {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: StateId) -> &mut StateNode<D> {
        &mut self.nodes[id.index()]
    }
}

impl<D> std::fmt::Debug for Registry<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.nodes.iter()).finish()
    }
}
