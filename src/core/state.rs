//! State nodes of the static state tree.
//!
//! A [`StateNode`] is one record in a registry arena. Its static links
//! (`parent`, `default_child`, transitions) never change after the registry
//! is built; its runtime fields (`phase`, `history`) are owned and mutated
//! only by the machine that owns the registry.

use super::action::Action;
use super::transition::Transition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle of a state inside its registry.
///
/// Handles are dense indices handed out in declaration order by
/// [`RegistryBuilder::state`](crate::builder::RegistryBuilder::state).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(usize);

impl StateId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the state in its registry.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The sub-step of a single node's processing cycle.
///
/// Phases are scoped per node: two nodes can be mid-cycle in different
/// phases at the same time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    OnEntry,
    During,
    CheckingGuard,
    OnExit,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::OnEntry => "on_entry",
            Self::During => "during",
            Self::CheckingGuard => "checking_guard",
            Self::OnExit => "on_exit",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node in the static state tree.
///
/// A node with a default child is *composite*; without one it is a *leaf*.
/// A node without a parent is a *root* and may start a machine.
pub struct StateNode<D = ()> {
    pub(crate) id: StateId,
    pub(crate) name: String,
    pub(crate) default_child: Option<StateId>,
    pub(crate) parent: Option<StateId>,
    pub(crate) on_entry: Option<Action<D>>,
    pub(crate) on_during: Option<Action<D>>,
    pub(crate) on_exit: Option<Action<D>>,
    pub(crate) transitions: Vec<Transition<D>>,
    pub(crate) history: Option<StateId>,
    pub(crate) phase: Phase,
}

impl<D> StateNode<D> {
    pub(crate) fn new(id: StateId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            default_child: None,
            parent: None,
            on_entry: None,
            on_during: None,
            on_exit: None,
            transitions: Vec::new(),
            history: None,
            phase: Phase::OnEntry,
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    /// Debug label. Has no effect on behavior.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<StateId> {
        self.parent
    }

    pub fn default_child(&self) -> Option<StateId> {
        self.default_child
    }

    /// The child this composite resumes at during its `During` and
    /// `CheckingGuard` passes. Always `None` for leaves.
    pub fn history_child(&self) -> Option<StateId> {
        self.history
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Outgoing transitions in declaration order.
    pub fn transitions(&self) -> &[Transition<D>] {
        &self.transitions
    }

    pub fn is_composite(&self) -> bool {
        self.default_child.is_some()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Restore the just-built runtime condition of this node.
    pub(crate) fn reset(&mut self) {
        self.phase = Phase::OnEntry;
        self.history = self.default_child;
    }
}

impl<D> fmt::Debug for StateNode<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateNode")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("default_child", &self.default_child)
            .field("parent", &self.parent)
            .field("transitions", &self.transitions.len())
            .field("history", &self.history)
            .field("phase", &self.phase)
            .finish()
    }
}
