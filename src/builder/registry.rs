//! Builder for the node arena.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Action, ActionError, Event, Registry, StateId, StateNode, Transition};
use crate::validation::{TopologyError, TopologyRules, TopologyViolation};
use stillwater::validation::Validation;

/// Builder for a [`Registry`].
///
/// States are declared first and wired together afterwards through the
/// returned [`StateId`] handles, so a topology can be written in any order.
/// Nothing is checked until [`build`](Self::build), which runs the configured
/// [`TopologyRules`] and reports every problem at once.
///
/// # Example
///
/// ```
/// use stepwise_hsm::builder::{simple_transition, RegistryBuilder};
///
/// let mut builder = RegistryBuilder::<()>::new();
/// let off = builder.state("off");
/// let on = builder.state("on");
/// builder
///     .add_transition(off, simple_transition(on))
///     .add_transition(on, simple_transition(off));
///
/// let registry = builder.build().unwrap();
/// assert_eq!(registry.len(), 2);
/// ```
pub struct RegistryBuilder<D = ()> {
    nodes: Vec<StateNode<D>>,
    rules: TopologyRules<D>,
    misuse: Vec<TopologyViolation>,
}

impl<D> RegistryBuilder<D> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            rules: TopologyRules::default(),
            misuse: Vec::new(),
        }
    }

    /// Replace the default topology rules.
    pub fn with_rules(mut self, rules: TopologyRules<D>) -> Self {
        self.rules = rules;
        self
    }

    /// Declare a new state. It starts as a root leaf.
    pub fn state(&mut self, name: impl Into<String>) -> StateId {
        let id = StateId::new(self.nodes.len());
        self.nodes.push(StateNode::new(id, name));
        id
    }

    /// Make `child` a child of `parent` without changing the default child.
    pub fn parent(&mut self, child: StateId, parent: StateId) -> &mut Self {
        if self.known(parent, "parent") {
            if let Some(node) = self.node_mut(child, "parent") {
                node.parent = Some(parent);
            }
        }
        self
    }

    /// Make `child` the state `parent` enters by default. This also sets
    /// the parent link of `child`.
    pub fn default_child(&mut self, parent: StateId, child: StateId) -> &mut Self {
        if self.known(child, "default_child") {
            if let Some(node) = self.node_mut(parent, "default_child") {
                node.default_child = Some(child);
                self.parent(child, parent);
            }
        }
        self
    }

    pub fn on_entry<F>(&mut self, id: StateId, callback: F) -> &mut Self
    where
        F: Fn(&StateNode<D>, Option<&Event<D>>) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        if let Some(node) = self.node_mut(id, "on_entry") {
            node.on_entry = Some(Action::new(callback));
        }
        self
    }

    pub fn on_during<F>(&mut self, id: StateId, callback: F) -> &mut Self
    where
        F: Fn(&StateNode<D>, Option<&Event<D>>) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        if let Some(node) = self.node_mut(id, "on_during") {
            node.on_during = Some(Action::new(callback));
        }
        self
    }

    pub fn on_exit<F>(&mut self, id: StateId, callback: F) -> &mut Self
    where
        F: Fn(&StateNode<D>, Option<&Event<D>>) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        if let Some(node) = self.node_mut(id, "on_exit") {
            node.on_exit = Some(Action::new(callback));
        }
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(
        &mut self,
        source: StateId,
        builder: TransitionBuilder<D>,
    ) -> Result<&mut Self, BuildError> {
        let transition = builder.build()?;
        Ok(self.add_transition(source, transition))
    }

    /// Add a pre-built transition. Transitions are evaluated in the order
    /// they were added.
    pub fn add_transition(&mut self, source: StateId, transition: Transition<D>) -> &mut Self {
        if let Some(node) = self.node_mut(source, "add_transition") {
            node.transitions.push(transition);
        }
        self
    }

    /// Validate the topology and produce the registry with every node in
    /// its initial condition.
    pub fn build(self) -> Result<Registry<D>, TopologyError> {
        let mut registry = Registry::from_nodes(self.nodes);
        let mut violations = self.misuse;

        if let Validation::Failure(errors) = self.rules.check(&registry) {
            violations.extend(errors.iter().cloned());
        }

        if !violations.is_empty() {
            tracing::debug!(
                states = registry.len(),
                violations = violations.len(),
                "rejected state topology"
            );
            return Err(TopologyError::new(violations));
        }

        registry.reset_all();
        Ok(registry)
    }

    fn known(&mut self, id: StateId, call: &str) -> bool {
        if id.index() < self.nodes.len() {
            true
        } else {
            self.misuse.push(TopologyViolation::UnknownState {
                state: format!("<{call}>"),
                target: id,
            });
            false
        }
    }

    fn node_mut(&mut self, id: StateId, call: &str) -> Option<&mut StateNode<D>> {
        if self.known(id, call) {
            self.nodes.get_mut(id.index())
        } else {
            None
        }
    }
}

impl<D> Default for RegistryBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}
