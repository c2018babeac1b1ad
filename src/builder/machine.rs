//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{Registry, StateId};
use crate::engine::{Machine, TraceSink};

/// Builder for constructing state machines with a fluent API.
pub struct MachineBuilder<D = ()> {
    initial: Option<StateId>,
    registry: Option<Registry<D>>,
    sink: Option<Box<dyn TraceSink>>,
}

impl<D> MachineBuilder<D> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            registry: None,
            sink: None,
        }
    }

    /// Set the initial state (required). It must be a root.
    pub fn initial(mut self, state: StateId) -> Self {
        self.initial = Some(state);
        self
    }

    /// Set the registry the machine will own (required).
    pub fn registry(mut self, registry: Registry<D>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Receive a record of every committed step.
    pub fn trace_sink(mut self, sink: impl TraceSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing or the initial state
    /// cannot start a machine.
    pub fn build(self) -> Result<Machine<D>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        let mut registry = self.registry.ok_or(BuildError::MissingRegistry)?;

        if registry.is_empty() {
            return Err(BuildError::EmptyRegistry);
        }

        if !registry.contains(initial) {
            return Err(BuildError::UnknownInitialState { id: initial });
        }
        if registry.has_parent(initial) {
            return Err(BuildError::InitialStateNotRoot {
                name: node_name(&registry, initial).to_string(),
            });
        }

        registry.reset_all();
        tracing::debug!(
            initial = %node_name(&registry, initial),
            states = registry.len(),
            "machine built"
        );

        Ok(Machine::from_parts(initial, registry, self.sink))
    }
}

fn node_name<D>(registry: &Registry<D>, id: StateId) -> &str {
    registry.get(id).map_or("", |node| node.name())
}

impl<D> Default for MachineBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}
