//! A machine owning one registry and driving it one phase at a time.

use super::error::StepError;
use super::trace::TraceSink;
use crate::builder::MachineBuilder;
use crate::core::{Phase, Registry, StateId};

/// A hierarchical state machine.
///
/// The machine owns its [`Registry`] and is the only thing that mutates the
/// runtime fields of its nodes. A machine whose build failed is kept around
/// in a cleared state (see [`is_valid`](Self::is_valid)); every call on it
/// reports [`StepError::InvalidMachine`].
pub struct Machine<D = ()> {
    pub(super) registry: Registry<D>,
    pub(super) initial: Option<StateId>,
    pub(super) current: Option<StateId>,
    pub(super) sink: Option<Box<dyn TraceSink>>,
}

impl<D> Machine<D> {
    pub(crate) fn from_parts(
        initial: StateId,
        registry: Registry<D>,
        sink: Option<Box<dyn TraceSink>>,
    ) -> Self {
        Self {
            registry,
            initial: Some(initial),
            current: Some(initial),
            sink,
        }
    }

    /// Build a machine starting at `initial`, failing closed.
    ///
    /// Any problem that [`MachineBuilder::build`] would report is logged and
    /// yields an invalid machine instead of an error.
    pub fn build(initial: Option<StateId>, registry: Option<Registry<D>>) -> Self {
        let mut builder = MachineBuilder::new();
        if let Some(initial) = initial {
            builder = builder.initial(initial);
        }
        if let Some(registry) = registry {
            builder = builder.registry(registry);
        }

        builder.build().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "machine build rejected");
            Self::default()
        })
    }

    /// Whether the machine was built successfully.
    pub fn is_valid(&self) -> bool {
        self.current.is_some()
    }

    /// Return to the just-built condition: the current state is the initial
    /// state again and every node is back in `OnEntry` with its history at
    /// the default child. The topology is not validated again.
    pub fn reset(&mut self) -> Result<(), StepError> {
        let initial = self.initial.ok_or(StepError::InvalidMachine)?;
        self.registry.reset_all();
        self.current = Some(initial);
        tracing::debug!(initial = %self.registry.node(initial).name(), "machine reset");
        Ok(())
    }

    pub fn current_state(&self) -> Option<StateId> {
        self.current
    }

    pub fn initial_state(&self) -> Option<StateId> {
        self.initial
    }

    /// Phase the current state will process on the next step.
    pub fn current_phase(&self) -> Option<Phase> {
        self.current.and_then(|id| self.registry.phase_of(id))
    }

    pub fn registry(&self) -> &Registry<D> {
        &self.registry
    }

    pub fn phase_of(&self, id: StateId) -> Option<Phase> {
        self.registry.phase_of(id)
    }

    pub fn history_of(&self, id: StateId) -> Option<StateId> {
        self.registry.history_of(id)
    }

    pub(crate) fn registry_mut(&mut self) -> &mut Registry<D> {
        &mut self.registry
    }

    pub(crate) fn set_current(&mut self, id: StateId) {
        self.current = Some(id);
    }

    /// Name of the current state, for logs and diagnostics.
    pub fn current_name(&self) -> Option<&str> {
        self.current
            .and_then(|id| self.registry.get(id))
            .map(|node| node.name())
    }
}

impl<D> Default for Machine<D> {
    /// The invalid machine: no initial or current state, empty registry.
    fn default() -> Self {
        Self {
            registry: Registry::from_nodes(Vec::new()),
            initial: None,
            current: None,
            sink: None,
        }
    }
}

impl<D> std::fmt::Debug for Machine<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("initial", &self.initial)
            .field("current", &self.current)
            .field("phase", &self.current_phase())
            .field("states", &self.registry.len())
            .field("traced", &self.sink.is_some())
            .finish()
    }
}
