//! Stepwise: a reentrant hierarchical state machine engine
//!
//! States nest: a composite state enters its default child, remembers the
//! child it last left, and resumes there. The engine is deliberately
//! incremental. Each call to [`Machine::step`] processes one phase of one
//! state and returns, so the work done per call is bounded and nothing
//! recurses. A single event may take several steps to settle.
//!
//! # Core Concepts
//!
//! - **Registry**: an arena of state nodes linked by [`StateId`] handles
//! - **Phases**: every state cycles through entry, during, guard checking and exit
//! - **History**: each composite remembers the child it should resume at
//! - **Validation**: topologies are checked up front, reporting every violation
//!
//! # Example
//!
//! ```rust
//! use stepwise_hsm::builder::{simple_transition, RegistryBuilder};
//! use stepwise_hsm::{Machine, Phase, StepOutcome};
//!
//! let mut builder = RegistryBuilder::<()>::new();
//! let top_a = builder.state("topA");
//! let sub_a1 = builder.state("subA1");
//! let sub_a2 = builder.state("subA2");
//! let top_b = builder.state("topB");
//! let sub_b1 = builder.state("subB1");
//! builder
//!     .default_child(top_a, sub_a1)
//!     .parent(sub_a2, top_a)
//!     .default_child(top_b, sub_b1)
//!     .add_transition(sub_a1, simple_transition(sub_a2))
//!     .add_transition(sub_a2, simple_transition(sub_b1))
//!     .add_transition(sub_b1, simple_transition(sub_a1));
//!
//! let mut machine = Machine::build(Some(top_a), Some(builder.build().unwrap()));
//!
//! assert_eq!(machine.step(None), Ok(StepOutcome::NoEvent));
//! assert_eq!(machine.current_state(), Some(sub_a1));
//! assert_eq!(machine.current_phase(), Some(Phase::OnEntry));
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod engine;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder, RegistryBuilder, TransitionBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use self::core::{Event, Phase, Registry, StateId, StateNode};
pub use engine::{Machine, StepError, StepOutcome, TraceRecord, TraceSink, TracingSink};
pub use validation::{TopologyError, TopologyRules};
