//! The phase engine: a [`Machine`] owns a registry and advances it one
//! phase of one state per [`step`](Machine::step).
//!
//! Each state cycles through `OnEntry`, `During`, `CheckingGuard` and
//! `OnExit`. Control returns to the root after every leaf phase, so a step
//! does a bounded amount of work and never recurses: running to quiescence
//! is left to the caller.

mod error;
mod machine;
mod step;
mod trace;

pub use error::{StepError, StepOutcome};
pub use machine::Machine;
pub use trace::{TraceRecord, TraceSink, TracingSink};
