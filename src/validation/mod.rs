//! Validation of state topologies before they are run.
//!
//! Rules use Stillwater's `Validation` type to accumulate ALL violations
//! instead of stopping at the first one, so a broken topology is reported
//! in a single pass.
//!
//! # Example
//!
//! ```rust
//! use stepwise_hsm::validation::{TopologyRules, TopologyRulesBuilder};
//!
//! let rules: TopologyRules = TopologyRulesBuilder::<()>::new()
//!     .max_depth(4)
//!     .max_states(64)
//!     .require_pred(
//!         |registry| registry.iter().any(|n| n.is_root()),
//!         "at least one root".to_string(),
//!     )
//!     .build();
//! ```

pub mod builder;
pub mod rules;
pub mod violations;

// Re-export commonly used types
pub use builder::TopologyRulesBuilder;
pub use rules::{CheckResult, TopologyCheck, TopologyRules, DEFAULT_MAX_DEPTH};
pub use violations::{TopologyError, TopologyViolation};
