//! Topology violations and the error that collects them.

use crate::core::StateId;
use thiserror::Error;

/// A single defect found while validating a topology.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TopologyViolation {
    #[error("state '{state}' references unknown state {target}")]
    UnknownState { state: String, target: StateId },

    #[error("default child '{child}' of '{state}' does not have '{state}' as its parent")]
    DefaultChildNotChild { state: String, child: String },

    #[error("parent chain of '{state}' never reaches a root")]
    ParentCycle { state: String },

    #[error("state '{state}' is nested {depth} levels deep (max {max})")]
    DepthExceeded {
        state: String,
        depth: usize,
        max: usize,
    },

    #[error("topology has {count} states (max {max})")]
    TooManyStates { count: usize, max: usize },

    #[error("Custom check failed: {message}")]
    CustomCheckFailed { message: String },
}

/// Every violation found in a rejected topology.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid topology{}", list(.violations))]
pub struct TopologyError {
    violations: Vec<TopologyViolation>,
}

impl TopologyError {
    pub(crate) fn new(violations: Vec<TopologyViolation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[TopologyViolation] {
        &self.violations
    }
}

fn list(violations: &[TopologyViolation]) -> String {
    violations.iter().map(|v| format!("; {v}")).collect()
}
