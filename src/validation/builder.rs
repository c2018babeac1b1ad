//! Builder API for configuring topology rules.

use crate::core::Registry;
use crate::validation::rules::{CheckResult, TopologyCheck, TopologyRules, DEFAULT_MAX_DEPTH};
use crate::validation::violations::TopologyViolation;
use stillwater::validation::Validation;

/// Builder for creating topology rules
pub struct TopologyRulesBuilder<D = ()> {
    max_depth: Option<usize>,
    max_states: Option<usize>,
    required_checks: Vec<TopologyCheck<D>>,
}

impl<D> TopologyRulesBuilder<D> {
    pub fn new() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            max_states: None,
            required_checks: Vec::new(),
        }
    }

    /// Set the deepest allowed nesting (roots are depth 0)
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Accept any nesting depth
    pub fn unlimited_depth(mut self) -> Self {
        self.max_depth = None;
        self
    }

    /// Set the largest allowed number of states
    pub fn max_states(mut self, count: usize) -> Self {
        self.max_states = Some(count);
        self
    }

    /// Add a custom validation check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&Registry<D>) -> CheckResult + Send + Sync + 'static,
    {
        self.required_checks.push(Box::new(check));
        self
    }

    /// Add a simple predicate check with error message
    pub fn require_pred<F>(mut self, predicate: F, error_msg: String) -> Self
    where
        F: Fn(&Registry<D>) -> bool + Send + Sync + 'static,
    {
        let check = move |registry: &Registry<D>| {
            if predicate(registry) {
                Validation::success(())
            } else {
                Validation::fail(TopologyViolation::CustomCheckFailed {
                    message: error_msg.clone(),
                })
            }
        };
        self.required_checks.push(Box::new(check));
        self
    }

    /// Build the topology rules
    pub fn build(self) -> TopologyRules<D> {
        TopologyRules {
            max_depth: self.max_depth,
            max_states: self.max_states,
            required_checks: self.required_checks,
        }
    }
}

impl<D> Default for TopologyRulesBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}
