//! Topology rules checked with Validation.

use crate::core::{Registry, StateNode};
use crate::validation::violations::{TopologyError, TopologyViolation};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Deepest nesting accepted unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Outcome of a single topology check.
pub type CheckResult = Validation<(), NonEmptyVec<TopologyViolation>>;

/// Type alias for custom topology check functions
pub type TopologyCheck<D> = Box<dyn Fn(&Registry<D>) -> CheckResult + Send + Sync>;

/// Rules a topology must satisfy before a machine may run it.
/// Uses Validation to accumulate ALL violations.
pub struct TopologyRules<D = ()> {
    pub(crate) max_depth: Option<usize>,
    pub(crate) max_states: Option<usize>,
    pub(crate) required_checks: Vec<TopologyCheck<D>>,
}

impl<D> Default for TopologyRules<D> {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            max_states: None,
            required_checks: Vec::new(),
        }
    }
}

impl<D> TopologyRules<D> {
    /// Check every rule against every node, accumulating ALL violations.
    ///
    /// Only bounded lookups are used here: the registry has not been
    /// proven well formed yet.
    pub fn check(&self, registry: &Registry<D>) -> CheckResult {
        let mut checks: Vec<CheckResult> = Vec::new();

        if let Some(max) = self.max_states {
            checks.push(if registry.len() > max {
                Validation::fail(TopologyViolation::TooManyStates {
                    count: registry.len(),
                    max,
                })
            } else {
                Validation::success(())
            });
        }

        for node in registry.iter() {
            check_links(registry, node, &mut checks);
            checks.push(check_default_child(registry, node));
            checks.push(check_ancestry(registry, node, self.max_depth));
        }

        for check_fn in &self.required_checks {
            checks.push(check_fn(registry));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Run [`check`](Self::check) and convert a failure into a [`TopologyError`].
    pub fn enforce(&self, registry: &Registry<D>) -> Result<(), TopologyError> {
        match self.check(registry) {
            Validation::Success(()) => Ok(()),
            Validation::Failure(errors) => {
                Err(TopologyError::new(errors.iter().cloned().collect()))
            }
        }
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn max_states(&self) -> Option<usize> {
        self.max_states
    }
}

fn check_links<D>(registry: &Registry<D>, node: &StateNode<D>, checks: &mut Vec<CheckResult>) {
    let targets = node
        .parent()
        .into_iter()
        .chain(node.default_child())
        .chain(node.transitions().iter().map(|t| t.target));

    for target in targets {
        if !registry.contains(target) {
            checks.push(Validation::fail(TopologyViolation::UnknownState {
                state: node.name().to_string(),
                target,
            }));
        }
    }
}

fn check_default_child<D>(registry: &Registry<D>, node: &StateNode<D>) -> CheckResult {
    let Some(child) = node.default_child().and_then(|id| registry.get(id)) else {
        return Validation::success(());
    };
    if child.parent() == Some(node.id()) {
        Validation::success(())
    } else {
        Validation::fail(TopologyViolation::DefaultChildNotChild {
            state: node.name().to_string(),
            child: child.name().to_string(),
        })
    }
}

fn check_ancestry<D>(
    registry: &Registry<D>,
    node: &StateNode<D>,
    max_depth: Option<usize>,
) -> CheckResult {
    let mut depth = 0;
    let mut current = node;
    while let Some(parent) = current.parent().and_then(|id| registry.get(id)) {
        depth += 1;
        if depth > registry.len() {
            return Validation::fail(TopologyViolation::ParentCycle {
                state: node.name().to_string(),
            });
        }
        current = parent;
    }

    match max_depth {
        Some(max) if depth > max => Validation::fail(TopologyViolation::DepthExceeded {
            state: node.name().to_string(),
            depth,
            max,
        }),
        _ => Validation::success(()),
    }
}
