//! The phase engine.
//!
//! A step is split in three parts. The plan decides, from the current node
//! and its phase alone, which callback runs and what the step changes. The
//! callback runs next. Only when it succeeds is the plan committed, so a
//! failing callback leaves the machine exactly as it was.

use super::error::{StepError, StepOutcome};
use super::machine::Machine;
use super::trace::TraceRecord;
use crate::core::{Action, ActionError, Event, Phase, Registry, StateId, StateNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Callback {
    Entry,
    During,
    TransitionAction,
    Exit,
    Nothing,
}

/// Everything one step changes.
#[derive(Debug, Clone, Copy)]
struct StepPlan {
    callback: Callback,
    next: StateId,
    /// New phase of the processed node; `None` leaves it unchanged.
    phase: Option<Phase>,
    parent_phase: Option<(StateId, Phase)>,
    history: Option<(StateId, StateId)>,
    message: &'static str,
}

impl StepPlan {
    fn new(callback: Callback, next: StateId, phase: Option<Phase>, message: &'static str) -> Self {
        Self {
            callback,
            next,
            phase,
            parent_phase: None,
            history: None,
            message,
        }
    }

    fn with_parent_phase(mut self, parent: StateId, phase: Phase) -> Self {
        self.parent_phase = Some((parent, phase));
        self
    }

    fn with_history(mut self, parent: StateId, child: StateId) -> Self {
        self.history = Some((parent, child));
        self
    }
}

impl<D> Machine<D> {
    /// Process exactly one phase of the current node.
    ///
    /// Returns [`StepOutcome::NoEvent`] whenever `event` is `None`, whether
    /// or not the machine moved, and [`StepOutcome::Changed`] otherwise.
    /// Several steps are usually needed before an event is fully absorbed.
    ///
    /// # Errors
    ///
    /// - [`StepError::InvalidMachine`] if the machine was not built successfully.
    /// - [`StepError::ActionFailed`] if the callback of this phase failed.
    /// - [`StepError::NoPendingTransition`] if a node is exiting without a
    ///   resolvable target.
    ///
    /// On error nothing is modified.
    pub fn step(&mut self, event: Option<&Event<D>>) -> Result<StepOutcome, StepError> {
        let current = self.current.ok_or(StepError::InvalidMachine)?;
        let from_phase = self.registry.node(current).phase;

        let plan = plan(&self.registry, current, event)?;
        run_callback(self.registry.node(current), plan.callback, event)?;
        commit(&mut self.registry, current, &plan);
        self.current = Some(plan.next);

        debug_assert!(
            self.registry.history_is_consistent(current),
            "history of '{}' escaped its children",
            self.registry.node(current).name
        );

        let from = self.registry.node(current);
        let to = self.registry.node(plan.next);
        tracing::trace!(
            from = %from.name,
            from_phase = from_phase.name(),
            to = %to.name,
            to_phase = to.phase.name(),
            "{}",
            plan.message
        );
        if let Some(sink) = &self.sink {
            sink.record(&TraceRecord {
                from: &from.name,
                from_phase,
                to: &to.name,
                to_phase: to.phase,
                message: plan.message,
            });
        }

        Ok(match event {
            Some(_) => StepOutcome::Changed,
            None => StepOutcome::NoEvent,
        })
    }
}

fn plan<D>(
    registry: &Registry<D>,
    id: StateId,
    event: Option<&Event<D>>,
) -> Result<StepPlan, StepError> {
    let node = registry.node(id);

    let plan = match node.phase {
        Phase::OnEntry => match node.default_child {
            Some(child) => StepPlan::new(
                Callback::Entry,
                child,
                Some(Phase::During),
                "entered, descending to default child",
            ),
            None => StepPlan::new(
                Callback::Entry,
                registry.root_of(id),
                Some(Phase::During),
                "entered, returning to root",
            ),
        },

        Phase::During => match registry.during_child(id) {
            Some(child) => StepPlan::new(
                Callback::During,
                child,
                Some(Phase::CheckingGuard),
                "during, descending to active child",
            ),
            None => StepPlan::new(
                Callback::During,
                registry.root_of(id),
                Some(Phase::CheckingGuard),
                "during, returning to root",
            ),
        },

        Phase::CheckingGuard => {
            let fires = node.transitions.first().map(|t| t.can_fire(node, event));
            match (fires, node.default_child) {
                (Some(true), _) => StepPlan::new(
                    Callback::TransitionAction,
                    id,
                    Some(Phase::OnExit),
                    "transition fires",
                ),
                (None | Some(false), Some(default)) => StepPlan::new(
                    Callback::Nothing,
                    node.history.unwrap_or(default),
                    Some(Phase::During),
                    "no transition, resuming history child",
                ),
                (None, None) => StepPlan::new(
                    Callback::Nothing,
                    registry.root_of(id),
                    None,
                    "no transition, returning to root",
                ),
                (Some(false), None) => StepPlan::new(
                    Callback::Nothing,
                    registry.root_of(id),
                    Some(Phase::During),
                    "guard rejected, returning to root",
                ),
            }
        }

        Phase::OnExit => {
            let target =
                registry
                    .pending_target(id)
                    .ok_or_else(|| StepError::NoPendingTransition {
                        state: node.name.clone(),
                    })?;

            match node.parent {
                Some(parent) => match registry.child_towards(parent, target) {
                    // the parent is the common ancestor; the exit stops here
                    Some(branch) => StepPlan::new(
                        Callback::Exit,
                        branch,
                        Some(Phase::OnEntry),
                        if branch == target {
                            "exited, entering sibling"
                        } else {
                            "exited, entering branch holding target"
                        },
                    )
                    .with_history(parent, branch),
                    None => StepPlan::new(
                        Callback::Exit,
                        parent,
                        Some(Phase::OnEntry),
                        "exited, cascading to parent",
                    )
                    .with_parent_phase(parent, Phase::OnExit),
                },
                None => StepPlan::new(
                    Callback::Exit,
                    registry.root_of(target),
                    Some(Phase::OnEntry),
                    "exited, entering target root",
                ),
            }
        }
    };

    Ok(plan)
}

fn run_callback<D>(
    node: &StateNode<D>,
    callback: Callback,
    event: Option<&Event<D>>,
) -> Result<(), StepError> {
    let (result, phase) = match callback {
        Callback::Entry => (run(node.on_entry.as_ref(), node, event), Phase::OnEntry),
        Callback::During => (run(node.on_during.as_ref(), node, event), Phase::During),
        Callback::Exit => (run(node.on_exit.as_ref(), node, event), Phase::OnExit),
        Callback::TransitionAction => (
            node.transitions
                .first()
                .map_or(Ok(()), |t| t.take_action(node, event)),
            Phase::CheckingGuard,
        ),
        Callback::Nothing => return Ok(()),
    };

    result.map_err(|source| StepError::ActionFailed {
        state: node.name.clone(),
        phase,
        source,
    })
}

fn run<D>(
    action: Option<&Action<D>>,
    node: &StateNode<D>,
    event: Option<&Event<D>>,
) -> Result<(), ActionError> {
    action.map_or(Ok(()), |a| a.run(node, event))
}

fn commit<D>(registry: &mut Registry<D>, id: StateId, plan: &StepPlan) {
    if let Some(phase) = plan.phase {
        registry.node_mut(id).phase = phase;
    }
    if let Some((parent, phase)) = plan.parent_phase {
        registry.node_mut(parent).phase = phase;
    }
    if let Some((parent, child)) = plan.history {
        registry.remember(parent, child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{guarded_transition, simple_transition, RegistryBuilder, TransitionBuilder};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Root `top` with leaves `a` (default) and `b`, `a -> b`.
    fn siblings() -> (Machine, StateId, StateId, StateId) {
        let mut builder = RegistryBuilder::<()>::new();
        let top = builder.state("top");
        let a = builder.state("a");
        let b = builder.state("b");
        builder
            .default_child(top, a)
            .parent(b, top)
            .add_transition(a, simple_transition(b));
        let machine = Machine::build(Some(top), Some(builder.build().unwrap()));
        (machine, top, a, b)
    }

    fn run_until(machine: &mut Machine, id: StateId, phase: Phase) {
        for _ in 0..32 {
            if machine.current_state() == Some(id) && machine.phase_of(id) == Some(phase) {
                return;
            }
            machine.step(None).unwrap();
        }
        panic!("never reached {id} in {phase}");
    }

    #[test]
    fn entry_descends_to_default_child() {
        let (mut machine, top, a, _) = siblings();

        machine.step(None).unwrap();

        assert_eq!(machine.current_state(), Some(a));
        assert_eq!(machine.phase_of(top), Some(Phase::During));
    }

    #[test]
    fn sibling_exit_only_updates_parent_history() {
        let (mut machine, top, a, b) = siblings();
        run_until(&mut machine, a, Phase::OnExit);
        let parent_phase = machine.phase_of(top);

        machine.step(None).unwrap();

        assert_eq!(machine.current_state(), Some(b));
        assert_eq!(machine.history_of(top), Some(b));
        assert_eq!(machine.phase_of(top), parent_phase);
        assert_eq!(machine.phase_of(a), Some(Phase::OnEntry));
    }

    #[test]
    fn exit_stops_at_common_ancestor() {
        // top { left { a }, right { b } }   a -> b
        let mut builder = RegistryBuilder::<()>::new();
        let top = builder.state("top");
        let left = builder.state("left");
        let a = builder.state("a");
        let right = builder.state("right");
        let b = builder.state("b");
        builder
            .default_child(top, left)
            .default_child(left, a)
            .parent(right, top)
            .default_child(right, b)
            .add_transition(a, simple_transition(b));
        let mut machine = Machine::build(Some(top), Some(builder.build().unwrap()));
        run_until(&mut machine, a, Phase::OnExit);
        let top_phase = machine.phase_of(top);

        machine.step(None).unwrap();
        assert_eq!(machine.current_state(), Some(left));
        assert_eq!(machine.current_phase(), Some(Phase::OnExit));

        machine.step(None).unwrap();
        assert_eq!(machine.current_state(), Some(right));
        assert_eq!(machine.current_phase(), Some(Phase::OnEntry));
        assert_eq!(machine.phase_of(left), Some(Phase::OnEntry));
        assert_eq!(machine.phase_of(top), top_phase);
        assert_eq!(machine.history_of(top), Some(right));

        machine.step(None).unwrap();
        assert_eq!(machine.current_state(), Some(b));
    }

    #[test]
    fn leaf_without_transitions_keeps_guard_phase() {
        let (mut machine, _, _, b) = siblings();
        run_until(&mut machine, b, Phase::CheckingGuard);

        machine.step(None).unwrap();

        assert_eq!(machine.phase_of(b), Some(Phase::CheckingGuard));
    }

    #[test]
    fn rejected_guard_on_leaf_falls_back_to_during() {
        let mut builder = RegistryBuilder::<()>::new();
        let idle = builder.state("idle");
        let busy = builder.state("busy");
        builder.add_transition(idle, guarded_transition(busy, |_, event| event.is_some()));
        let mut machine = Machine::build(Some(idle), Some(builder.build().unwrap()));

        machine.step(None).unwrap();
        machine.step(None).unwrap();
        assert_eq!(machine.current_phase(), Some(Phase::CheckingGuard));

        machine.step(None).unwrap();
        assert_eq!(machine.current_state(), Some(idle));
        assert_eq!(machine.current_phase(), Some(Phase::During));

        machine.step(None).unwrap();
        let outcome = machine.step(Some(&Event::signal(1))).unwrap();
        assert_eq!(outcome, StepOutcome::Changed);
        assert_eq!(machine.current_phase(), Some(Phase::OnExit));
    }

    #[test]
    fn rejected_guard_on_composite_resumes_history() {
        let mut builder = RegistryBuilder::<()>::new();
        let top = builder.state("top");
        let child = builder.state("child");
        let other = builder.state("other");
        builder
            .default_child(top, child)
            .add_transition(top, guarded_transition(other, |_, _| false));
        let mut machine = Machine::build(Some(top), Some(builder.build().unwrap()));
        run_until(&mut machine, top, Phase::CheckingGuard);

        machine.step(None).unwrap();

        assert_eq!(machine.current_state(), Some(child));
        assert_eq!(machine.phase_of(top), Some(Phase::During));
    }

    #[test]
    fn failing_callback_commits_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);

        let mut builder = RegistryBuilder::<()>::new();
        let top = builder.state("top");
        let child = builder.state("child");
        builder.default_child(top, child).on_entry(top, move |_, _| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            Err(ActionError::new("refused"))
        });
        let mut machine = Machine::build(Some(top), Some(builder.build().unwrap()));

        let err = machine.step(None).unwrap_err();

        assert!(matches!(
            err,
            StepError::ActionFailed {
                phase: Phase::OnEntry,
                ..
            }
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(machine.current_state(), Some(top));
        assert_eq!(machine.phase_of(top), Some(Phase::OnEntry));
    }

    #[test]
    fn transition_action_runs_when_guard_passes() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = Arc::clone(&fired);

        let mut builder = RegistryBuilder::<()>::new();
        let a = builder.state("a");
        let b = builder.state("b");
        builder
            .transition(
                a,
                TransitionBuilder::new()
                    .to(b)
                    .action(move |_, _| {
                        fired_clone.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    }),
            )
            .unwrap();
        let mut machine = Machine::build(Some(a), Some(builder.build().unwrap()));

        run_until(&mut machine, a, Phase::OnExit);
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        machine.step(None).unwrap();
        assert_eq!(machine.current_state(), Some(b));
    }

    #[test]
    fn exit_without_target_is_an_error() {
        let mut builder = RegistryBuilder::<()>::new();
        let top = builder.state("top");
        let child = builder.state("child");
        builder.default_child(top, child);
        let mut machine = Machine::build(Some(top), Some(builder.build().unwrap()));
        // force the root into an exit it cannot resolve
        machine.registry.node_mut(top).phase = Phase::OnExit;

        let err = machine.step(None).unwrap_err();

        assert_eq!(
            err,
            StepError::NoPendingTransition {
                state: "top".to_string()
            }
        );
        assert_eq!(machine.phase_of(top), Some(Phase::OnExit));
    }
}
