//! Topologies shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use stepwise_hsm::builder::{simple_transition, RegistryBuilder};
use stepwise_hsm::{Machine, Phase, StateId};

/// Callback log shared between a topology and its test.
pub type Log = Arc<Mutex<Vec<String>>>;

pub struct TwoLayer {
    pub machine: Machine,
    pub log: Log,
    pub top_a: StateId,
    pub sub_a1: StateId,
    pub sub_a2: StateId,
    pub top_b: StateId,
    pub sub_b1: StateId,
}

/// Roots `topA{subA1*, subA2}` and `topB{subB1*}` with
/// `subA1 -> subA2 -> subB1 -> subA1`. Every entry, during and exit
/// callback appends `"<state>.<phase>"` to the log.
pub fn two_layer() -> TwoLayer {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let mut builder = RegistryBuilder::<()>::new();

    let top_a = builder.state("topA");
    let sub_a1 = builder.state("subA1");
    let sub_a2 = builder.state("subA2");
    let top_b = builder.state("topB");
    let sub_b1 = builder.state("subB1");

    builder
        .default_child(top_a, sub_a1)
        .parent(sub_a2, top_a)
        .default_child(top_b, sub_b1)
        .add_transition(sub_a1, simple_transition(sub_a2))
        .add_transition(sub_a2, simple_transition(sub_b1))
        .add_transition(sub_b1, simple_transition(sub_a1));

    for id in [top_a, sub_a1, sub_a2, top_b, sub_b1] {
        record_callbacks(&mut builder, id, &log);
    }

    let registry = builder.build().expect("two-layer topology is valid");
    TwoLayer {
        machine: Machine::build(Some(top_a), Some(registry)),
        log,
        top_a,
        sub_a1,
        sub_a2,
        top_b,
        sub_b1,
    }
}

/// Logged nodes of a nested topology, looked up by name.
pub struct Nested {
    pub machine: Machine,
    pub log: Log,
}

impl Nested {
    pub fn id(&self, name: &str) -> StateId {
        self.machine
            .registry()
            .find(name)
            .unwrap_or_else(|| panic!("no state named {name}"))
    }

    /// Step until `name` is current in `phase`.
    pub fn run_until(&mut self, name: &str, phase: Phase) {
        let id = self.id(name);
        for _ in 0..64 {
            if self.machine.current_state() == Some(id) && self.machine.current_phase() == Some(phase) {
                return;
            }
            self.machine.step(None).unwrap();
        }
        panic!("{name} never reached {phase:?}");
    }
}

/// Build a logged topology from `(name, parent)` pairs and `(source, target)`
/// transitions. The first child listed under a parent is its default child
/// and the first state listed is the initial state.
pub fn nested(states: &[(&str, Option<&str>)], transitions: &[(&str, &str)]) -> Nested {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let mut builder = RegistryBuilder::<()>::new();
    let ids: Vec<StateId> = states.iter().map(|(name, _)| builder.state(*name)).collect();
    let lookup = |name: &str| {
        states
            .iter()
            .position(|(n, _)| *n == name)
            .map(|i| ids[i])
            .unwrap_or_else(|| panic!("no state named {name}"))
    };

    let mut with_default = Vec::new();
    for ((_, parent), id) in states.iter().zip(&ids) {
        if let Some(parent) = parent {
            let parent = lookup(parent);
            if with_default.contains(&parent) {
                builder.parent(*id, parent);
            } else {
                builder.default_child(parent, *id);
                with_default.push(parent);
            }
        }
    }
    for (source, target) in transitions {
        builder.add_transition(lookup(source), simple_transition(lookup(target)));
    }
    for id in &ids {
        record_callbacks(&mut builder, *id, &log);
    }

    let registry = builder.build().expect("nested topology is valid");
    Nested {
        machine: Machine::build(Some(ids[0]), Some(registry)),
        log,
    }
}

/// Two roots handing over to each other.
pub fn on_off() -> (Machine, StateId, StateId) {
    let mut builder = RegistryBuilder::<()>::new();
    let on = builder.state("on");
    let off = builder.state("off");
    builder
        .add_transition(on, simple_transition(off))
        .add_transition(off, simple_transition(on));

    let registry = builder.build().expect("on/off topology is valid");
    (Machine::build(Some(on), Some(registry)), on, off)
}

/// Append `"<state>.entry"`, `"<state>.during"` and `"<state>.exit"` to
/// `log` whenever `id` runs the matching callback.
pub fn record_callbacks(builder: &mut RegistryBuilder, id: StateId, log: &Log) {
    let entry = Arc::clone(log);
    let during = Arc::clone(log);
    let exit = Arc::clone(log);
    builder
        .on_entry(id, move |node, _| {
            entry.lock().unwrap().push(format!("{}.entry", node.name()));
            Ok(())
        })
        .on_during(id, move |node, _| {
            during.lock().unwrap().push(format!("{}.during", node.name()));
            Ok(())
        })
        .on_exit(id, move |node, _| {
            exit.lock().unwrap().push(format!("{}.exit", node.name()));
            Ok(())
        });
}
