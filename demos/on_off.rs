//! One-layer on/off switch driven by events.
//!
//! Typing `1` toggles the switch; any other line just advances the machine.
//! The guard only lets a transition fire when the toggle event is present,
//! so the switch holds its position between toggles.
//!
//! Run with: cargo run --example on_off

use std::io::{self, BufRead};
use stepwise_hsm::builder::{guarded_transition, RegistryBuilder};
use stepwise_hsm::{Event, Machine, Phase, StateNode, StepError, StepOutcome};
use tracing_subscriber::EnvFilter;

const TOGGLE: u32 = 1;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut builder = RegistryBuilder::<()>::new();
    let off = builder.state("off");
    let on = builder.state("on");
    let toggled = |_: &StateNode, event: Option<&Event>| event.is_some_and(|e| e.kind == TOGGLE);
    builder
        .add_transition(off, guarded_transition(on, toggled))
        .add_transition(on, guarded_transition(off, toggled))
        .on_entry(on, |_, _| {
            println!("light is on");
            Ok(())
        })
        .on_entry(off, |_, _| {
            println!("light is off");
            Ok(())
        });

    let mut machine = Machine::build(Some(off), Some(builder.build()?));
    if !machine.is_valid() {
        return Err("on/off topology was rejected".into());
    }

    let mut steps = settle(&mut machine)?;
    tracing::info!(steps, state = machine.current_name().unwrap_or("?"), "switch ready");

    for line in io::stdin().lock().lines() {
        let event = match line?.trim().parse::<u32>() {
            Ok(kind) => Some(Event::signal(kind)),
            Err(_) => None,
        };

        let outcome = machine.step(event.as_ref())?;
        steps = 1 + settle(&mut machine)?;

        let status = match outcome {
            StepOutcome::Changed => "event",
            StepOutcome::NoEvent => "tick",
        };
        tracing::info!(
            status,
            steps,
            state = machine.current_name().unwrap_or("?"),
            "processed input"
        );
    }

    Ok(())
}

/// Step until the current state is waiting in its guard check again.
fn settle(machine: &mut Machine) -> Result<usize, StepError> {
    let mut steps = 0;
    while machine.current_phase() != Some(Phase::CheckingGuard) {
        machine.step(None)?;
        steps += 1;
    }
    Ok(steps)
}
