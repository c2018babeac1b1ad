//! Two-layer hierarchical state machine, one step per line of input.
//!
//! Roots `topA` and `topB` each hold substates; `subA1 -> subA2 -> subB1 ->
//! subA1` loops across both roots. Press enter to advance one phase, end
//! input (Ctrl-D) to quit.
//!
//! Run with: cargo run --example two_layer
//! Set RUST_LOG=stepwise_hsm=trace to see the engine's own trace events.

use std::io::{self, BufRead, Write};
use stepwise_hsm::builder::{simple_transition, RegistryBuilder};
use stepwise_hsm::{MachineBuilder, TraceRecord};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

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

    let mut machine = MachineBuilder::new()
        .initial(top_a)
        .registry(builder.build()?)
        .trace_sink(|record: &TraceRecord<'_>| {
            println!(
                "{:>5}({}) -> {:>5}({})",
                record.from, record.from_phase, record.to, record.to_phase
            );
        })
        .build()?;

    println!("Hierarchical state machine\nSystem ready...\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut step = 0;
    loop {
        step += 1;
        print!("[{step:5}] ");
        io::stdout().flush()?;
        machine.step(None)?;

        if lines.next().transpose()?.is_none() {
            break;
        }
    }

    tracing::info!(steps = step, "input closed");
    Ok(())
}
