//! Microwave State Machine
//!
//! A machine with no default state: the first declared state is the initial
//! one, and every handler reports the state and event it fired on.
//!
//! Run with: cargo run --example microwave

use barebone_fsm::{Context, Machine, Transition};

fn report(target: &'static str) -> impl FnMut(&mut Context<'_, ()>) -> Transition {
    move |ctx: &mut Context<'_, ()>| {
        println!("[{}]->{}", ctx.state(), ctx.event());
        Transition::to(target)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Microwave State Machine ===\n");

    let mut microwave = Machine::new();
    microwave.state("stopped", |s| {
        s.on("open", report("open"));
        s.on("start", report("started"));
    });
    microwave.state("open", |s| {
        s.on("close", report("stopped"));
    });
    microwave.state("started", |s| {
        s.on("open", report("open"));
        s.on("stop", report("stopped"));
        s.on_enter(|_| println!("  heating..."));
        s.on_exit(|_| println!("  beep"));
    });

    microwave.dispatch_all(["open", "close", "start", "open", "close", "start", "stop"]);

    println!("\n{microwave}");
    println!("\n=== Example Complete ===");
}
