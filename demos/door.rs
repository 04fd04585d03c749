//! Door State Machine
//!
//! A door that can be opened and closed, counting every real transition in
//! host data. Unknown events leave the door where it is.
//!
//! Run with: RUST_LOG=barebone_fsm=debug cargo run --example door

use barebone_fsm::{transitions, MachineBuilder, Transition};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Door State Machine ===\n");

    let mut door = MachineBuilder::with_data(0_u32)
        .state("default", |s| {
            s.transitions(transitions! { "open" => "open", "close" => "close" });
        })
        .state("open", |s| {
            s.on("close", |ctx| {
                *ctx.data_mut() += 1;
                println!("{} transition: open->close", ctx.data());
                Transition::to("close")
            });
        })
        .state("close", |s| {
            s.on("open", |ctx| {
                *ctx.data_mut() += 1;
                println!("{} transition: close->open", ctx.data());
                Transition::to("open")
            });
        })
        .build();

    println!("{door}\n");

    door.dispatch_all(["close", "open", "close", "undefined", "open", "close"]);

    println!("\n{door}");
    println!("Transitions counted: {}", door.data());

    println!("\n=== Example Complete ===");
}
