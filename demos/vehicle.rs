//! Vehicle Host Object
//!
//! A host type embedding a machine and using the `Fsm` shorthand to query
//! and fire events.
//!
//! Run with: cargo run --example vehicle

use barebone_fsm::{transitions, Fsm, Machine, Transition};

struct Vehicle {
    fsm: Machine,
}

impl Vehicle {
    fn new() -> Self {
        let mut fsm = Machine::new();
        fsm.state("parked", |s| {
            s.transitions(transitions! { "start" => "running", "open" => "open" });
        });
        fsm.state("running", |s| {
            s.goto("park", "parked");
        });
        fsm.state("open", |s| {
            s.on("park", |_| Transition::to("parked"));
        });
        Self { fsm }
    }

    fn show(&self) {
        let state = self.current_state().map_or("-", |name| name.as_str());
        println!(
            "state: {state:<8} can start: {:<5} can park: {}",
            self.has_event("start"),
            self.has_event("park")
        );
    }
}

impl Fsm for Vehicle {
    type Data = ();

    fn machine(&self) -> &Machine {
        &self.fsm
    }

    fn machine_mut(&mut self) -> &mut Machine {
        &mut self.fsm
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Vehicle Host Object ===\n");

    let mut vehicle = Vehicle::new();
    vehicle.show();

    vehicle.fire_all(["start", "park"]);
    vehicle.show();

    vehicle.fire("park");
    vehicle.show();

    vehicle.fire("open");
    vehicle.show();

    vehicle.fire("park");
    vehicle.show();

    println!("\n{}", vehicle.machine());
    println!("\n=== Example Complete ===");
}
