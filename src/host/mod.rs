//! Host-facing shorthand over a machine.
//!
//! A host object that embeds a [`Machine`] implements [`Fsm`] by exposing
//! it, and gets event queries and firing for free. None of these methods carry
//! transition logic of their own.

mod shared;

pub use shared::{SharedMachine, WeakMachine};

use crate::core::Name;
use crate::machine::Machine;

/// Query and fire shorthand for anything that owns a machine.
///
/// # Example
///
/// ```rust
/// use barebone_fsm::{transitions, Fsm, Machine};
///
/// struct Vehicle {
///     fsm: Machine,
/// }
///
/// impl Fsm for Vehicle {
///     type Data = ();
///
///     fn machine(&self) -> &Machine {
///         &self.fsm
///     }
///
///     fn machine_mut(&mut self) -> &mut Machine {
///         &mut self.fsm
///     }
/// }
///
/// let mut fsm = Machine::new();
/// fsm.state("parked", |s| {
///     s.transitions(transitions! { "start" => "running" });
/// });
/// fsm.state("running", |s| {
///     s.goto("park", "parked");
/// });
///
/// let mut vehicle = Vehicle { fsm };
/// assert!(vehicle.is_state("parked"));
/// assert!(vehicle.has_event("start"));
///
/// vehicle.fire("start");
/// assert!(vehicle.is_state("running"));
/// assert!(!vehicle.has_event("start"));
/// ```
pub trait Fsm {
    /// Host data held by the embedded machine.
    type Data;

    fn machine(&self) -> &Machine<Self::Data>;

    fn machine_mut(&mut self) -> &mut Machine<Self::Data>;

    /// Name of the current state.
    fn current_state(&self) -> Option<&Name> {
        self.machine().current_state()
    }

    /// Check if the current state has a handler registered for `event`.
    ///
    /// Only an exact registration counts; a `"default"` catch-all does not.
    fn has_event(&self, event: &str) -> bool {
        self.machine()
            .current()
            .is_some_and(|state| state.has_event(event))
    }

    /// Check if the current state is `name`.
    fn is_state(&self, name: &str) -> bool {
        self.machine()
            .current_state()
            .is_some_and(|current| current == name)
    }

    /// Dispatch a single event.
    fn fire(&mut self, event: impl Into<Name>)
    where
        Self: Sized,
    {
        self.machine_mut().dispatch(event);
    }

    /// Dispatch events in order.
    fn fire_all<I>(&mut self, events: I)
    where
        I: IntoIterator,
        I::Item: Into<Name>,
        Self: Sized,
    {
        self.machine_mut().dispatch_all(events);
    }
}

impl<D> Fsm for Machine<D> {
    type Data = D;

    fn machine(&self) -> &Machine<D> {
        self
    }

    fn machine_mut(&mut self) -> &mut Machine<D> {
        self
    }
}
