//! Builder for constructing machines.

use crate::core::{Name, State};
use crate::machine::Machine;
use std::fmt;

/// Deferred state configuration.
type Configure<D> = Box<dyn FnOnce(&mut State<D>)>;

/// Builder for constructing machines with a fluent API.
///
/// States are declared on the machine in the order they were added to the
/// builder. The default state, if any, is registered before all of them no
/// matter when `default_state` was called.
///
/// # Example
///
/// ```rust
/// use barebone_fsm::MachineBuilder;
///
/// let mut machine = MachineBuilder::new()
///     .state("parked", |s| {
///         s.goto("start", "running");
///     })
///     .state("running", |s| {
///         s.goto("park", "parked");
///     })
///     .build();
///
/// machine.dispatch("start");
/// assert_eq!(machine.current_state().unwrap(), "running");
/// ```
pub struct MachineBuilder<D = ()> {
    default: Option<Name>,
    states: Vec<(Name, Configure<D>)>,
    data: D,
}

impl MachineBuilder<()> {
    /// Create a new builder with no host data.
    pub fn new() -> Self {
        Self::with_data(())
    }
}

impl<D> MachineBuilder<D> {
    /// Create a new builder whose machine will hold `data`.
    pub fn with_data(data: D) -> Self {
        Self {
            default: None,
            states: Vec::new(),
            data,
        }
    }

    /// Set the default state (optional).
    pub fn default_state(mut self, name: impl Into<Name>) -> Self {
        self.default = Some(name.into());
        self
    }

    /// Declare a state and configure its handlers.
    pub fn state<F>(mut self, name: impl Into<Name>, configure: F) -> Self
    where
        F: FnOnce(&mut State<D>) + 'static,
    {
        self.states.push((name.into(), Box::new(configure)));
        self
    }

    /// Build the machine.
    pub fn build(self) -> Machine<D> {
        let mut machine = match self.default {
            Some(default) => Machine::with_default_and_data(default, self.data),
            None => Machine::with_data(self.data),
        };
        for (name, configure) in self.states {
            machine.state(name, configure);
        }
        machine
    }
}

impl<D: Default> Default for MachineBuilder<D> {
    fn default() -> Self {
        Self::with_data(D::default())
    }
}

impl<D> fmt::Debug for MachineBuilder<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineBuilder")
            .field("default", &self.default)
            .field(
                "states",
                &self.states.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
