//! The state machine: state registry, current/default pointers and dispatch.

use crate::core::{Name, State, Transition, ENTER_HOOK, EXIT_HOOK};
use indexmap::IndexMap;
use std::fmt;
use tracing::{debug, trace};

/// Finite-state machine over named states.
///
/// States are created on first reference. The first state ever referenced
/// becomes the current state, unless a default state was given at
/// construction, in which case the default state is current from the start.
///
/// `D` is host data that every handler can read and modify.
///
/// # Example
///
/// ```rust
/// use barebone_fsm::Machine;
///
/// let mut machine = Machine::with_default("closed");
/// machine.state("closed", |s| {
///     s.goto("open", "opened");
/// });
/// machine.state("opened", |s| {
///     s.goto("close", "closed");
/// });
///
/// machine.dispatch("open");
/// assert_eq!(machine.current_state().unwrap(), "opened");
///
/// // No handler and no valid target: fall back to the default state.
/// machine.dispatch("kick");
/// assert_eq!(machine.current_state().unwrap(), "closed");
/// ```
pub struct Machine<D = ()> {
    states: IndexMap<Name, State<D>>,
    current: Option<Name>,
    default: Option<Name>,
    last_event: Option<Name>,
    data: D,
}

impl Machine<()> {
    /// Create an empty machine with no default state.
    pub fn new() -> Self {
        Self::with_data(())
    }

    /// Create a machine whose default state is `default`.
    ///
    /// The default state is registered immediately and becomes current.
    pub fn with_default(default: impl Into<Name>) -> Self {
        Self::with_default_and_data(default, ())
    }
}

impl<D> Machine<D> {
    /// Create an empty machine holding host data.
    pub fn with_data(data: D) -> Self {
        Self {
            states: IndexMap::new(),
            current: None,
            default: None,
            last_event: None,
            data,
        }
    }

    /// Create a machine with both a default state and host data.
    pub fn with_default_and_data(default: impl Into<Name>, data: D) -> Self {
        let default = default.into();
        let mut machine = Self::with_data(data);
        machine.ensure_state(default.clone());
        machine.default = Some(default);
        machine
    }

    /// Look up a state, creating an empty one if it does not exist yet.
    ///
    /// If no state is current, `name` becomes the current state.
    pub fn ensure_state(&mut self, name: impl Into<Name>) -> &mut State<D> {
        let name = name.into();
        if self.current.is_none() {
            trace!(state = %name, "first state referenced, making it current");
            self.current = Some(name.clone());
        }
        self.states.entry(name).or_insert_with_key(|name| {
            trace!(state = %name, "creating state");
            State::new(name.clone())
        })
    }

    /// Declare a state and configure its handlers.
    ///
    /// Declaring the same state again keeps its existing handlers; only the
    /// events registered by `configure` are added or replaced.
    pub fn state<F>(&mut self, name: impl Into<Name>, configure: F) -> &mut Self
    where
        F: FnOnce(&mut State<D>),
    {
        configure(self.ensure_state(name));
        self
    }

    /// Look up a state without creating it.
    pub fn get(&self, name: &str) -> Option<&State<D>> {
        self.states.get(name)
    }

    /// Look up a state mutably without creating it.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut State<D>> {
        self.states.get_mut(name)
    }

    /// The current state, if any state has been referenced yet.
    pub fn current(&self) -> Option<&State<D>> {
        self.current.as_deref().and_then(|name| self.states.get(name))
    }

    /// Name of the current state.
    pub fn current_state(&self) -> Option<&Name> {
        self.current.as_ref()
    }

    /// Name of the default state given at construction.
    pub fn default_state(&self) -> Option<&Name> {
        self.default.as_ref()
    }

    /// The event most recently handed to a handler (or dispatched).
    ///
    /// Hooks count as events here: after a dispatch that ran an `"enter"`
    /// hook this reads `"enter"`.
    pub fn last_event(&self) -> Option<&Name> {
        self.last_event.as_ref()
    }

    /// Check if `name` is a registered state.
    pub fn contains(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// States in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &State<D>> + '_ {
        self.states.values()
    }

    /// Number of registered states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    /// Consume the machine, returning its host data.
    pub fn into_data(self) -> D {
        self.data
    }

    /// Process a single event.
    ///
    /// Runs the current state's `"exit"` hook, resolves the event on the
    /// current state, moves to the resolved state (or the default state, or
    /// stays put), then runs the new state's `"enter"` hook. An event nobody
    /// handles is not an error.
    pub fn dispatch(&mut self, event: impl Into<Name>) {
        let event = event.into();
        self.last_event = Some(event.clone());

        let Some(from) = self.current.clone() else {
            debug!(event = %event, "no current state, ignoring event");
            return;
        };

        self.trigger(&from, EXIT_HOOK);
        let resolved = self.trigger(&from, &event);

        let candidate = resolved.into_target().filter(|target| {
            let known = self.states.contains_key(target.as_str());
            if !known {
                debug!(from = %from, event = %event, target = %target, "handler named unknown state");
            }
            known
        });

        let next = candidate
            .or_else(|| self.default.clone())
            .unwrap_or_else(|| from.clone());

        debug!(from = %from, event = %event, to = %next, "dispatched event");

        self.ensure_state(next.clone());
        self.current = Some(next.clone());
        self.trigger(&next, ENTER_HOOK);
    }

    /// Process events strictly in order, each one completing before the next.
    pub fn dispatch_all<I>(&mut self, events: I)
    where
        I: IntoIterator,
        I::Item: Into<Name>,
    {
        for event in events {
            self.dispatch(event);
        }
    }

    /// Render as `"Machine: {<state>, ...}"` with `>` marking the current state.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    fn trigger(&mut self, state: &str, event: &str) -> Transition {
        match self.states.get_mut(state) {
            Some(state) => state.trigger(event, &mut self.last_event, &mut self.data),
            None => Transition::None,
        }
    }
}

impl<D: Default> Default for Machine<D> {
    fn default() -> Self {
        Self::with_data(D::default())
    }
}

impl<D> fmt::Display for Machine<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Machine: {")?;
        for (i, state) in self.states.values().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if self.current.as_ref() == Some(state.name()) {
                f.write_str(">")?;
            }
            write!(f, "{state}")?;
        }
        f.write_str("}")
    }
}

impl<D: fmt::Debug> fmt::Debug for Machine<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("states", &self.states.values().collect::<Vec<_>>())
            .field("current", &self.current)
            .field("default", &self.default)
            .field("last_event", &self.last_event)
            .field("data", &self.data)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Context;

    type Log = Vec<String>;

    fn record(entry: &'static str) -> impl FnMut(&mut Context<'_, Log>) {
        move |ctx: &mut Context<'_, Log>| ctx.data_mut().push(entry.to_string())
    }

    #[test]
    fn new_machine_is_empty() {
        let machine = Machine::new();
        assert!(machine.is_empty());
        assert_eq!(machine.current_state(), None);
        assert!(machine.current().is_none());
        assert_eq!(machine.to_string(), "Machine: {}");
    }

    #[test]
    fn default_state_is_registered_and_current() {
        let machine = Machine::with_default("default");
        assert_eq!(machine.len(), 1);
        assert_eq!(machine.current_state().unwrap(), "default");
        assert_eq!(machine.default_state().unwrap(), "default");
        assert_eq!(machine.describe(), "Machine: {>default: []}");
    }

    #[test]
    fn states_are_created_on_the_fly() {
        let mut machine = Machine::new();
        assert_eq!(machine.ensure_state("new_state").name(), "new_state");
        assert_eq!(machine.ensure_state("another_state").name(), "another_state");
        assert_eq!(machine.len(), 2);
    }

    #[test]
    fn first_referenced_state_becomes_current() {
        let mut machine = Machine::new();
        machine.ensure_state("new_state");
        machine.ensure_state("another_state");
        assert_eq!(machine.current().unwrap().name(), "new_state");
    }

    #[test]
    fn default_state_wins_over_first_declared() {
        let mut machine = Machine::with_default("default");
        machine.state("start", |_| {});
        assert_eq!(machine.current_state().unwrap(), "default");
    }

    #[test]
    fn describe_marks_current_state() {
        let mut machine = Machine::new();
        machine.state("first_state", |s| {
            s.goto("first_event", "second_state");
        });
        machine.state("second_state", |s| {
            s.goto("second_event", "first_state");
        });

        assert_eq!(
            machine.describe(),
            "Machine: {>first_state: [first_event], second_state: [second_event]}"
        );

        machine.dispatch("first_event");
        assert_eq!(
            machine.describe(),
            "Machine: {first_state: [first_event], >second_state: [second_event]}"
        );
    }

    #[test]
    fn redeclaring_state_keeps_events() {
        let mut machine = Machine::new();
        machine.state("a", |s| {
            s.goto("x", "b");
        });
        machine.state("a", |s| {
            s.goto("y", "c");
        });

        assert_eq!(machine.len(), 1);
        assert_eq!(machine.get("a").unwrap().describe(), "a: [x, y]");
    }

    #[test]
    fn get_does_not_create() {
        let machine = Machine::new();
        assert!(machine.get("ghost").is_none());
        assert!(!machine.contains("ghost"));
        assert_eq!(machine.current_state(), None);
    }

    #[test]
    fn get_mut_edits_existing_states_only() {
        let mut machine = Machine::new();
        machine.state("a", |_| {});
        machine.state("b", |_| {});

        assert!(machine.get_mut("ghost").is_none());
        assert_eq!(machine.len(), 2);

        if let Some(state) = machine.get_mut("a") {
            state.goto("x", "b");
        }
        machine.dispatch("x");
        assert_eq!(machine.current_state().unwrap(), "b");
    }

    #[test]
    fn event_moves_to_target() {
        let mut machine = Machine::new();
        machine.state("first_state", |s| {
            s.goto("first_event", "second_state");
        });
        machine.state("second_state", |s| {
            s.goto("second_event", "first_state");
        });

        machine.dispatch("first_event");
        assert_eq!(machine.current_state().unwrap(), "second_state");
    }

    #[test]
    fn unknown_event_falls_back_to_default() {
        let mut machine = Machine::with_default("default");
        machine.state("first_state", |s| {
            s.goto("first_event", "second_state");
        });
        machine.state("second_state", |_| {});

        machine.dispatch("first_event");
        assert_eq!(machine.current_state().unwrap(), "default");
    }

    #[test]
    fn unknown_event_without_default_stays_put() {
        let mut machine = Machine::new();
        machine.state("start", |_| {});

        machine.dispatch("undefined");
        assert_eq!(machine.current_state().unwrap(), "start");
    }

    #[test]
    fn unknown_target_is_treated_as_no_transition() {
        let mut machine = Machine::with_default("home");
        machine.state("home", |s| {
            s.goto("go", "away");
        });
        machine.state("away", |s| {
            s.goto("jump", "nowhere");
        });

        machine.dispatch("go");
        machine.dispatch("jump");
        assert_eq!(machine.current_state().unwrap(), "home");
        assert!(!machine.contains("nowhere"));
    }

    #[test]
    fn unknown_target_without_default_stays_put() {
        let mut machine = Machine::new();
        machine.state("a", |s| {
            s.goto("go", "nowhere");
        });

        machine.dispatch("go");
        assert_eq!(machine.current_state().unwrap(), "a");
        assert_eq!(machine.len(), 1);
    }

    #[test]
    fn handler_returning_none_falls_back() {
        let mut machine = Machine::with_default("idle");
        machine.state("busy", |s| {
            s.on("poke", |_| Transition::None);
        });
        machine.state("idle", |s| {
            s.goto("work", "busy");
        });

        machine.dispatch("work");
        machine.dispatch("poke");
        assert_eq!(machine.current_state().unwrap(), "idle");
    }

    #[test]
    fn hooks_run_exit_then_handler_then_enter() {
        let mut machine = Machine::with_data(Log::new());
        machine.state("a", |s| {
            s.on_exit(record("exit a"));
            s.on("x", |ctx| {
                ctx.data_mut().push("handle x".to_string());
                Transition::to("b")
            });
            s.on_enter(record("enter a"));
        });
        machine.state("b", |s| {
            s.on_exit(record("exit b"));
            s.on_enter(record("enter b"));
        });

        machine.dispatch("x");

        assert_eq!(machine.current_state().unwrap(), "b");
        assert_eq!(machine.data(), &["exit a", "handle x", "enter b"]);
    }

    #[test]
    fn self_loop_runs_exit_and_enter_on_same_state() {
        let mut machine = Machine::with_data(Log::new());
        machine.state("a", |s| {
            s.on_exit(record("exit a"));
            s.on_enter(record("enter a"));
        });

        machine.dispatch("nothing");

        assert_eq!(machine.current_state().unwrap(), "a");
        assert_eq!(machine.data(), &["exit a", "enter a"]);
    }

    #[test]
    fn default_handler_also_answers_hooks() {
        let mut machine = Machine::with_data(Log::new());
        machine.state("a", |s| {
            s.otherwise(|ctx| {
                let event = ctx.event().to_string();
                ctx.data_mut().push(event);
                Transition::None
            });
        });

        machine.dispatch("ping");

        assert_eq!(machine.data(), &["exit", "ping", "enter"]);
    }

    #[test]
    fn handlers_see_event_and_state() {
        let mut machine = Machine::with_data(Log::new());
        machine.state("a", |s| {
            s.on("x", |ctx| {
                let seen = format!("{}@{}", ctx.event(), ctx.state());
                ctx.data_mut().push(seen);
                Transition::None
            });
        });

        machine.dispatch("x");
        assert_eq!(machine.data(), &["x@a"]);
        assert_eq!(machine.last_event().unwrap(), "x");
    }

    #[test]
    fn last_event_reflects_hooks() {
        let mut machine = Machine::new();
        machine.state("a", |s| {
            s.goto("x", "b");
        });
        machine.state("b", |s| {
            s.on_enter(|_| {});
        });

        machine.dispatch("x");
        assert_eq!(machine.last_event().unwrap(), "enter");
    }

    #[test]
    fn dispatch_on_empty_machine_is_a_no_op() {
        let mut machine = Machine::new();
        machine.dispatch("anything");
        assert!(machine.is_empty());
        assert_eq!(machine.current_state(), None);
        assert_eq!(machine.last_event().unwrap(), "anything");
    }

    #[test]
    fn dispatch_all_processes_in_order() {
        let mut machine = Machine::with_data(Log::new());
        machine.state("a", |s| {
            s.on("next", |ctx| {
                ctx.data_mut().push("a".to_string());
                Transition::to("b")
            });
        });
        machine.state("b", |s| {
            s.on("next", |ctx| {
                ctx.data_mut().push("b".to_string());
                Transition::to("c")
            });
        });
        machine.state("c", |_| {});

        machine.dispatch_all(["next", "next", "next"]);

        assert_eq!(machine.current_state().unwrap(), "c");
        assert_eq!(machine.into_data(), vec!["a", "b"]);
    }

    #[test]
    fn last_registration_wins_between_handler_and_map() {
        let mut machine = Machine::new();
        machine.state("a", |s| {
            s.on("go", |_| Transition::to("b"));
            s.transitions([("go", "c")]);
        });
        machine.state("b", |_| {});
        machine.state("c", |_| {});

        machine.dispatch("go");
        assert_eq!(machine.current_state().unwrap(), "c");

        let mut machine = Machine::new();
        machine.state("a", |s| {
            s.transitions([("go", "c")]);
            s.on("go", |_| Transition::to("b"));
        });
        machine.state("b", |_| {});
        machine.state("c", |_| {});

        machine.dispatch("go");
        assert_eq!(machine.current_state().unwrap(), "b");
    }
}
