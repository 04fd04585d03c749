//! A single state and its event-handler table.

use super::name::{Name, DEFAULT_EVENT, ENTER_HOOK, EXIT_HOOK};
use super::transition::{Context, Handler, Transition};
use indexmap::IndexMap;
use std::fmt;
use tracing::trace;

/// Ordered mapping of event name to handler.
///
/// Insertion order is kept for display. Re-registering an event replaces the
/// handler in place.
pub type TransitionTable<D> = IndexMap<Name, Handler<D>>;

/// A named state owning the handlers for the events it reacts to.
///
/// # Example
///
/// ```rust
/// use barebone_fsm::{Machine, Transition};
///
/// let mut machine = Machine::new();
/// machine.state("open", |s| {
///     s.goto("close", "closed");
///     s.on("knock", |_| Transition::None);
/// });
///
/// let open = machine.get("open").unwrap();
/// assert!(open.has_event("close"));
/// assert_eq!(open.to_string(), "open: [close, knock]");
/// ```
pub struct State<D = ()> {
    name: Name,
    events: TransitionTable<D>,
}

impl<D> State<D> {
    pub(crate) fn new(name: Name) -> Self {
        Self {
            name,
            events: IndexMap::new(),
        }
    }

    /// The state's name.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Register (or replace) the handler for `event`.
    pub fn on<F>(&mut self, event: impl Into<Name>, handler: F) -> &mut Self
    where
        F: FnMut(&mut Context<'_, D>) -> Transition + 'static,
    {
        self.events.insert(event.into(), Box::new(handler));
        self
    }

    /// Register a hook run whenever the machine enters this state.
    pub fn on_enter<F>(&mut self, mut hook: F) -> &mut Self
    where
        F: FnMut(&mut Context<'_, D>) + 'static,
    {
        self.on(ENTER_HOOK, move |ctx| {
            hook(ctx);
            Transition::None
        })
    }

    /// Register a hook run whenever the machine leaves this state.
    pub fn on_exit<F>(&mut self, mut hook: F) -> &mut Self
    where
        F: FnMut(&mut Context<'_, D>) + 'static,
    {
        self.on(EXIT_HOOK, move |ctx| {
            hook(ctx);
            Transition::None
        })
    }

    /// Register a catch-all handler for events with no handler of their own.
    pub fn otherwise<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&mut Context<'_, D>) -> Transition + 'static,
    {
        self.on(DEFAULT_EVENT, handler)
    }

    /// Register `event` as an unconditional move to `target`.
    pub fn goto(&mut self, event: impl Into<Name>, target: impl Into<Name>) -> &mut Self {
        let target = target.into();
        self.on(event, move |_| Transition::To(target.clone()))
    }

    /// Register every `(event, target)` pair as an unconditional move.
    pub fn transitions<I, E, T>(&mut self, mapping: I) -> &mut Self
    where
        I: IntoIterator<Item = (E, T)>,
        E: Into<Name>,
        T: Into<Name>,
    {
        for (event, target) in mapping {
            self.goto(event, target);
        }
        self
    }

    /// Check if a handler is registered under `event` (reserved names included).
    pub fn has_event(&self, event: &str) -> bool {
        self.events.contains_key(event)
    }

    /// Registered event names in insertion order.
    pub fn events(&self) -> impl Iterator<Item = &Name> + '_ {
        self.events.keys()
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Render as `"<name>: [<event>, ...]"`.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Resolve and run `event` on this state.
    ///
    /// Uses the handler for `event`, else the `"default"` handler, else does
    /// nothing. Whenever a handler runs, `last_event` is set to the requested
    /// event name first.
    pub(crate) fn trigger(
        &mut self,
        event: &str,
        last_event: &mut Option<Name>,
        data: &mut D,
    ) -> Transition {
        let handler = match self.events.get_index_of(event) {
            Some(index) => Some(index),
            None => {
                let fallback = self.events.get_index_of(DEFAULT_EVENT);
                if fallback.is_some() {
                    trace!(state = %self.name, event, "falling back to default handler");
                }
                fallback
            }
        };

        let Some((_, handler)) = handler.and_then(|index| self.events.get_index_mut(index)) else {
            trace!(state = %self.name, event, "no handler");
            return Transition::None;
        };

        let event = Name::from(event);
        *last_event = Some(event.clone());
        let mut ctx = Context::new(&event, &self.name, data);
        handler(&mut ctx)
    }
}

impl<D> fmt::Display for State<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [", self.name)?;
        for (i, event) in self.events.keys().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{event}")?;
        }
        f.write_str("]")
    }
}

impl<D> fmt::Debug for State<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("events", &self.events.keys().collect::<Vec<_>>())
            .finish()
    }
}
