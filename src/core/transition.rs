//! Handler results and the context handlers run with.

use super::name::Name;
use serde::{Deserialize, Serialize};

/// Result of invoking an event handler.
///
/// A handler either names the state the machine should move to, or yields
/// nothing. A target that does not name a known state is treated exactly like
/// `None` by the machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Move to the named state
    To(Name),

    /// No next state; the machine falls back to its default state, if any
    None,
}

impl Transition {
    /// Transition to `target`.
    pub fn to(target: impl Into<Name>) -> Self {
        Self::To(target.into())
    }

    /// The named target, if there is one.
    pub fn target(&self) -> Option<&Name> {
        match self {
            Self::To(target) => Some(target),
            Self::None => None,
        }
    }

    /// Consume the transition, returning its target.
    pub fn into_target(self) -> Option<Name> {
        match self {
            Self::To(target) => Some(target),
            Self::None => None,
        }
    }
}

impl From<Option<Name>> for Transition {
    fn from(target: Option<Name>) -> Self {
        target.map_or(Self::None, Self::To)
    }
}

impl From<Name> for Transition {
    fn from(target: Name) -> Self {
        Self::To(target)
    }
}

impl From<&str> for Transition {
    fn from(target: &str) -> Self {
        Self::To(Name::from(target))
    }
}

impl From<()> for Transition {
    fn from((): ()) -> Self {
        Self::None
    }
}

/// What a handler can see and touch while it runs.
///
/// Handlers never receive the machine itself, only the event being processed,
/// the state the handler is registered on, and the host data.
pub struct Context<'a, D> {
    event: &'a Name,
    state: &'a Name,
    data: &'a mut D,
}

impl<'a, D> Context<'a, D> {
    pub(crate) fn new(event: &'a Name, state: &'a Name, data: &'a mut D) -> Self {
        Self { event, state, data }
    }

    /// The event being processed. For a catch-all handler this is the
    /// originally requested event, not `"default"`.
    pub fn event(&self) -> &Name {
        self.event
    }

    /// The state the handler is registered on (the machine's current state).
    pub fn state(&self) -> &Name {
        self.state
    }

    /// Host data held by the machine.
    pub fn data(&self) -> &D {
        &*self.data
    }

    /// Mutable host data held by the machine.
    pub fn data_mut(&mut self) -> &mut D {
        &mut *self.data
    }
}

/// Boxed event handler.
///
/// Handlers run on the dispatching thread and may keep their own state, so
/// they are `FnMut` and carry no `Send` bound.
pub type Handler<D> = Box<dyn FnMut(&mut Context<'_, D>) -> Transition>;
