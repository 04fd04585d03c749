//! Identifiers for states and events.
//!
//! States and events share one identifier type so that a handler can return
//! the name of the next state and a host can submit events using the same
//! symbol-like tokens it used to declare the graph.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Reserved event name fired on the state being left, before the event handler runs.
pub const EXIT_HOOK: &str = "exit";

/// Reserved event name fired on the state being entered, after the current state moves.
pub const ENTER_HOOK: &str = "enter";

/// Reserved event name used as a catch-all when a state has no handler for an event.
pub const DEFAULT_EVENT: &str = "default";

/// Name of a state or an event.
///
/// Cheap to compare and hash, and borrows as `&str` so tables keyed by
/// `Name` can be queried with plain string slices.
///
/// # Example
///
/// ```rust
/// use barebone_fsm::Name;
///
/// let open = Name::from("open");
/// assert_eq!(open.as_str(), "open");
/// assert_eq!(open, "open");
/// assert_eq!(open.to_string(), "open");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Create a name from anything string-like.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is one of the reserved hook or fallback names.
    pub fn is_reserved(&self) -> bool {
        matches!(self.as_str(), EXIT_HOOK | ENTER_HOOK | DEFAULT_EVENT)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for Name {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for Name {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&String> for Name {
    fn from(name: &String) -> Self {
        Self(name.clone())
    }
}

impl From<&Name> for Name {
    fn from(name: &Name) -> Self {
        name.clone()
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
