//! Core engine types.
//!
//! This module contains the building blocks the machine is made of:
//! - `Name` identifiers shared by states and events
//! - `Transition` results returned by handlers
//! - `State` and its ordered handler table

mod name;
mod state;
mod transition;

pub use name::{Name, DEFAULT_EVENT, ENTER_HOOK, EXIT_HOOK};
pub use state::{State, TransitionTable};
pub use transition::{Context, Handler, Transition};
