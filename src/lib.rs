//! barebone-fsm: a minimal embeddable finite-state machine
//!
//! A host declares named states, attaches event handlers to them, and drives
//! the machine by dispatching events one at a time or in sequence. Handlers
//! compute the next state; `"enter"`/`"exit"` hooks run around every
//! transition; a default state catches events that lead nowhere.
//!
//! # Core Concepts
//!
//! - **Name**: identifier shared by states and events
//! - **State**: a named node owning an ordered table of event handlers
//! - **Machine**: the state registry, current/default pointers and dispatch
//! - **Fsm**: query/fire shorthand for host objects embedding a machine
//!
//! # Example
//!
//! ```rust
//! use barebone_fsm::{transitions, Machine};
//!
//! let mut door = Machine::new();
//! door.state("default", |s| {
//!     s.transitions(transitions! { "open" => "open", "close" => "close" });
//! });
//! door.state("open", |s| {
//!     s.goto("close", "close");
//! });
//! door.state("close", |s| {
//!     s.goto("open", "open");
//! });
//!
//! door.dispatch_all(["close", "open", "close", "undefined", "open", "close"]);
//!
//! assert_eq!(door.current_state().unwrap(), "close");
//! assert_eq!(
//!     door.to_string(),
//!     "Machine: {default: [open, close], open: [close], >close: [open]}"
//! );
//! ```

pub mod builder;
pub mod core;
pub mod error;
pub mod host;
pub mod machine;

// Re-export commonly used types
pub use crate::core::{Context, Name, State, Transition, DEFAULT_EVENT, ENTER_HOOK, EXIT_HOOK};
pub use builder::MachineBuilder;
pub use error::FsmError;
pub use host::{Fsm, SharedMachine, WeakMachine};
pub use machine::Machine;
