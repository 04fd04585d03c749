//! Builder API for declaring a whole machine in one expression.
//!
//! `MachineBuilder` collects the default state, host data and state
//! declarations, then produces a ready [`Machine`](crate::Machine).
//! The `transitions!` macro writes `event => target` tables for
//! [`State::transitions`](crate::State::transitions).

pub mod machine;
pub mod macros;

pub use machine::MachineBuilder;
