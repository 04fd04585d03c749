//! Errors reported by the shared-ownership wrapper.
//!
//! The machine itself never fails: unknown events and unknown targets are
//! silent no-ops.

use crate::core::Name;
use thiserror::Error;

/// Errors that can occur when driving a [`SharedMachine`](crate::SharedMachine)
/// or a [`WeakMachine`](crate::WeakMachine).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsmError {
    #[error("Event '{event}' dispatched while the machine is already dispatching")]
    ReentrantDispatch { event: Name },

    #[error("Machine is busy dispatching an event")]
    MachineBusy,

    #[error("Machine was dropped; no shared handle is left")]
    MachineDropped,
}
