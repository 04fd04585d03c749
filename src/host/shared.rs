//! Shared-ownership handles with an explicit reentrancy policy.

use crate::core::Name;
use crate::error::FsmError;
use crate::machine::Machine;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::warn;

/// Cloneable handle to a machine, for hosts that need to drive the machine
/// from several places.
///
/// A dispatch issued while another dispatch on the same machine is still
/// running is rejected with [`FsmError::ReentrantDispatch`] and changes
/// nothing. Reads during a dispatch fail with [`FsmError::MachineBusy`].
///
/// Handlers must hold a [`WeakMachine`] (from [`SharedMachine::downgrade`]),
/// never a `SharedMachine`: the machine owns its handlers, so a strong handle
/// inside one keeps the machine alive forever.
///
/// # Example
///
/// ```rust
/// use barebone_fsm::{FsmError, Machine, SharedMachine};
///
/// let shared = SharedMachine::new(Machine::new());
/// let handle = shared.downgrade();
///
/// shared
///     .with_mut(|m| {
///         m.state("idle", move |s| {
///             s.on("go", move |_| {
///                 let nested = handle.dispatch("go");
///                 assert!(matches!(nested, Err(FsmError::ReentrantDispatch { .. })));
///                 "busy".into()
///             });
///         });
///         m.state("busy", |_| {});
///     })
///     .unwrap();
///
/// shared.dispatch("go").unwrap();
/// assert_eq!(shared.current_state().unwrap().unwrap(), "busy");
/// ```
pub struct SharedMachine<D = ()> {
    inner: Rc<RefCell<Machine<D>>>,
}

/// Non-owning handle to a machine, safe to capture inside its own handlers.
///
/// Every operation fails with [`FsmError::MachineDropped`] once all
/// [`SharedMachine`] handles are gone.
pub struct WeakMachine<D = ()> {
    inner: Weak<RefCell<Machine<D>>>,
}

fn dispatch_in<D>(cell: &RefCell<Machine<D>>, event: Name) -> Result<(), FsmError> {
    let Ok(mut machine) = cell.try_borrow_mut() else {
        warn!(event = %event, "rejected reentrant dispatch");
        return Err(FsmError::ReentrantDispatch { event });
    };
    machine.dispatch(event);
    Ok(())
}

impl<D> SharedMachine<D> {
    pub fn new(machine: Machine<D>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(machine)),
        }
    }

    /// Create a non-owning handle to the same machine.
    pub fn downgrade(&self) -> WeakMachine<D> {
        WeakMachine {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Dispatch a single event.
    ///
    /// # Errors
    ///
    /// Returns `FsmError::ReentrantDispatch` when called from inside a
    /// handler of the same machine.
    pub fn dispatch(&self, event: impl Into<Name>) -> Result<(), FsmError> {
        dispatch_in(&self.inner, event.into())
    }

    /// Dispatch events in order, stopping at the first rejected one.
    ///
    /// # Errors
    ///
    /// Returns the first `FsmError::ReentrantDispatch` encountered.
    pub fn dispatch_all<I>(&self, events: I) -> Result<(), FsmError>
    where
        I: IntoIterator,
        I::Item: Into<Name>,
    {
        for event in events {
            self.dispatch(event)?;
        }
        Ok(())
    }

    /// Run `f` with shared access to the machine.
    ///
    /// # Errors
    ///
    /// Returns `FsmError::MachineBusy` while a dispatch is in progress.
    pub fn with<R>(&self, f: impl FnOnce(&Machine<D>) -> R) -> Result<R, FsmError> {
        let machine = self.inner.try_borrow().map_err(|_| FsmError::MachineBusy)?;
        Ok(f(&machine))
    }

    /// Run `f` with exclusive access to the machine, e.g. to declare states.
    ///
    /// # Errors
    ///
    /// Returns `FsmError::MachineBusy` while a dispatch is in progress.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Machine<D>) -> R) -> Result<R, FsmError> {
        let mut machine = self
            .inner
            .try_borrow_mut()
            .map_err(|_| FsmError::MachineBusy)?;
        Ok(f(&mut machine))
    }

    /// Name of the current state.
    ///
    /// # Errors
    ///
    /// Returns `FsmError::MachineBusy` while a dispatch is in progress.
    pub fn current_state(&self) -> Result<Option<Name>, FsmError> {
        self.with(|machine| machine.current_state().cloned())
    }

    /// Render the machine as [`Machine::describe`] does.
    ///
    /// # Errors
    ///
    /// Returns `FsmError::MachineBusy` while a dispatch is in progress.
    pub fn describe(&self) -> Result<String, FsmError> {
        self.with(|machine| machine.describe())
    }

    /// Take the machine back if this is the last handle to it.
    ///
    /// # Errors
    ///
    /// Returns the handle unchanged if other clones are still alive.
    pub fn try_into_inner(self) -> Result<Machine<D>, Self> {
        Rc::try_unwrap(self.inner)
            .map(RefCell::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<D> WeakMachine<D> {
    /// Get a strong handle back, if the machine is still alive.
    pub fn upgrade(&self) -> Option<SharedMachine<D>> {
        self.inner.upgrade().map(|inner| SharedMachine { inner })
    }

    /// Dispatch a single event.
    ///
    /// # Errors
    ///
    /// Returns `FsmError::MachineDropped` if the machine is gone, and
    /// `FsmError::ReentrantDispatch` when called from inside a handler of
    /// the same machine.
    pub fn dispatch(&self, event: impl Into<Name>) -> Result<(), FsmError> {
        let inner = self.inner.upgrade().ok_or(FsmError::MachineDropped)?;
        dispatch_in(&inner, event.into())
    }

    /// Run `f` with shared access to the machine.
    ///
    /// # Errors
    ///
    /// Returns `FsmError::MachineDropped` if the machine is gone, and
    /// `FsmError::MachineBusy` while a dispatch is in progress.
    pub fn with<R>(&self, f: impl FnOnce(&Machine<D>) -> R) -> Result<R, FsmError> {
        let inner = self.inner.upgrade().ok_or(FsmError::MachineDropped)?;
        let machine = inner.try_borrow().map_err(|_| FsmError::MachineBusy)?;
        Ok(f(&machine))
    }

    /// Name of the current state.
    ///
    /// # Errors
    ///
    /// Same as [`WeakMachine::with`].
    pub fn current_state(&self) -> Result<Option<Name>, FsmError> {
        self.with(|machine| machine.current_state().cloned())
    }
}

impl<D> Clone for SharedMachine<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<D> Clone for WeakMachine<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<D> From<Machine<D>> for SharedMachine<D> {
    fn from(machine: Machine<D>) -> Self {
        Self::new(machine)
    }
}

impl<D> fmt::Debug for SharedMachine<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedMachine")
            .field("handles", &Rc::strong_count(&self.inner))
            .field("busy", &self.inner.try_borrow_mut().is_err())
            .finish()
    }
}

impl<D> fmt::Debug for WeakMachine<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakMachine")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}
