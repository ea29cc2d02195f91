//! Synchronous action dispatcher.
//!
//! The [`Dispatcher`] broadcasts one action at a time to every registered
//! listener, in registration order. There is no queue: a dispatch started
//! while another dispatch on the same instance is still in progress is a
//! programming error and fails synchronously, which keeps cascading dispatch
//! loops from forming. Listener failures propagate to the caller of
//! [`Dispatcher::dispatch`] instead of being swallowed.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use thiserror::Error;

use crate::action::PanelAction;

/// Error type listeners may surface while handling an action.
pub type ListenerError = Box<dyn std::error::Error>;

/// A receiver of dispatched actions.
///
/// Stores implement this to register with the [`Dispatcher`]. Listeners use
/// interior mutability for their own state; the dispatcher only ever hands
/// out shared references to the action.
pub trait ActionListener {
    /// Handle one dispatched action.
    fn on_action(&self, action: &PanelAction) -> Result<(), ListenerError>;
}

/// Handle identifying one listener registration.
///
/// Returned by [`Dispatcher::register`]; pass it back to
/// [`Dispatcher::unregister`] to tear the listener down. No action is
/// delivered after unregistration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// Errors raised by [`Dispatcher::dispatch`].
#[derive(Debug, Error)]
pub enum DispatchError {
    /// `dispatch` was called while another dispatch was still in progress.
    #[error("re-entrant dispatch of {action} while {in_flight} is still being dispatched")]
    Reentrant {
        /// Action whose dispatch was rejected.
        action: &'static str,
        /// Action currently being dispatched.
        in_flight: &'static str,
    },

    /// A listener failed while handling the action.
    #[error("listener failed while handling {action}")]
    Listener {
        /// Action being handled when the listener failed.
        action: &'static str,
        /// The listener's error.
        #[source]
        source: ListenerError,
    },
}

/// Synchronous single-channel broadcaster of actions to registered stores.
#[derive(Default)]
pub struct Dispatcher {
    listeners: RefCell<Vec<(ListenerId, Rc<dyn ActionListener>)>>,
    next_id: Cell<u64>,
    in_flight: Cell<Option<&'static str>>,
}

impl Dispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Listeners are invoked in registration order.
    ///
    /// A registration made while a dispatch is in progress takes effect from
    /// the next dispatch; the in-flight broadcast works on a snapshot.
    pub fn register(&self, listener: Rc<dyn ActionListener>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    /// Remove a previously registered listener.
    ///
    /// Returns `false` when the id is unknown (already removed).
    pub fn unregister(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    /// Broadcast one action to every registered listener.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Reentrant`] when called while another
    /// dispatch on this instance is in progress, and
    /// [`DispatchError::Listener`] when a listener fails; in the latter case
    /// listeners registered after the failing one are skipped.
    pub fn dispatch(&self, action: &PanelAction) -> Result<(), DispatchError> {
        if let Some(in_flight) = self.in_flight.get() {
            return Err(DispatchError::Reentrant { action: action.name(), in_flight });
        }

        tracing::debug!(action = action.name(), "dispatching");
        self.in_flight.set(Some(action.name()));

        // Snapshot so listeners may register/unregister mid-dispatch.
        let snapshot: Vec<Rc<dyn ActionListener>> =
            self.listeners.borrow().iter().map(|(_, listener)| Rc::clone(listener)).collect();

        let mut result = Ok(());
        for listener in snapshot {
            if let Err(source) = listener.on_action(action) {
                result = Err(DispatchError::Listener { action: action.name(), source });
                break;
            }
        }

        self.in_flight.set(None);
        result
    }
}
