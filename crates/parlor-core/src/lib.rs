//! Coordination core for the calling panel.
//!
//! A minimal unidirectional dispatch/store loop: UI code constructs a
//! [`PanelAction`], hands it to the [`Dispatcher`], and registered stores
//! reduce it into new state. Host completions re-enter the loop as fresh
//! actions on their own turn, so a dispatch never overlaps another dispatch
//! on the same instance.
//!
//! # Components
//!
//! - [`PanelAction`]: immutable typed intents and host-completion events
//! - [`Dispatcher`]: synchronous registration-order broadcaster with a
//!   reentrancy guard
//! - [`RoomStore`]: room-list state reduced by actions
//! - [`OneShotGuard`]: keyed latch for at-most-once side effects
//! - [`CallUrlFlow`]: call-URL retrieval and sharing state machine
//! - [`HostApi`]: explicitly injected host capability object
//!
//! Everything is single-threaded and callback-driven; there are no locks and
//! no async runtime. See the crate's design notes for the concurrency model.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod call_url;
mod dispatcher;
mod guard;
mod host;
mod notify;
mod room;
mod store;

pub use action::PanelAction;
pub use call_url::{CallUrlClient, CallUrlFlow, CallUrlInfo, CallUrlState};
pub use dispatcher::{ActionListener, DispatchError, Dispatcher, ListenerError, ListenerId};
pub use guard::OneShotGuard;
pub use host::{HostApi, HostError, NewRoomParams, PREF_ROOMS_MAX_SIZE, TELEMETRY_CALL_URL_SHARED};
pub use notify::{Notification, Notifications, Severity};
pub use room::{Room, RoomParticipant, RoomToken};
pub use store::{RoomStore, RoomStoreConfig, RoomStoreState, RoomStoreUpdate};
