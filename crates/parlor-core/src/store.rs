//! Room list store.
//!
//! [`RoomStore`] owns the panel's room-list slice of state. It registers
//! with the [`Dispatcher`] at construction, reduces incoming
//! [`PanelAction`]s into new state, and notifies subscribers synchronously
//! after every change. Host room operations are initiated during reduction;
//! their outcomes re-enter as completion actions on a later turn, so the
//! store never blocks and never re-enters the dispatcher itself.
//!
//! Cancellation is unsupported: a completed host call always applies its
//! effect, even when newer state has superseded it. For deletion this is a
//! benign race; confirming a delete for an already-absent token is a no-op.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::action::PanelAction;
use crate::dispatcher::{ActionListener, Dispatcher, ListenerError, ListenerId};
use crate::host::{HostApi, HostError, NewRoomParams, PREF_ROOMS_MAX_SIZE};
use crate::room::{Room, RoomToken};

/// Placeholder in room name templates replaced by the next sequence number.
const NAME_NUMBER_PLACEHOLDER: &str = "{{number}}";

/// Message key used as the subject when sharing a room URL by email.
const SHARE_EMAIL_SUBJECT: &str = "share-room-email-subject";

/// Participant limit used when the host carries no `rooms.max-size` pref.
const DEFAULT_MAX_ROOM_SIZE: u32 = 2;

/// Snapshot of the room store's state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomStoreState {
    /// A room creation request is outstanding.
    pub pending_creation: bool,
    /// The initial room-list fetch is outstanding.
    pub pending_initial_retrieval: bool,
    /// Known rooms, unique by token, newest first.
    pub rooms: Vec<Room>,
    /// Most recent host failure. Cleared by the next successful operation.
    pub error: Option<HostError>,
}

/// Partial state merge for tests and bootstrap.
///
/// Unset fields leave the corresponding state untouched.
#[derive(Debug, Default)]
pub struct RoomStoreUpdate {
    pending_creation: Option<bool>,
    pending_initial_retrieval: Option<bool>,
    rooms: Option<Vec<Room>>,
    error: Option<Option<HostError>>,
}

impl RoomStoreUpdate {
    /// Update with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pending-creation flag.
    pub fn pending_creation(mut self, pending: bool) -> Self {
        self.pending_creation = Some(pending);
        self
    }

    /// Set the pending-initial-retrieval flag.
    pub fn pending_initial_retrieval(mut self, pending: bool) -> Self {
        self.pending_initial_retrieval = Some(pending);
        self
    }

    /// Replace the room list.
    pub fn rooms(mut self, rooms: Vec<Room>) -> Self {
        self.rooms = Some(rooms);
        self
    }

    /// Set the error field.
    pub fn error(mut self, error: HostError) -> Self {
        self.error = Some(Some(error));
        self
    }

    /// Clear the error field.
    pub fn clear_error(mut self) -> Self {
        self.error = Some(None);
        self
    }
}

/// Configuration handed to [`RoomStore::new`].
pub struct RoomStoreConfig {
    /// Injected host capability object.
    pub host: Rc<dyn HostApi>,
}

type Subscriber = Rc<dyn Fn(&RoomStoreState)>;

/// Store owning the room-list slice of panel state.
pub struct RoomStore {
    host: Rc<dyn HostApi>,
    state: RefCell<RoomStoreState>,
    subscribers: RefCell<Vec<Subscriber>>,
    registration: Cell<Option<ListenerId>>,
}

impl RoomStore {
    /// Create a store and register it with the dispatcher.
    pub fn new(dispatcher: &Dispatcher, config: RoomStoreConfig) -> Rc<Self> {
        let store = Rc::new(Self {
            host: config.host,
            state: RefCell::new(RoomStoreState::default()),
            subscribers: RefCell::new(Vec::new()),
            registration: Cell::new(None),
        });
        let id = dispatcher.register(Rc::clone(&store) as Rc<dyn ActionListener>);
        store.registration.set(Some(id));
        store
    }

    /// Release the dispatcher registration. No action is handled afterward.
    pub fn release(&self, dispatcher: &Dispatcher) {
        if let Some(id) = self.registration.take() {
            dispatcher.unregister(id);
        }
    }

    /// Current state snapshot.
    pub fn store_state(&self) -> RoomStoreState {
        self.state.borrow().clone()
    }

    /// Merge a partial state update and notify subscribers.
    ///
    /// Test/bootstrap hook; production state only changes through dispatched
    /// actions.
    pub fn set_store_state(&self, update: RoomStoreUpdate) {
        self.apply(|state| {
            if let Some(pending) = update.pending_creation {
                state.pending_creation = pending;
            }
            if let Some(pending) = update.pending_initial_retrieval {
                state.pending_initial_retrieval = pending;
            }
            if let Some(rooms) = update.rooms {
                state.rooms = rooms;
            }
            if let Some(error) = update.error {
                state.error = error;
            }
        });
    }

    /// Subscribe to state changes. Callbacks run synchronously after every
    /// change, in subscription order.
    pub fn subscribe(&self, callback: impl Fn(&RoomStoreState) + 'static) {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Mutate state and notify subscribers with the new snapshot.
    fn apply(&self, mutate: impl FnOnce(&mut RoomStoreState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            mutate(&mut state);
            state.clone()
        };
        // Borrows are released before callbacks run; a subscriber may read
        // the store or subscribe again.
        let subscribers: Vec<Subscriber> = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            subscriber(&snapshot);
        }
    }

    fn fetch_all(&self) {
        self.apply(|state| {
            state.pending_initial_retrieval = true;
            state.error = None;
        });
        self.host.fetch_all_rooms();
    }

    fn rooms_fetched(&self, result: &Result<Vec<Room>, HostError>) {
        match result {
            Ok(rooms) => {
                let rooms = rooms.clone();
                self.apply(|state| {
                    state.rooms = normalized(rooms);
                    state.pending_initial_retrieval = false;
                    state.error = None;
                });
            },
            Err(error) => {
                tracing::warn!(%error, "room list fetch failed");
                let error = error.clone();
                self.apply(|state| {
                    state.pending_initial_retrieval = false;
                    state.error = Some(error);
                });
            },
        }
    }

    fn create_room(&self, name_template: &str, room_owner: &str) {
        let room_name = {
            let state = self.state.borrow();
            generate_room_name(name_template, &state.rooms)
        };
        let params = NewRoomParams {
            room_name,
            room_owner: room_owner.to_owned(),
            max_size: self.max_room_size(),
        };
        self.apply(|state| {
            state.pending_creation = true;
            state.error = None;
        });
        self.host.create_room(params);
    }

    fn room_created(&self, result: &Result<Room, HostError>) {
        match result {
            Ok(room) => {
                let room = room.clone();
                self.apply(|state| {
                    // Unique by token: a re-delivered creation replaces.
                    state.rooms.retain(|existing| existing.room_token != room.room_token);
                    state.rooms.push(room);
                    Room::sort_newest_first(&mut state.rooms);
                    state.pending_creation = false;
                    state.error = None;
                });
            },
            Err(error) => {
                tracing::warn!(%error, "room creation failed");
                let error = error.clone();
                self.apply(|state| {
                    state.pending_creation = false;
                    state.error = Some(error);
                });
            },
        }
    }

    fn room_deleted(&self, room_token: &RoomToken, result: &Result<(), HostError>) {
        match result {
            Ok(()) => {
                let present =
                    self.state.borrow().rooms.iter().any(|room| &room.room_token == room_token);
                if !present {
                    // Benign race: the room was already gone when the
                    // confirmation arrived.
                    tracing::debug!(%room_token, "delete confirmed for absent room");
                    return;
                }
                self.apply(|state| {
                    state.rooms.retain(|room| &room.room_token != room_token);
                });
            },
            Err(error) => {
                tracing::warn!(%room_token, %error, "room deletion failed");
                let error = error.clone();
                self.apply(|state| {
                    state.error = Some(error);
                });
            },
        }
    }

    fn update_room_list(&self, rooms: &[Room]) {
        let rooms = rooms.to_vec();
        self.apply(|state| {
            state.rooms = normalized(rooms);
            state.error = None;
        });
    }

    fn max_room_size(&self) -> u32 {
        let Some(raw) = self.host.get_pref(PREF_ROOMS_MAX_SIZE) else {
            return DEFAULT_MAX_ROOM_SIZE;
        };
        match raw.parse() {
            Ok(size) => size,
            Err(_) => {
                tracing::warn!(pref = PREF_ROOMS_MAX_SIZE, value = %raw, "unparseable pref");
                DEFAULT_MAX_ROOM_SIZE
            },
        }
    }
}

impl ActionListener for RoomStore {
    fn on_action(&self, action: &PanelAction) -> Result<(), ListenerError> {
        tracing::debug!(action = action.name(), "room store reducing");
        match action {
            PanelAction::GetAllRooms => self.fetch_all(),
            PanelAction::RoomsFetched { result } => self.rooms_fetched(result),
            PanelAction::CreateRoom { name_template, room_owner } => {
                self.create_room(name_template, room_owner);
            },
            PanelAction::RoomCreated { result } => self.room_created(result),
            PanelAction::DeleteRoom { room_token } => self.host.delete_room(room_token),
            PanelAction::RoomDeleted { room_token, result } => {
                self.room_deleted(room_token, result);
            },
            PanelAction::OpenRoom { room_token } => self.host.open_room(room_token),
            PanelAction::CopyRoomUrl { room_url } => self.host.copy_string(room_url),
            PanelAction::EmailRoomUrl { room_url } => {
                self.host.compose_email(SHARE_EMAIL_SUBJECT, room_url);
            },
            PanelAction::UpdateRoomList { rooms } => self.update_room_list(rooms),
        }
        Ok(())
    }
}

/// Dedupe by token (first entry wins) and sort newest first.
fn normalized(rooms: Vec<Room>) -> Vec<Room> {
    let mut seen = std::collections::HashSet::new();
    let mut rooms: Vec<Room> =
        rooms.into_iter().filter(|room| seen.insert(room.room_token.clone())).collect();
    Room::sort_newest_first(&mut rooms);
    rooms
}

/// Fill the template's `{{number}}` placeholder with the next sequence
/// number after the highest already in use by the current room list.
fn generate_room_name(template: &str, rooms: &[Room]) -> String {
    let Some((prefix, suffix)) = template.split_once(NAME_NUMBER_PLACEHOLDER) else {
        return template.to_owned();
    };

    let highest = rooms
        .iter()
        .filter_map(|room| {
            room.room_name
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix(suffix))
                .and_then(|digits| digits.parse::<u32>().ok())
        })
        .max()
        .unwrap_or(0);

    format!("{prefix}{number}{suffix}", number = highest + 1)
}
