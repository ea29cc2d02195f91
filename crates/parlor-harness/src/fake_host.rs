//! Recording fake for the host capability object.

use std::cell::RefCell;
use std::collections::HashMap;

use parlor_core::{HostApi, NewRoomParams, RoomToken};

/// One recorded host invocation, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    /// `fetch_all_rooms` was initiated.
    FetchAllRooms,
    /// `create_room` was initiated with these parameters.
    CreateRoom(NewRoomParams),
    /// `delete_room` was initiated for this token.
    DeleteRoom(RoomToken),
    /// `open_room` was requested for this token.
    OpenRoom(RoomToken),
    /// Text was copied to the clipboard.
    CopyString(String),
    /// The mail composer was opened.
    ComposeEmail {
        /// Subject message key.
        subject: String,
        /// Mail body.
        body: String,
    },
    /// A call URL expiry was noted.
    NoteCallUrlExpiry(u64),
    /// A telemetry metric was recorded.
    TelemetryAdd {
        /// Metric name.
        metric: String,
        /// Recorded value.
        value: bool,
    },
}

/// [`HostApi`] implementation that records every call and serves scripted
/// preferences.
///
/// Room operations only record the initiation, matching the production
/// contract; tests deliver completions by dispatching the corresponding
/// completion action themselves.
#[derive(Debug, Default)]
pub struct FakeHost {
    calls: RefCell<Vec<HostCall>>,
    prefs: RefCell<HashMap<String, String>>,
}

impl FakeHost {
    /// Create a fake with no scripted prefs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a preference value.
    pub fn set_pref(&self, name: impl Into<String>, value: impl Into<String>) {
        self.prefs.borrow_mut().insert(name.into(), value.into());
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls matching the predicate.
    pub fn count_calls(&self, matches: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| matches(call)).count()
    }

    /// Forget all recorded calls.
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: HostCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl HostApi for FakeHost {
    fn fetch_all_rooms(&self) {
        self.record(HostCall::FetchAllRooms);
    }

    fn create_room(&self, params: NewRoomParams) {
        self.record(HostCall::CreateRoom(params));
    }

    fn delete_room(&self, room_token: &RoomToken) {
        self.record(HostCall::DeleteRoom(room_token.clone()));
    }

    fn open_room(&self, room_token: &RoomToken) {
        self.record(HostCall::OpenRoom(room_token.clone()));
    }

    fn copy_string(&self, text: &str) {
        self.record(HostCall::CopyString(text.to_owned()));
    }

    fn compose_email(&self, subject: &str, body: &str) {
        self.record(HostCall::ComposeEmail { subject: subject.to_owned(), body: body.to_owned() });
    }

    fn note_call_url_expiry(&self, expires_at: u64) {
        self.record(HostCall::NoteCallUrlExpiry(expires_at));
    }

    fn telemetry_add(&self, metric: &str, value: bool) {
        self.record(HostCall::TelemetryAdd { metric: metric.to_owned(), value });
    }

    fn get_pref(&self, name: &str) -> Option<String> {
        self.prefs.borrow().get(name).cloned()
    }
}
