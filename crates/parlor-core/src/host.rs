//! Host capability surface.
//!
//! The host surface is an explicitly injected [`HostApi`] capability object
//! handed to stores and flows at construction, never an ambient global. Implementations are expected to be
//! cheap to call and non-blocking: room operations only *initiate* work, and
//! their completions come back as fresh [`PanelAction`](crate::PanelAction)
//! dispatches on a later turn.

use thiserror::Error;

use crate::room::RoomToken;

/// Preference holding the maximum participant count for new rooms.
pub const PREF_ROOMS_MAX_SIZE: &str = "rooms.max-size";

/// Telemetry metric recorded the first time a call URL is shared.
pub const TELEMETRY_CALL_URL_SHARED: &str = "call_url_shared";

/// Parameters for a room creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoomParams {
    /// Display name for the new room.
    pub room_name: String,
    /// Account identifier of the room owner.
    pub room_owner: String,
    /// Maximum number of participants.
    pub max_size: u32,
}

/// Errors reported by host operations.
///
/// Completions carry these by value, so the type is cloneable and supports
/// structural comparison in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The host reported a failure with a reason string.
    #[error("host call failed: {0}")]
    Failed(String),

    /// The host rejected the request outright.
    #[error("host rejected request: {reason} (code {code})")]
    Rejected {
        /// Host-defined error code.
        code: u16,
        /// Human-readable rejection reason.
        reason: String,
    },

    /// The host capability is not available in this session.
    #[error("host unavailable")]
    Unavailable,
}

/// Capability object supplying clipboard, telemetry, preference, and
/// room-data operations.
///
/// Room operations (`fetch_all_rooms`, `create_room`, `delete_room`) are
/// fire-and-forget initiations; the host delivers the outcome by dispatching
/// the matching completion action (`RoomsFetched`, `RoomCreated`,
/// `RoomDeleted`) on its own turn. The remaining methods take effect
/// immediately.
///
/// The delta-sync version argument the host's native `getAll` accepts is
/// deliberately absent: this core never produces a version and the reply
/// carries none.
pub trait HostApi {
    /// Start fetching the full room list.
    fn fetch_all_rooms(&self);

    /// Start creating a room.
    fn create_room(&self, params: NewRoomParams);

    /// Start deleting the room with the given token.
    fn delete_room(&self, room_token: &RoomToken);

    /// Navigate to the room with the given token.
    fn open_room(&self, room_token: &RoomToken);

    /// Copy text to the system clipboard.
    fn copy_string(&self, text: &str);

    /// Open the mail composer prefilled with the given subject and body.
    fn compose_email(&self, subject: &str, body: &str);

    /// Record that a call URL with the given expiry was handed out.
    fn note_call_url_expiry(&self, expires_at: u64);

    /// Record a boolean telemetry metric.
    fn telemetry_add(&self, metric: &str, value: bool);

    /// Read a host preference. `None` when unset.
    fn get_pref(&self, name: &str) -> Option<String>;
}
