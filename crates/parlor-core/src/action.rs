//! Panel actions.
//!
//! [`PanelAction`] is the tagged union flowing through the
//! [`Dispatcher`](crate::Dispatcher): UI intents constructed by view code,
//! plus completion events the host dispatches when an initiated room
//! operation finishes. An action is never mutated after construction and
//! compares structurally, so tests can assert on exact instances.

use crate::host::HostError;
use crate::room::{Room, RoomToken};

/// Actions broadcast through the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    /// Fetch the full room list from the host.
    GetAllRooms,

    /// Room-list fetch finished.
    RoomsFetched {
        /// The fetched rooms, or the host failure.
        result: Result<Vec<Room>, HostError>,
    },

    /// Create a new room.
    CreateRoom {
        /// Room name template with a `{{number}}` placeholder.
        name_template: String,
        /// Account identifier of the room owner.
        room_owner: String,
    },

    /// Room creation finished.
    RoomCreated {
        /// The created room, or the host failure.
        result: Result<Room, HostError>,
    },

    /// Delete a room.
    DeleteRoom {
        /// Token of the room to delete.
        room_token: RoomToken,
    },

    /// Room deletion finished.
    RoomDeleted {
        /// Token the deletion was requested for.
        room_token: RoomToken,
        /// Success, or the host failure.
        result: Result<(), HostError>,
    },

    /// Navigate to a room.
    OpenRoom {
        /// Token of the room to open.
        room_token: RoomToken,
    },

    /// Copy a room URL to the clipboard.
    CopyRoomUrl {
        /// URL to copy.
        room_url: String,
    },

    /// Share a room URL via the mail composer.
    EmailRoomUrl {
        /// URL to share.
        room_url: String,
    },

    /// Host pushed an updated room list.
    UpdateRoomList {
        /// The replacement room list.
        rooms: Vec<Room>,
    },
}

impl PanelAction {
    /// Stable variant name, for logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetAllRooms => "GetAllRooms",
            Self::RoomsFetched { .. } => "RoomsFetched",
            Self::CreateRoom { .. } => "CreateRoom",
            Self::RoomCreated { .. } => "RoomCreated",
            Self::DeleteRoom { .. } => "DeleteRoom",
            Self::RoomDeleted { .. } => "RoomDeleted",
            Self::OpenRoom { .. } => "OpenRoom",
            Self::CopyRoomUrl { .. } => "CopyRoomUrl",
            Self::EmailRoomUrl { .. } => "EmailRoomUrl",
            Self::UpdateRoomList { .. } => "UpdateRoomList",
        }
    }
}
