//! Room data model shared with the host.
//!
//! These types mirror the JSON shape the host hands back from its room
//! operations, hence the camelCase serde renames. The store treats them as
//! opaque records apart from the token (uniqueness key) and creation time
//! (sort key).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque room identifier issued by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomToken(String);

impl RoomToken {
    /// Create a token from its string form.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token's string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomToken {
    fn from(token: &str) -> Self {
        Self(token.to_owned())
    }
}

/// A participant currently connected to a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomParticipant {
    /// Name shown to other participants.
    pub display_name: String,
    /// Account identifier. `None` for guest participants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// Connection ID unique to this participant's session.
    pub room_connection_id: String,
}

/// A room as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique room token.
    pub room_token: RoomToken,
    /// Shareable room URL.
    pub room_url: String,
    /// Display name of the room.
    pub room_name: String,
    /// Maximum number of participants.
    pub max_size: u32,
    /// Participants currently in the room.
    #[serde(default)]
    pub participants: Vec<RoomParticipant>,
    /// Creation time, seconds since the epoch.
    pub ctime: u64,
}

impl Room {
    /// Sort rooms most recently created first, the order the panel lists
    /// them in.
    pub fn sort_newest_first(rooms: &mut [Room]) {
        rooms.sort_by(|a, b| b.ctime.cmp(&a.ctime));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(token: &str, ctime: u64) -> Room {
        Room {
            room_token: RoomToken::from(token),
            room_url: format!("http://sample/{token}"),
            room_name: token.to_owned(),
            max_size: 2,
            participants: Vec::new(),
            ctime,
        }
    }

    #[test]
    fn sort_orders_by_ctime_descending() {
        let mut rooms = vec![room("old", 100), room("new", 300), room("mid", 200)];
        Room::sort_newest_first(&mut rooms);

        let order: Vec<&str> = rooms.iter().map(|r| r.room_token.as_str()).collect();
        assert_eq!(order, ["new", "mid", "old"]);
    }

    #[test]
    fn participant_account_is_optional_in_wire_form() {
        let json = r#"{
            "displayName": "Adam",
            "roomConnectionId": "781f012b-f1ea-4ce1-9105-7cfc36fb4ec7"
        }"#;

        let participant: RoomParticipant = serde_json::from_str(json).unwrap();
        assert_eq!(participant.display_name, "Adam");
        assert_eq!(participant.account, None);
    }

    #[test]
    fn room_round_trips_with_camel_case_fields() {
        let json = serde_json::to_string(&room("QzBbvGmIZWU", 1_405_517_418)).unwrap();
        assert!(json.contains("\"roomToken\""));
        assert!(json.contains("\"roomUrl\""));

        let parsed: Room = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.room_token, RoomToken::from("QzBbvGmIZWU"));
    }
}
