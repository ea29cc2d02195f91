//! Room fixtures in the host wire shape.

use parlor_core::Room;

/// Parse a JSON array of rooms exactly as the host would hand them over.
///
/// # Panics
///
/// Panics on malformed JSON; fixtures are test inputs and a typo should
/// fail loudly.
#[allow(clippy::panic, clippy::expect_used)]
pub fn rooms_from_json(json: &str) -> Vec<Room> {
    serde_json::from_str(json).expect("malformed room fixture")
}

/// Build a minimal room with the given token and creation time.
pub fn room_fixture(token: &str, ctime: u64) -> Room {
    Room {
        room_token: token.into(),
        room_url: format!("http://sample/{token}"),
        room_name: format!("Room {token}"),
        max_size: 2,
        participants: Vec::new(),
        ctime,
    }
}
