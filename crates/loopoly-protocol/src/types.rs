//! Identity and addressing types shared by every layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique identifier for a connected player.
///
/// Assigned by the server when a connection is accepted, never reused
/// within a process. Clients learn their own id from the `playerInfo`
/// event and must echo it in turn-scoped actions; the server checks the
/// echoed id against the connection that sent the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A caller-supplied room identifier.
///
/// Rooms are keyed by whatever string the creating client chose; two
/// clients naming the same id land in the same game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A room id is usable only if it contains something besides whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Specifies who should receive an outbound event.
///
/// Game logic returns `(Recipient, ServerEvent)` pairs; the room actor
/// resolves each recipient against its seated-player channel table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    /// Every player in the room.
    All,
    /// One specific player.
    Player(PlayerId),
    /// Everyone except the specified player.
    AllExcept(PlayerId),
}

/// One row of the lobby listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub room_id: RoomId,
    /// Number of seated players.
    pub players: usize,
}
