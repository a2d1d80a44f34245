//! Outbound events: everything the server tells clients about.

use serde::{Deserialize, Serialize};

use crate::{PlayerId, RoomId, RoomSummary};

/// Why a purchase attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseFailReason {
    /// The cell is not buyable (special cell, already owned, or the
    /// claimed index did not match the pending offer).
    NotBuyable,
    /// The buyer's balance is below the fixed price.
    NoMoney,
}

/// A server-to-client event.
///
/// Tag names and payload fields mirror the original wire vocabulary
/// (`playerJoined`, `rentPaid`, `moneyUpdated`, …). Which connections a
/// given event reaches is decided separately, by the [`Recipient`]
/// paired with it — the payload itself is audience-agnostic.
///
/// [`Recipient`]: crate::Recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    /// Lobby listing (unicast reply to `listRooms`).
    RoomsList { rooms: Vec<RoomSummary> },

    /// Acknowledges `createRoom` (unicast).
    RoomCreated { room_id: RoomId },

    /// Tells the joining connection its own identity (unicast).
    PlayerInfo { player_id: PlayerId, nickname: String },

    /// Seeds the joining connection's balance display (unicast).
    MoneyInit { player_id: PlayerId, money: i64 },

    /// A player took a seat in the room.
    PlayerJoined { player_id: PlayerId, nickname: String },

    /// A player's token is now at `position`.
    PlayerMove { player_id: PlayerId, position: usize },

    /// A player's balance changed.
    MoneyUpdated { player_id: PlayerId, money: i64 },

    /// The named player is now the turn holder.
    TurnChanged { player_id: PlayerId },

    /// A full loop was inferred; the start bonus was credited.
    StartPassed {
        player_id: PlayerId,
        nickname: Option<String>,
        bonus: i64,
        money: i64,
    },

    /// An event card was drawn and its delta applied.
    EventCard {
        player_id: PlayerId,
        cell_index: usize,
        card_id: String,
        description: String,
        delta: i64,
        money: i64,
    },

    /// The turn holder landed on a buyable cell and may purchase it.
    /// Sent to the holder as a prompt and to everyone else as a
    /// descriptive notice.
    CanBuyHere { player_id: PlayerId, cell_index: usize },

    /// A purchase completed; the cell now has an owner.
    CellBought {
        player_id: PlayerId,
        nickname: Option<String>,
        cell_index: usize,
        money: i64,
    },

    /// Rent settled between the mover and the cell owner.
    RentPaid {
        from: PlayerId,
        to: PlayerId,
        from_nickname: Option<String>,
        to_nickname: Option<String>,
        cell_index: usize,
        amount: i64,
        money_from: i64,
        money_to: i64,
    },

    /// A purchase attempt failed; the turn advances anyway (unicast).
    PurchaseFailed { reason: PurchaseFailReason },

    /// A player went bankrupt (or disconnected) and left the game.
    PlayerBankrupt {
        player_id: PlayerId,
        nickname: Option<String>,
    },

    /// A bankrupt player's cell returned to the unowned pool.
    CellReleased { cell_index: usize },

    /// One player remains — the game is over and the room is gone.
    /// `winner_id` is absent when a mass-disconnect emptied the room.
    GameOver {
        winner_id: Option<PlayerId>,
        nickname: Option<String>,
    },

    /// A validation failure surfaced to the sender (unicast).
    ErrorMessage { message: String },
}
