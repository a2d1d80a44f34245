//! Unified error type for the server crate.

use loopoly_protocol::ProtocolError;
use loopoly_room::RoomError;

use crate::ws::WsError;

/// Top-level error wrapping the lower layers.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// A WebSocket-level error (bind, accept, send, recv).
    #[error(transparent)]
    Ws(#[from] WsError),

    /// A protocol-level error (encode, decode, invalid message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A room-level error (room unavailable, game rejection).
    #[error(transparent)]
    Room(#[from] RoomError),
}
