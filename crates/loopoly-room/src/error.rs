//! Error types for the room layer.

use loopoly_game::GameError;
use loopoly_protocol::RoomId;

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The room's command channel is closed (actor stopped).
    #[error("room {0} is unavailable")]
    Unavailable(RoomId),

    /// The game rejected the operation.
    #[error(transparent)]
    Game(#[from] GameError),
}
