//! Per-connection handler: decode client actions and route them.
//!
//! Each accepted connection gets its own Tokio task running this
//! handler, plus a writer task that drains the connection's event
//! channel. The room actors push events into that same channel, so
//! everything a client sees leaves in one ordered stream.

use std::sync::Arc;

use loopoly_protocol::{ClientAction, Codec, PlayerId, RoomId, ServerEvent};
use loopoly_room::{GameAction, PlayerSender, RoomHandle};
use tokio::sync::mpsc;

use crate::server::ServerState;
use crate::ws::WsConnection;
use crate::ServerError;

/// Sent back when `createRoom`/`joinRoom` arrives with a blank room id
/// or nickname.
const MISSING_FIELDS: &str = "nickname and room id are required";

/// Drop guard announcing a dropped connection to every live room.
///
/// The server does not track which room a connection joined, so the
/// disconnect fans out to all rooms and those that never seated the
/// player ignore it. Since `Drop` is synchronous, the async work runs
/// in a fire-and-forget task.
struct DisconnectGuard {
    player_id: PlayerId,
    state: Arc<ServerState>,
}

impl Drop for DisconnectGuard {
    fn drop(&mut self) {
        let player_id = self.player_id;
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let handles = state.registry.lock().await.room_handles();
            for handle in handles {
                let _ = handle.disconnect(player_id).await;
            }
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: WsConnection,
    state: Arc<ServerState>,
) -> Result<(), ServerError> {
    let player_id = conn.player_id();
    let conn = Arc::new(conn);

    // Writer task: everything addressed to this player funnels through
    // one channel, which also serves as the room-side PlayerSender.
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let writer = tokio::spawn(write_events(Arc::clone(&conn), Arc::clone(&state), event_rx));

    let _guard = DisconnectGuard {
        player_id,
        state: Arc::clone(&state),
    };

    loop {
        let data = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::info!(%player_id, "connection closed");
                break;
            }
            Err(e) => {
                tracing::debug!(%player_id, error = %e, "recv error");
                break;
            }
        };

        let action: ClientAction = match state.codec.decode(&data) {
            Ok(action) => action,
            Err(e) => {
                tracing::debug!(%player_id, error = %e, "undecodable action dropped");
                continue;
            }
        };

        handle_action(player_id, action, &state, &event_tx).await;
    }

    // Stop the writer; the guard drop announces the disconnect.
    drop(event_tx);
    let _ = writer.await;
    Ok(())
}

/// Dispatches one decoded client action.
async fn handle_action(
    player_id: PlayerId,
    action: ClientAction,
    state: &Arc<ServerState>,
    event_tx: &PlayerSender,
) {
    match action {
        ClientAction::ListRooms => {
            let rooms = state.registry.lock().await.list().await;
            let _ = event_tx.send(ServerEvent::RoomsList { rooms });
        }

        ClientAction::CreateRoom { room_id, nickname } => {
            if room_id.is_blank() || nickname.trim().is_empty() {
                let _ = event_tx.send(ServerEvent::ErrorMessage {
                    message: MISSING_FIELDS.into(),
                });
                return;
            }
            // The ack precedes the join snapshot in the client's stream.
            let _ = event_tx.send(ServerEvent::RoomCreated {
                room_id: room_id.clone(),
            });
            join_room(player_id, &room_id, nickname, state, event_tx).await;
        }

        ClientAction::JoinRoom { room_id, nickname } => {
            if room_id.is_blank() || nickname.trim().is_empty() {
                let _ = event_tx.send(ServerEvent::ErrorMessage {
                    message: MISSING_FIELDS.into(),
                });
                return;
            }
            join_room(player_id, &room_id, nickname, state, event_tx).await;
        }

        ClientAction::Move {
            room_id,
            player_id: claimed,
            position,
        } => {
            route(
                player_id,
                &room_id,
                GameAction::Move { claimed, position },
                state,
            )
            .await;
        }

        ClientAction::BuyCell {
            room_id,
            player_id: claimed,
            cell_index,
        } => {
            route(
                player_id,
                &room_id,
                GameAction::Buy { claimed, cell_index },
                state,
            )
            .await;
        }

        ClientAction::SkipBuy {
            room_id,
            player_id: claimed,
        } => {
            route(player_id, &room_id, GameAction::Skip { claimed }, state).await;
        }
    }
}

/// Joins a player into a room, creating it on first use. Rejections
/// come back as an `errorMessage` on the player's own stream.
async fn join_room(
    player_id: PlayerId,
    room_id: &RoomId,
    nickname: String,
    state: &Arc<ServerState>,
    event_tx: &PlayerSender,
) {
    // Take the handle under the lock, join without it.
    let handle = state.registry.lock().await.create_or_get(room_id);
    if let Err(e) = handle.join(player_id, nickname, event_tx.clone()).await {
        let _ = event_tx.send(ServerEvent::ErrorMessage {
            message: e.to_string(),
        });
    }
}

/// Routes a gameplay action to its room. Unknown rooms are ignored,
/// matching how the games treat unauthorized actions.
async fn route(
    player_id: PlayerId,
    room_id: &RoomId,
    action: GameAction,
    state: &Arc<ServerState>,
) {
    let handle: Option<RoomHandle> = state.registry.lock().await.get(room_id);
    match handle {
        Some(handle) => {
            if let Err(e) = handle.action(player_id, action).await {
                tracing::debug!(%player_id, error = %e, "room refused action");
            }
        }
        None => {
            tracing::debug!(
                %player_id,
                room_id = %room_id.as_str(),
                "action for unknown room dropped"
            );
        }
    }
}

/// Drains the player's event channel onto the wire.
async fn write_events(
    conn: Arc<WsConnection>,
    state: Arc<ServerState>,
    mut event_rx: mpsc::UnboundedReceiver<ServerEvent>,
) {
    while let Some(event) = event_rx.recv().await {
        let bytes = match state.codec.encode(&event) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(error = %e, "failed to encode event");
                continue;
            }
        };
        if conn.send(&bytes).await.is_err() {
            break;
        }
    }
    let _ = conn.close().await;
}
