//! Inbound actions: everything a client can ask the server to do.

use serde::{Deserialize, Serialize};

use crate::{PlayerId, RoomId};

/// A client-to-server action.
///
/// Internally tagged with camelCase names so the wire format matches the
/// original socket.io event vocabulary (`"type": "joinRoom"`, …).
/// Turn-scoped actions (`move`, `buyCell`, `skipBuy`) carry the acting
/// player's id; the server accepts them only when that id matches both
/// the sending connection and the current turn holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientAction {
    /// Request the lobby listing.
    ListRooms,

    /// Create (or idempotently join) a room and take a seat.
    CreateRoom { room_id: RoomId, nickname: String },

    /// Join a room, creating it if it does not exist yet.
    JoinRoom { room_id: RoomId, nickname: String },

    /// Move the token to a destination cell. The destination is
    /// client-supplied; the server does not validate the step size.
    Move {
        room_id: RoomId,
        player_id: PlayerId,
        position: usize,
    },

    /// Accept a pending purchase offer for the named cell.
    BuyCell {
        room_id: RoomId,
        player_id: PlayerId,
        cell_index: usize,
    },

    /// Decline a pending purchase offer.
    SkipBuy { room_id: RoomId, player_id: PlayerId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_tags_are_camel_case() {
        let json: serde_json::Value =
            serde_json::to_value(&ClientAction::ListRooms).unwrap();
        assert_eq!(json["type"], "listRooms");

        let json: serde_json::Value = serde_json::to_value(&ClientAction::SkipBuy {
            room_id: RoomId::new("R1"),
            player_id: PlayerId(3),
        })
        .unwrap();
        assert_eq!(json["type"], "skipBuy");
        assert_eq!(json["roomId"], "R1");
        assert_eq!(json["playerId"], 3);
    }

    #[test]
    fn test_move_fields_are_camel_case() {
        let json: serde_json::Value = serde_json::to_value(&ClientAction::Move {
            room_id: RoomId::new("R1"),
            player_id: PlayerId(1),
            position: 5,
        })
        .unwrap();
        assert_eq!(json["type"], "move");
        assert_eq!(json["roomId"], "R1");
        assert_eq!(json["playerId"], 1);
        assert_eq!(json["position"], 5);
    }

    #[test]
    fn test_join_room_round_trip() {
        let action = ClientAction::JoinRoom {
            room_id: RoomId::new("lobby"),
            nickname: "alice".into(),
        };
        let bytes = serde_json::to_vec(&action).unwrap();
        let decoded: ClientAction = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(action, decoded);
    }

    #[test]
    fn test_buy_cell_decodes_from_wire_json() {
        let json = r#"{"type":"buyCell","roomId":"R1","playerId":2,"cellIndex":5}"#;
        let action: ClientAction = serde_json::from_str(json).unwrap();
        assert_eq!(
            action,
            ClientAction::BuyCell {
                room_id: RoomId::new("R1"),
                player_id: PlayerId(2),
                cell_index: 5,
            }
        );
    }

    #[test]
    fn test_unknown_action_tag_is_rejected() {
        let json = r#"{"type":"rollDice","roomId":"R1"}"#;
        let result: Result<ClientAction, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
