//! Integration tests for the room layer: actors, routing, lifecycle.

use std::time::Duration;

use loopoly_protocol::{PlayerId, RoomId, ServerEvent};
use loopoly_room::{GameAction, Registry, RoomError};
use tokio::sync::mpsc;

fn pid(id: u64) -> PlayerId {
    PlayerId(id)
}

fn rid(id: &str) -> RoomId {
    RoomId::new(id)
}

/// Creates a player channel pair for receiving room events.
fn player_channel() -> (
    mpsc::UnboundedSender<ServerEvent>,
    mpsc::UnboundedReceiver<ServerEvent>,
) {
    mpsc::unbounded_channel()
}

/// Lets the room actor process queued commands, then drains everything
/// the player received so far.
async fn drain(rx: &mut mpsc::UnboundedReceiver<ServerEvent>) -> Vec<ServerEvent> {
    tokio::time::sleep(Duration::from_millis(10)).await;
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_join_creates_room() {
    let mut registry = Registry::new();
    let (tx, mut rx) = player_channel();

    registry
        .join(&rid("alpha"), pid(1), "alice".into(), tx)
        .await
        .unwrap();

    assert_eq!(registry.room_count(), 1);

    let events = drain(&mut rx).await;
    assert!(events
        .iter()
        .any(|e| matches!(e, ServerEvent::PlayerInfo { player_id: PlayerId(1), .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, ServerEvent::MoneyInit { money: 1500, .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, ServerEvent::TurnChanged { player_id: PlayerId(1) })));
}

#[tokio::test]
async fn test_join_blank_nickname_rejected() {
    let mut registry = Registry::new();
    let (tx, _rx) = player_channel();

    let result = registry.join(&rid("alpha"), pid(1), "   ".into(), tx).await;

    assert!(matches!(result, Err(RoomError::Game(_))));
}

#[tokio::test]
async fn test_second_join_announced_to_first() {
    let mut registry = Registry::new();
    let (tx1, mut rx1) = player_channel();
    let (tx2, mut rx2) = player_channel();

    let room = rid("alpha");
    registry.join(&room, pid(1), "alice".into(), tx1).await.unwrap();
    drain(&mut rx1).await;

    registry.join(&room, pid(2), "bob".into(), tx2).await.unwrap();

    let to_first = drain(&mut rx1).await;
    assert!(to_first
        .iter()
        .any(|e| matches!(e, ServerEvent::PlayerJoined { player_id: PlayerId(2), .. })));

    // The joiner gets a snapshot of the earlier player too.
    let to_second = drain(&mut rx2).await;
    assert!(to_second
        .iter()
        .any(|e| matches!(e, ServerEvent::PlayerJoined { player_id: PlayerId(1), .. })));
    assert!(to_second
        .iter()
        .any(|e| matches!(e, ServerEvent::PlayerInfo { player_id: PlayerId(2), .. })));
}

#[tokio::test]
async fn test_move_broadcast_to_all() {
    let mut registry = Registry::new();
    let (tx1, mut rx1) = player_channel();
    let (tx2, mut rx2) = player_channel();

    let room = rid("alpha");
    registry.join(&room, pid(1), "alice".into(), tx1).await.unwrap();
    registry.join(&room, pid(2), "bob".into(), tx2).await.unwrap();
    drain(&mut rx1).await;
    drain(&mut rx2).await;

    registry
        .route(
            &room,
            pid(1),
            GameAction::Move { claimed: pid(1), position: 3 },
        )
        .await
        .unwrap();

    for rx in [&mut rx1, &mut rx2] {
        let events = drain(rx).await;
        assert!(
            events.iter().any(|e| matches!(
                e,
                ServerEvent::PlayerMove { player_id: PlayerId(1), position: 3 }
            )),
            "both players should see the move"
        );
    }
}

#[tokio::test]
async fn test_out_of_turn_action_dropped_silently() {
    let mut registry = Registry::new();
    let (tx1, mut rx1) = player_channel();
    let (tx2, mut rx2) = player_channel();

    let room = rid("alpha");
    registry.join(&room, pid(1), "alice".into(), tx1).await.unwrap();
    registry.join(&room, pid(2), "bob".into(), tx2).await.unwrap();
    drain(&mut rx1).await;
    drain(&mut rx2).await;

    // Player 2 acts while it's player 1's turn.
    registry
        .route(
            &room,
            pid(2),
            GameAction::Move { claimed: pid(2), position: 3 },
        )
        .await
        .unwrap();

    assert!(drain(&mut rx1).await.is_empty());
    assert!(drain(&mut rx2).await.is_empty(), "no error, no echo");
}

#[tokio::test]
async fn test_off_board_move_gets_error_message() {
    let mut registry = Registry::new();
    let (tx1, mut rx1) = player_channel();
    let (tx2, mut rx2) = player_channel();

    let room = rid("alpha");
    registry.join(&room, pid(1), "alice".into(), tx1).await.unwrap();
    registry.join(&room, pid(2), "bob".into(), tx2).await.unwrap();
    drain(&mut rx1).await;
    drain(&mut rx2).await;

    registry
        .route(
            &room,
            pid(1),
            GameAction::Move { claimed: pid(1), position: 99 },
        )
        .await
        .unwrap();

    let to_actor = drain(&mut rx1).await;
    assert!(to_actor
        .iter()
        .any(|e| matches!(e, ServerEvent::ErrorMessage { .. })));
    assert!(drain(&mut rx2).await.is_empty(), "error is unicast");
}

#[tokio::test]
async fn test_action_for_unknown_room_is_ignored() {
    let registry = Registry::new();
    registry
        .route(
            &rid("ghost"),
            pid(1),
            GameAction::Skip { claimed: pid(1) },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_rooms() {
    let mut registry = Registry::new();
    assert!(registry.list().await.is_empty());

    let (tx1, _rx1) = player_channel();
    let (tx2, _rx2) = player_channel();
    let (tx3, _rx3) = player_channel();
    registry.join(&rid("alpha"), pid(1), "alice".into(), tx1).await.unwrap();
    registry.join(&rid("alpha"), pid(2), "bob".into(), tx2).await.unwrap();
    registry.join(&rid("beta"), pid(3), "carol".into(), tx3).await.unwrap();

    let rooms = registry.list().await;
    assert_eq!(rooms.len(), 2);
    assert_eq!(rooms[0].room_id, rid("alpha"));
    assert_eq!(rooms[0].players, 2);
    assert_eq!(rooms[1].room_id, rid("beta"));
    assert_eq!(rooms[1].players, 1);
}

#[tokio::test]
async fn test_room_closes_after_game_over() {
    let mut registry = Registry::new();
    let (tx1, mut rx1) = player_channel();
    let (tx2, _rx2) = player_channel();

    let room = rid("alpha");
    registry.join(&room, pid(1), "alice".into(), tx1).await.unwrap();
    registry.join(&room, pid(2), "bob".into(), tx2).await.unwrap();
    drain(&mut rx1).await;

    // Second player drops: first wins, the actor stops.
    let handle = registry.get(&room).expect("room is live");
    handle.disconnect(pid(2)).await.unwrap();

    let events = drain(&mut rx1).await;
    assert!(events.iter().any(|e| matches!(
        e,
        ServerEvent::GameOver { winner_id: Some(PlayerId(1)), .. }
    )));

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(handle.is_closed());
    assert!(registry.get(&room).is_none());
}

#[tokio::test]
async fn test_room_id_reusable_after_game_over() {
    let mut registry = Registry::new();
    let (tx1, _rx1) = player_channel();
    let (tx2, _rx2) = player_channel();

    let room = rid("alpha");
    registry.join(&room, pid(1), "alice".into(), tx1).await.unwrap();
    registry.join(&room, pid(2), "bob".into(), tx2).await.unwrap();

    let handle = registry.get(&room).expect("room is live");
    handle.disconnect(pid(1)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(handle.is_closed());

    // A fresh game starts under the same ID.
    let (tx3, mut rx3) = player_channel();
    registry.join(&room, pid(3), "dave".into(), tx3).await.unwrap();

    let events = drain(&mut rx3).await;
    assert!(events
        .iter()
        .any(|e| matches!(e, ServerEvent::MoneyInit { money: 1500, .. })));
}

#[tokio::test]
async fn test_disconnect_fanout_skips_unseated() {
    let mut registry = Registry::new();
    let (tx1, mut rx1) = player_channel();
    let (tx2, _rx2) = player_channel();
    let (tx3, mut rx3) = player_channel();

    registry.join(&rid("alpha"), pid(1), "alice".into(), tx1).await.unwrap();
    registry.join(&rid("alpha"), pid(2), "bob".into(), tx2).await.unwrap();
    registry.join(&rid("beta"), pid(3), "carol".into(), tx3).await.unwrap();
    drain(&mut rx1).await;
    drain(&mut rx3).await;

    // Player 2's connection drops; the server announces it everywhere.
    for handle in registry.room_handles() {
        handle.disconnect(pid(2)).await.unwrap();
    }

    let to_roommate = drain(&mut rx1).await;
    assert!(to_roommate.iter().any(|e| matches!(
        e,
        ServerEvent::PlayerBankrupt { player_id: PlayerId(2), .. }
    )));

    // The other room never seated player 2, so it stays quiet.
    assert!(drain(&mut rx3).await.is_empty());
}
