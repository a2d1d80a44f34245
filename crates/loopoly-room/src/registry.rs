//! Room registry: creates rooms on demand and routes actions to them.

use std::collections::HashMap;

use loopoly_protocol::{PlayerId, RoomId, RoomSummary};

use crate::actor::spawn_room;
use crate::{GameAction, PlayerSender, RoomError, RoomHandle};

/// Default command channel size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Tracks all live rooms, keyed by the client-chosen room ID.
///
/// Rooms are created lazily the first time a player joins under an ID.
/// A room whose game has ended leaves a closed handle behind; the
/// registry prunes those lazily, so the same ID can host a fresh game
/// afterwards.
pub struct Registry {
    rooms: HashMap<RoomId, RoomHandle>,
}

impl Registry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
        }
    }

    /// Returns the handle for `room_id`, spawning a fresh actor if none
    /// exists or the previous game there has ended.
    pub fn create_or_get(&mut self, room_id: &RoomId) -> RoomHandle {
        if let Some(handle) = self.rooms.get(room_id) {
            if !handle.is_closed() {
                return handle.clone();
            }
        }
        let handle = spawn_room(room_id.clone(), DEFAULT_CHANNEL_SIZE);
        tracing::info!(room_id = %room_id.as_str(), "room created");
        self.rooms.insert(room_id.clone(), handle.clone());
        handle
    }

    /// Returns the live handle for `room_id`, if any.
    ///
    /// Used for routing actions: an action naming an unknown or dead
    /// room is dropped by the caller, not an error to the client.
    pub fn get(&self, room_id: &RoomId) -> Option<RoomHandle> {
        self.rooms
            .get(room_id)
            .filter(|handle| !handle.is_closed())
            .cloned()
    }

    /// Joins a player into a room, creating it if needed.
    pub async fn join(
        &mut self,
        room_id: &RoomId,
        player: PlayerId,
        nickname: String,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        let handle = self.create_or_get(room_id);
        handle.join(player, nickname, sender).await
    }

    /// Routes a gameplay action to a room. Unknown rooms are ignored.
    pub async fn route(
        &self,
        room_id: &RoomId,
        sender: PlayerId,
        action: GameAction,
    ) -> Result<(), RoomError> {
        match self.get(room_id) {
            Some(handle) => handle.action(sender, action).await,
            None => {
                tracing::debug!(
                    room_id = %room_id.as_str(),
                    %sender,
                    "action for unknown room dropped"
                );
                Ok(())
            }
        }
    }

    /// Summarizes every live room for the lobby listing, pruning dead
    /// handles along the way.
    pub async fn list(&mut self) -> Vec<RoomSummary> {
        self.rooms.retain(|_, handle| !handle.is_closed());

        let mut rooms = Vec::with_capacity(self.rooms.len());
        for handle in self.rooms.values() {
            if let Ok(summary) = handle.summary().await {
                rooms.push(summary);
            }
        }
        rooms.sort_by(|a, b| a.room_id.as_str().cmp(b.room_id.as_str()));
        rooms
    }

    /// Returns cloned handles to all live rooms.
    ///
    /// A dropped connection is announced to every room this way, since
    /// the server does not track which room a connection joined.
    pub fn room_handles(&self) -> Vec<RoomHandle> {
        self.rooms
            .values()
            .filter(|handle| !handle.is_closed())
            .cloned()
            .collect()
    }

    /// Returns the number of tracked rooms, dead handles included.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
