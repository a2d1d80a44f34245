//! Room actor: an isolated Tokio task that owns one game instance.
//!
//! Each room runs in its own task, communicating with the outside world
//! through an mpsc channel. All mutations of a game happen inside its
//! actor, so actions within a room are processed strictly one at a time.

use std::collections::HashMap;

use loopoly_game::Game;
use loopoly_protocol::{PlayerId, Recipient, RoomId, RoomSummary, ServerEvent};
use tokio::sync::{mpsc, oneshot};

use crate::RoomError;

/// Channel sender for delivering events to a player's connection handler.
pub type PlayerSender = mpsc::UnboundedSender<ServerEvent>;

/// A gameplay action forwarded into a room, carrying the player id the
/// client claimed to act as. The game checks the claim against the
/// sender's real id.
#[derive(Debug, Clone)]
pub enum GameAction {
    Move { claimed: PlayerId, position: usize },
    Buy { claimed: PlayerId, cell_index: usize },
    Skip { claimed: PlayerId },
}

/// Commands sent to a room actor through its channel.
///
/// The `oneshot::Sender` in some variants is a reply channel: the
/// caller sends a command and waits for the response.
pub(crate) enum RoomCommand {
    /// Seat a player (or re-send the snapshot to a returning one).
    Join {
        player: PlayerId,
        nickname: String,
        sender: PlayerSender,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    /// Deliver a gameplay action from a player (fire-and-forget).
    Action {
        sender: PlayerId,
        action: GameAction,
    },

    /// Remove a player whose connection dropped.
    Disconnect { player: PlayerId },

    /// Request a summary for the lobby listing.
    Summary {
        reply: oneshot::Sender<RoomSummary>,
    },
}

/// Handle to a running room actor. Used to send commands to it.
///
/// Cheap to clone — it's just an `mpsc::Sender` wrapper.
#[derive(Clone)]
pub struct RoomHandle {
    room_id: RoomId,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// Returns the room's ID.
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// True once the actor has stopped (its game finished).
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Seats a player and waits for the game's verdict.
    pub async fn join(
        &self,
        player: PlayerId,
        nickname: String,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Join {
                player,
                nickname,
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?
    }

    /// Forwards a gameplay action (fire-and-forget).
    pub async fn action(
        &self,
        sender: PlayerId,
        action: GameAction,
    ) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Action { sender, action })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// Notifies the room that a player's connection dropped.
    pub async fn disconnect(&self, player: PlayerId) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Disconnect { player })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// Requests a lobby summary for this room.
    pub async fn summary(&self) -> Result<RoomSummary, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Summary { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor {
    room_id: RoomId,
    game: Game,
    /// Per-player outbound channels.
    senders: HashMap<PlayerId, PlayerSender>,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    /// Runs the actor loop until the game finishes or every handle drops.
    async fn run(mut self) {
        tracing::info!(room_id = %self.room_id.as_str(), "room actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join {
                    player,
                    nickname,
                    sender,
                    reply,
                } => {
                    let result = self.handle_join(player, nickname, sender);
                    let _ = reply.send(result);
                }
                RoomCommand::Action { sender, action } => {
                    self.handle_action(sender, action);
                }
                RoomCommand::Disconnect { player } => {
                    self.handle_disconnect(player);
                }
                RoomCommand::Summary { reply } => {
                    let _ = reply.send(RoomSummary {
                        room_id: self.room_id.clone(),
                        players: self.game.player_count(),
                    });
                }
            }

            if self.game.is_finished() {
                tracing::info!(room_id = %self.room_id.as_str(), "game over");
                break;
            }
        }

        tracing::info!(room_id = %self.room_id.as_str(), "room actor stopped");
    }

    fn handle_join(
        &mut self,
        player: PlayerId,
        nickname: String,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        let events = self.game.join(player, &nickname)?;
        self.senders.insert(player, sender);
        tracing::info!(
            room_id = %self.room_id.as_str(),
            %player,
            players = self.game.player_count(),
            "player joined"
        );
        self.dispatch(events);
        Ok(())
    }

    fn handle_action(&mut self, sender: PlayerId, action: GameAction) {
        let result = match action {
            GameAction::Move { claimed, position } => {
                self.game.move_token(sender, claimed, position)
            }
            GameAction::Buy { claimed, cell_index } => {
                self.game.buy_cell(sender, claimed, cell_index)
            }
            GameAction::Skip { claimed } => self.game.skip_buy(sender, claimed),
        };

        match result {
            Ok(events) => self.dispatch(events),
            Err(err) if err.is_silent() => {
                tracing::debug!(
                    room_id = %self.room_id.as_str(),
                    %sender,
                    %err,
                    "action dropped"
                );
            }
            Err(err) => {
                self.send_to(
                    sender,
                    ServerEvent::ErrorMessage {
                        message: err.to_string(),
                    },
                );
            }
        }
    }

    fn handle_disconnect(&mut self, player: PlayerId) {
        self.senders.remove(&player);
        let events = self.game.handle_disconnect(player);
        if events.is_empty() {
            return;
        }
        tracing::info!(
            room_id = %self.room_id.as_str(),
            %player,
            players = self.game.player_count(),
            "player disconnected"
        );
        self.dispatch(events);
    }

    /// Fans emitted events out to the addressed recipients.
    fn dispatch(&mut self, events: Vec<(Recipient, ServerEvent)>) {
        for (recipient, event) in events {
            match recipient {
                Recipient::All => {
                    for pid in self.recipients() {
                        self.send_to(pid, event.clone());
                    }
                }
                Recipient::Player(pid) => {
                    self.send_to(pid, event);
                }
                Recipient::AllExcept(excluded) => {
                    for pid in self.recipients() {
                        if pid != excluded {
                            self.send_to(pid, event.clone());
                        }
                    }
                }
            }
        }

        // Drop channels for players the game no longer seats
        // (bankrupted mid-dispatch).
        let game = &self.game;
        self.senders.retain(|pid, _| game.is_seated(*pid));
    }

    fn recipients(&self) -> Vec<PlayerId> {
        self.senders.keys().copied().collect()
    }

    /// Sends an event to a single player. Silently drops if the
    /// receiver is gone.
    fn send_to(&self, player: PlayerId, event: ServerEvent) {
        if let Some(sender) = self.senders.get(&player) {
            let _ = sender.send(event);
        }
    }
}

/// Spawns a new room actor task and returns a handle to it.
///
/// `channel_size` bounds the command channel, so senders wait when the
/// actor falls behind.
pub(crate) fn spawn_room(room_id: RoomId, channel_size: usize) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = RoomActor {
        room_id: room_id.clone(),
        game: Game::new(),
        senders: HashMap::new(),
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle {
        room_id,
        sender: tx,
    }
}
