//! The `Game` type: one room's mutable state, and the join path.
//!
//! All mutation goes through the methods in this crate, each of which
//! returns the events to deliver as `(Recipient, ServerEvent)` pairs.
//! The type is pure and synchronous — serialization of concurrent
//! actions is the room actor's job, one layer up.

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use loopoly_board::{BOARD_CELLS, START_BALANCE};
use loopoly_protocol::{PlayerId, Recipient, ServerEvent};

use crate::GameError;

/// Hard cap on stored nickname length, in characters.
pub const MAX_NICKNAME: usize = 20;

/// Events produced by one processed action.
pub type Emitted = Vec<(Recipient, ServerEvent)>;

/// Whether the room is between turns or waiting on a purchase decision.
///
/// The original kept this state implicit ("the turn hasn't advanced");
/// naming it makes the two-phase purchase protocol checkable and gives a
/// future decision timeout somewhere to attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No decision outstanding; the holder's next action is a move.
    Idle,
    /// The holder landed on a buyable cell and must accept or decline.
    AwaitingPurchase { player: PlayerId, cell: usize },
}

/// One game's complete mutable state.
pub struct Game {
    /// Board position per seated player. An entry exists iff the player
    /// is currently seated.
    pub(crate) players: HashMap<PlayerId, usize>,
    /// Balance per seated player. May transiently go negative, which
    /// immediately triggers bankruptcy.
    pub(crate) money: HashMap<PlayerId, i64>,
    /// Owner per cell. Non-ownable cells stay `None` forever.
    pub(crate) owners: [Option<PlayerId>; BOARD_CELLS],
    /// Display names, trimmed and capped at [`MAX_NICKNAME`] chars.
    pub(crate) nicknames: HashMap<PlayerId, String>,
    /// Seated players in join order; the turn cycles through this.
    pub(crate) turn_order: Vec<PlayerId>,
    /// Index into `turn_order` of the current holder.
    pub(crate) current_turn: usize,
    pub(crate) phase: Phase,
    /// Set when the game-over event has been emitted. A finished game
    /// accepts no further actions; the room actor tears itself down.
    pub(crate) finished: bool,
    pub(crate) rng: SmallRng,
}

impl Game {
    /// Creates an empty game with an OS-seeded RNG for card draws.
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_os_rng())
    }

    /// Creates an empty game with a deterministic card-draw sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            players: HashMap::new(),
            money: HashMap::new(),
            owners: [None; BOARD_CELLS],
            nicknames: HashMap::new(),
            turn_order: Vec::new(),
            current_turn: 0,
            phase: Phase::Idle,
            finished: false,
            rng,
        }
    }

    /// Seats a player and returns the join events: a full snapshot for
    /// the joiner and an announcement for everyone else.
    ///
    /// Joining is idempotent — a re-join by an already-seated id leaves
    /// balance, position, nickname, and turn order untouched but still
    /// re-sends the snapshot so a resyncing client can catch up.
    pub fn join(&mut self, player: PlayerId, nickname: &str) -> Result<Emitted, GameError> {
        let trimmed = nickname.trim();
        if trimmed.is_empty() {
            return Err(GameError::BlankNickname);
        }

        if !self.players.contains_key(&player) {
            let name: String = trimmed.chars().take(MAX_NICKNAME).collect();
            self.players.insert(player, 0);
            self.money.insert(player, START_BALANCE);
            self.nicknames.insert(player, name);
            self.turn_order.push(player);
        }

        let mut out = Emitted::new();
        out.push((
            Recipient::Player(player),
            ServerEvent::PlayerInfo {
                player_id: player,
                nickname: self.nicknames[&player].clone(),
            },
        ));
        out.push((
            Recipient::Player(player),
            ServerEvent::MoneyInit {
                player_id: player,
                money: self.balance(player),
            },
        ));

        // Snapshot of everyone already seated, in turn order.
        for &other in &self.turn_order {
            if other == player {
                continue;
            }
            out.push((
                Recipient::Player(player),
                ServerEvent::PlayerJoined {
                    player_id: other,
                    nickname: self.nicknames[&other].clone(),
                },
            ));
            out.push((
                Recipient::Player(player),
                ServerEvent::PlayerMove {
                    player_id: other,
                    position: self.players[&other],
                },
            ));
            out.push((
                Recipient::Player(player),
                ServerEvent::MoneyUpdated {
                    player_id: other,
                    money: self.balance(other),
                },
            ));
        }

        out.push((
            Recipient::AllExcept(player),
            ServerEvent::PlayerJoined {
                player_id: player,
                nickname: self.nicknames[&player].clone(),
            },
        ));
        out.push((
            Recipient::AllExcept(player),
            ServerEvent::MoneyUpdated {
                player_id: player,
                money: self.balance(player),
            },
        ));

        // Handles the very first join establishing the first turn.
        self.broadcast_turn(&mut out);
        Ok(out)
    }

    /// The admission check every turn-scoped action goes through: the
    /// claimed id must match the sending connection, and both must be
    /// the current turn holder.
    pub(crate) fn authorize(
        &self,
        sender: PlayerId,
        claimed: PlayerId,
    ) -> Result<(), GameError> {
        if sender != claimed {
            return Err(GameError::IdentityMismatch);
        }
        if self.current_holder() != Some(sender) {
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }

    pub(crate) fn balance(&self, player: PlayerId) -> i64 {
        self.money.get(&player).copied().unwrap_or(0)
    }

    pub(crate) fn credit(&mut self, player: PlayerId, delta: i64) {
        if let Some(money) = self.money.get_mut(&player) {
            *money += delta;
        }
    }

    pub(crate) fn money_updated(&self, player: PlayerId) -> ServerEvent {
        ServerEvent::MoneyUpdated {
            player_id: player,
            money: self.balance(player),
        }
    }

    // --- Read-only accessors, used by the room actor and tests ---

    pub fn is_seated(&self, player: PlayerId) -> bool {
        self.players.contains_key(&player)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn balance_of(&self, player: PlayerId) -> Option<i64> {
        self.money.get(&player).copied()
    }

    pub fn position_of(&self, player: PlayerId) -> Option<usize> {
        self.players.get(&player).copied()
    }

    pub fn owner_of(&self, cell: usize) -> Option<PlayerId> {
        self.owners.get(cell).copied().flatten()
    }

    pub fn nickname_of(&self, player: PlayerId) -> Option<&str> {
        self.nicknames.get(&player).map(String::as_str)
    }

    pub fn turn_order(&self) -> &[PlayerId] {
        &self.turn_order
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// `true` once the game-over event has fired. The room holding this
    /// game should be destroyed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
