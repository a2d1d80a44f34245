//! Bankruptcy cleanup and win detection.
//!
//! Bankruptcy is the only way a player leaves a room. It fires when a
//! settlement drives a balance negative, and unconditionally on
//! disconnect — there is no voluntary leave.

use loopoly_board::BOARD_CELLS;
use loopoly_protocol::{PlayerId, Recipient, ServerEvent};

use crate::{Emitted, Game, Phase};

impl Game {
    /// Routes a transport-level disconnect into the bankruptcy path.
    /// A disconnect from someone this game never seated emits nothing.
    pub fn handle_disconnect(&mut self, player: PlayerId) -> Emitted {
        let mut out = Emitted::new();
        if self.is_seated(player) {
            self.resolve_bankruptcy(player, &mut out);
        }
        out
    }

    /// Removes `player` from the game: announces the bankruptcy,
    /// releases every cell they owned, strips their entries, repairs
    /// the turn cursor, and checks the win condition.
    pub(crate) fn resolve_bankruptcy(&mut self, player: PlayerId, out: &mut Emitted) {
        out.push((
            Recipient::All,
            ServerEvent::PlayerBankrupt {
                player_id: player,
                nickname: self.nicknames.get(&player).cloned(),
            },
        ));

        for cell in 0..BOARD_CELLS {
            if self.owners[cell] == Some(player) {
                self.owners[cell] = None;
                out.push((Recipient::All, ServerEvent::CellReleased { cell_index: cell }));
            }
        }

        self.players.remove(&player);
        self.money.remove(&player);
        self.nicknames.remove(&player);

        if let Some(idx) = self.turn_order.iter().position(|p| *p == player) {
            // Keep the cursor pointing at the same logical successor.
            if idx < self.current_turn {
                self.current_turn -= 1;
            }
            self.turn_order.remove(idx);
            if self.current_turn >= self.turn_order.len() {
                self.current_turn = 0;
            }
        }

        // A pending offer owned by the removed player dies with them.
        if matches!(self.phase, Phase::AwaitingPurchase { player: p, .. } if p == player) {
            self.phase = Phase::Idle;
        }

        if self.turn_order.len() <= 1 {
            let winner = self.turn_order.first().copied();
            out.push((
                Recipient::All,
                ServerEvent::GameOver {
                    winner_id: winner,
                    nickname: winner.and_then(|w| self.nicknames.get(&w).cloned()),
                },
            ));
            self.finished = true;
            return;
        }

        self.broadcast_turn(out);
    }
}
