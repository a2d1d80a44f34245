//! Token movement and the start-loop bonus.

use loopoly_board::{BOARD_CELLS, CellKind, START_BONUS};
use loopoly_protocol::{PlayerId, Recipient, ServerEvent};

use crate::{Emitted, Game, GameError, Phase};

impl Game {
    /// Moves the holder's token to `position` and runs the landing
    /// settlement chain in fixed order: start bonus, event card, rent,
    /// bankruptcy check, then purchase offer or turn advance.
    ///
    /// The destination is taken from the client as-is; the server does
    /// not re-derive it from a die roll (trust boundary preserved from
    /// the original protocol). Only the board bound is enforced.
    pub fn move_token(
        &mut self,
        sender: PlayerId,
        claimed: PlayerId,
        position: usize,
    ) -> Result<Emitted, GameError> {
        self.authorize(sender, claimed)?;
        if self.phase != Phase::Idle {
            return Err(GameError::DecisionPending);
        }
        if position >= BOARD_CELLS {
            return Err(GameError::InvalidCell(position));
        }

        let mut out = Emitted::new();
        let old = self.players.get(&sender).copied().unwrap_or(0);
        self.players.insert(sender, position);
        out.push((
            Recipient::All,
            ServerEvent::PlayerMove {
                player_id: sender,
                position,
            },
        ));

        // A wrap past start is inferred from the position decreasing.
        // A full loop back to the same cell is not detected (documented
        // quirk of the original heuristic, preserved).
        if position < old {
            self.credit(sender, START_BONUS);
            out.push((
                Recipient::All,
                ServerEvent::StartPassed {
                    player_id: sender,
                    nickname: self.nicknames.get(&sender).cloned(),
                    bonus: START_BONUS,
                    money: self.balance(sender),
                },
            ));
            out.push((Recipient::All, self.money_updated(sender)));
        }

        if CellKind::of(position) == CellKind::Event {
            self.apply_event_card(sender, position, &mut out);
        }

        // Rent is owed on owned cells only; event cells never settle
        // rent even if ownership state were ever inconsistent.
        if let Some(owner) = self.owners[position] {
            if owner != sender && CellKind::of(position) != CellKind::Event {
                self.settle_rent(sender, owner, position, &mut out);
            }
        }

        if self.balance(sender) < 0 {
            self.resolve_bankruptcy(sender, &mut out);
            return Ok(out);
        }

        if self.cell_buyable(position) {
            self.phase = Phase::AwaitingPurchase {
                player: sender,
                cell: position,
            };
            let offer = ServerEvent::CanBuyHere {
                player_id: sender,
                cell_index: position,
            };
            // The holder gets the prompt; the rest get a descriptive
            // copy of the same event.
            out.push((Recipient::Player(sender), offer.clone()));
            out.push((Recipient::AllExcept(sender), offer));
        } else {
            self.advance_turn(&mut out);
        }

        Ok(out)
    }
}
