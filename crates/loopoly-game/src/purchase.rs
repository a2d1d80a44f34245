//! The two-phase purchase flow: offer, then accept or decline.

use loopoly_board::{CELL_PRICE, is_ownable};
use loopoly_protocol::{PlayerId, PurchaseFailReason, Recipient, ServerEvent};

use crate::{Emitted, Game, GameError, Phase};

impl Game {
    /// `true` if the cell could be bought right now: ownable by
    /// topology and currently unowned.
    pub(crate) fn cell_buyable(&self, cell: usize) -> bool {
        is_ownable(cell) && self.owners[cell].is_none()
    }

    /// Accepts the pending purchase offer.
    ///
    /// On success the price is debited, ownership assigned, and the turn
    /// advances. Business failures (`not_buyable`, `no_money`) are
    /// reported to the buyer only, and the turn advances regardless so a
    /// failed purchase can never stall the room.
    pub fn buy_cell(
        &mut self,
        sender: PlayerId,
        claimed: PlayerId,
        cell_index: usize,
    ) -> Result<Emitted, GameError> {
        self.authorize(sender, claimed)?;
        let Phase::AwaitingPurchase { cell, .. } = self.phase else {
            return Err(GameError::NoPendingOffer);
        };

        let mut out = Emitted::new();
        self.phase = Phase::Idle;

        // Buying a different cell than the one offered resolves as a
        // normal business failure, not a protocol violation.
        if cell_index != cell || !self.cell_buyable(cell) {
            out.push((
                Recipient::Player(sender),
                ServerEvent::PurchaseFailed {
                    reason: PurchaseFailReason::NotBuyable,
                },
            ));
            self.advance_turn(&mut out);
            return Ok(out);
        }

        if self.balance(sender) < CELL_PRICE {
            out.push((
                Recipient::Player(sender),
                ServerEvent::PurchaseFailed {
                    reason: PurchaseFailReason::NoMoney,
                },
            ));
            self.advance_turn(&mut out);
            return Ok(out);
        }

        self.credit(sender, -CELL_PRICE);
        self.owners[cell] = Some(sender);

        out.push((
            Recipient::All,
            ServerEvent::CellBought {
                player_id: sender,
                nickname: self.nicknames.get(&sender).cloned(),
                cell_index: cell,
                money: self.balance(sender),
            },
        ));
        out.push((Recipient::All, self.money_updated(sender)));
        self.advance_turn(&mut out);
        Ok(out)
    }

    /// Declines the pending purchase offer: no state change beyond
    /// clearing the offer and advancing the turn.
    pub fn skip_buy(&mut self, sender: PlayerId, claimed: PlayerId) -> Result<Emitted, GameError> {
        self.authorize(sender, claimed)?;
        if !matches!(self.phase, Phase::AwaitingPurchase { .. }) {
            return Err(GameError::NoPendingOffer);
        }

        self.phase = Phase::Idle;
        let mut out = Emitted::new();
        self.advance_turn(&mut out);
        Ok(out)
    }
}
