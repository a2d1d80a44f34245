//! Fixed-amount balance effects: event cards and rent settlement.

use rand::Rng;

use loopoly_board::{CELL_RENT, EVENT_DECK};
use loopoly_protocol::{PlayerId, Recipient, ServerEvent};

use crate::{Emitted, Game};

impl Game {
    /// Draws one card uniformly from the fixed deck, applies its delta,
    /// and emits the outcome plus a balance update.
    pub(crate) fn apply_event_card(
        &mut self,
        player: PlayerId,
        cell: usize,
        out: &mut Emitted,
    ) {
        let card = EVENT_DECK[self.rng.random_range(0..EVENT_DECK.len())];
        self.credit(player, card.delta);

        out.push((
            Recipient::All,
            ServerEvent::EventCard {
                player_id: player,
                cell_index: cell,
                card_id: card.id.to_string(),
                description: card.description.to_string(),
                delta: card.delta,
                money: self.balance(player),
            },
        ));
        out.push((Recipient::All, self.money_updated(player)));
    }

    /// Transfers the fixed rent from the mover to the cell owner. The
    /// mover's balance may go negative here; the caller checks for
    /// bankruptcy immediately after.
    pub(crate) fn settle_rent(
        &mut self,
        mover: PlayerId,
        owner: PlayerId,
        cell: usize,
        out: &mut Emitted,
    ) {
        self.credit(mover, -CELL_RENT);
        self.credit(owner, CELL_RENT);

        out.push((
            Recipient::All,
            ServerEvent::RentPaid {
                from: mover,
                to: owner,
                from_nickname: self.nicknames.get(&mover).cloned(),
                to_nickname: self.nicknames.get(&owner).cloned(),
                cell_index: cell,
                amount: CELL_RENT,
                money_from: self.balance(mover),
                money_to: self.balance(owner),
            },
        ));
        out.push((Recipient::All, self.money_updated(mover)));
        out.push((Recipient::All, self.money_updated(owner)));
    }
}
