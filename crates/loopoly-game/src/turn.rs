//! Turn scheduling: who acts now, and moving the cursor forward.

use loopoly_protocol::{PlayerId, Recipient, ServerEvent};

use crate::{Emitted, Game};

impl Game {
    /// The only player whose turn-scoped actions are currently valid,
    /// or `None` for an empty room.
    pub fn current_holder(&self) -> Option<PlayerId> {
        self.turn_order.get(self.current_turn).copied()
    }

    /// Moves the cursor to the next player and announces them.
    /// No-op (and no broadcast) for an empty room.
    pub(crate) fn advance_turn(&mut self, out: &mut Emitted) {
        if self.turn_order.is_empty() {
            return;
        }
        self.current_turn = (self.current_turn + 1) % self.turn_order.len();
        self.broadcast_turn(out);
    }

    /// Announces the current holder without moving the cursor, clamping
    /// it back into range if removals left it dangling.
    pub(crate) fn broadcast_turn(&mut self, out: &mut Emitted) {
        if self.turn_order.is_empty() {
            return;
        }
        if self.current_turn >= self.turn_order.len() {
            self.current_turn = 0;
        }
        out.push((
            Recipient::All,
            ServerEvent::TurnChanged {
                player_id: self.turn_order[self.current_turn],
            },
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loopoly_protocol::PlayerId;

    fn two_player_game() -> Game {
        let mut game = Game::with_seed(1);
        game.join(PlayerId(1), "alice").unwrap();
        game.join(PlayerId(2), "bob").unwrap();
        game
    }

    #[test]
    fn test_holder_is_none_for_empty_room() {
        let game = Game::with_seed(1);
        assert_eq!(game.current_holder(), None);
    }

    #[test]
    fn test_advance_cycles_through_join_order() {
        let mut game = two_player_game();
        assert_eq!(game.current_holder(), Some(PlayerId(1)));

        let mut out = Emitted::new();
        game.advance_turn(&mut out);
        assert_eq!(game.current_holder(), Some(PlayerId(2)));
        assert_eq!(
            out,
            vec![(
                Recipient::All,
                ServerEvent::TurnChanged { player_id: PlayerId(2) }
            )]
        );

        game.advance_turn(&mut out);
        assert_eq!(game.current_holder(), Some(PlayerId(1)));
    }

    #[test]
    fn test_advance_on_empty_room_is_silent() {
        let mut game = Game::with_seed(1);
        let mut out = Emitted::new();
        game.advance_turn(&mut out);
        assert!(out.is_empty());
    }
}
