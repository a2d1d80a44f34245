//! Core state machine for one Loopoly room.
//!
//! [`Game`] owns everything that changes during a match — positions,
//! balances, cell ownership, nicknames, turn order, and the purchase
//! phase — and exposes one method per inbound action. Each method
//! either applies fully and returns the events to deliver, or returns a
//! [`GameError`] and changes nothing.
//!
//! The crate is deliberately free of I/O and async: serializing
//! concurrent actions against a room is the room actor's job. That
//! keeps every invariant here testable with plain synchronous calls.

mod bankruptcy;
mod economy;
mod error;
mod game;
mod movement;
mod purchase;
mod turn;

pub use error::GameError;
pub use game::{Emitted, Game, MAX_NICKNAME, Phase};
