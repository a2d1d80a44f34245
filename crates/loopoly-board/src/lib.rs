//! Static board topology and fixed economy for Loopoly.
//!
//! The board is a 40-cell loop. Classification and pricing are fixed at
//! compile time — there is no per-room board state here. The richer
//! per-cell pricing some clients display is cosmetic; the server
//! enforces one flat price and one flat rent for every property cell.

use serde::{Deserialize, Serialize};

/// Number of cells in the loop.
pub const BOARD_CELLS: usize = 40;

/// Balance every player starts with.
pub const START_BALANCE: i64 = 1500;

/// Bonus credited for completing a loop past the start cell.
pub const START_BONUS: i64 = 200;

/// Flat purchase price for every property cell.
pub const CELL_PRICE: i64 = 200;

/// Flat rent for landing on another player's property.
pub const CELL_RENT: i64 = 50;

/// Cells that can never be owned: the start cell, the three remaining
/// corners, and the two event cells.
pub const NON_BUYABLE_CELLS: [usize; 6] = [0, 9, 10, 20, 29, 30];

/// Cells that trigger an event-card draw instead of being ownable.
pub const EVENT_CELLS: [usize; 2] = [9, 29];

/// Classification of a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// Cell 0. Passing it credits the start bonus.
    Start,
    /// Ownable; pays rent to its owner.
    Property,
    /// Draws a random event card.
    Event,
    /// A corner with no effect.
    Special,
}

impl CellKind {
    /// Classifies a cell by index. Indices outside the board are
    /// treated as `Special` (nothing happens there).
    pub fn of(index: usize) -> Self {
        match index {
            0 => Self::Start,
            i if EVENT_CELLS.contains(&i) => Self::Event,
            10 | 20 | 30 => Self::Special,
            i if i < BOARD_CELLS => Self::Property,
            _ => Self::Special,
        }
    }
}

/// Returns `true` if the cell can ever hold an owner.
///
/// Ownership state (is the cell currently unowned?) is the game's
/// concern; this only answers the topological question.
pub fn is_ownable(index: usize) -> bool {
    index < BOARD_CELLS && !NON_BUYABLE_CELLS.contains(&index)
}

/// One card in the fixed event deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventCard {
    pub id: &'static str,
    pub description: &'static str,
    pub delta: i64,
}

/// The fixed four-card event deck. A landing on an event cell draws one
/// card uniformly at random and applies its delta.
pub const EVENT_DECK: [EventCard; 4] = [
    EventCard {
        id: "bounty",
        description: "Bounty claimed: +200 gold",
        delta: 200,
    },
    EventCard {
        id: "tax",
        description: "Buyback tax collected: -150 gold",
        delta: -150,
    },
    EventCard {
        id: "courier",
        description: "A courier delivers your gold: +100",
        delta: 100,
    },
    EventCard {
        id: "ambush",
        description: "Caught in an ambush: -100 gold",
        delta: -100,
    },
];
