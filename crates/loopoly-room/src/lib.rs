//! Room layer for Loopoly.
//!
//! Each room runs as an isolated Tokio task (actor model) owning one
//! [`loopoly_game::Game`]. The [`Registry`] creates rooms on demand and
//! routes player actions to them.
//!
//! # Key types
//!
//! - [`Registry`] — creates rooms, routes actions, lobby listing
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`GameAction`] — gameplay actions forwarded into a room

mod actor;
mod error;
mod registry;

pub use actor::{GameAction, PlayerSender, RoomHandle};
pub use error::RoomError;
pub use registry::Registry;
