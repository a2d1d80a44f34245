//! WebSocket server for Loopoly.
//!
//! Accepts connections, assigns each a player identity, decodes JSON
//! actions, and routes them into room actors. Room events come back
//! through a per-connection channel and leave as one ordered stream.

mod error;
mod handler;
mod server;
mod ws;

pub use error::ServerError;
pub use server::{GameServer, GameServerBuilder};
pub use ws::{WsConnection, WsError, WsListener};
