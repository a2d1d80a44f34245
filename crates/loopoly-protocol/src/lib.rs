//! Wire protocol for Loopoly.
//!
//! Defines the vocabulary clients and server speak:
//!
//! - **Identity** ([`PlayerId`], [`RoomId`]) and **addressing**
//!   ([`Recipient`]) types.
//! - **Actions** ([`ClientAction`]) — everything a client may send.
//! - **Events** ([`ServerEvent`]) — everything the server emits.
//! - **Codec** ([`Codec`], [`JsonCodec`]) — how frames become bytes.
//!
//! The protocol layer knows nothing about connections, rooms, or game
//! rules; it only defines shapes and their serialization.

mod action;
mod codec;
mod error;
mod event;
mod types;

pub use action::ClientAction;
pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use event::{PurchaseFailReason, ServerEvent};
pub use types::{PlayerId, Recipient, RoomId, RoomSummary};
