//! Session runtime for live reversi matches.
//!
//! This crate coordinates one match: turn arbitration against the rules
//! engine, the per-session broadcast channels, and the wire protocol
//! between internal events and client messages.
//!
//! ## Architecture
//!
//! - [`Table`] — turn coordinator and session state machine
//! - [`Hub`] — per-session chat and game-event fan-out groups
//! - [`Room`] — imperative shell combining table and hub; one room is
//!   the unit of mutual exclusion, locked by the session store
//!
//! ## Protocol
//!
//! - [`Event`] — internal events produced by table mutations
//! - [`ServerMessage`] / [`ClientMessage`] — JSON wire format
//! - [`Protocol`] — event encoding and inbound message parsing
//! - [`GameError`] — caller-facing failure taxonomy
mod error;
mod event;
mod hub;
mod message;
mod player;
mod protocol;
mod room;
mod table;

pub use error::*;
pub use event::*;
pub use hub::*;
pub use message::*;
pub use player::*;
pub use protocol::*;
pub use room::*;
pub use table::*;
