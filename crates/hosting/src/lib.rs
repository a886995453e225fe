//! Session hosting: the concurrent store of live rooms and the bridge
//! between WebSocket connections and per-room broadcast channels.
mod lobby;

pub use lobby::*;
