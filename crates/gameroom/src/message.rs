use rvs_board::*;
use rvs_core::*;
use serde::Deserialize;
use serde::Serialize;

/// Messages sent from server to client over WebSocket.
/// Game events carry the per-session sequence number so clients can
/// order them and discard stale snapshots after a reconnect.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Initial subscription confirmation.
    Connected { session: String, channel: String },
    /// A player took a seat.
    Joined {
        seq: Seq,
        at: u64,
        player: String,
        name: String,
        color: Color,
    },
    /// Authoritative state after a legal move (full board snapshot).
    Moved {
        seq: Seq,
        at: u64,
        board: [String; 8],
        current: Color,
        placed: Square,
        flipped: Vec<Square>,
        #[serde(skip_serializing_if = "Option::is_none")]
        outcome: Option<String>,
    },
    /// A chat line relayed to the other subscribers.
    Chat {
        seq: Seq,
        at: u64,
        from: String,
        name: String,
        text: String,
    },
    /// The game reached a terminal result.
    GameOver { outcome: String },
    /// Both players left an in-progress game.
    Abandoned { seq: Seq, at: u64 },
    /// A structured failure (see `GameError::kind`).
    Error {
        kind: &'static str,
        message: String,
    },
}

impl ServerMessage {
    pub fn connected(session: &str, channel: &str) -> Self {
        Self::Connected {
            session: session.to_string(),
            channel: channel.to_string(),
        }
    }
    pub fn joined(seq: Seq, at: u64, player: ID<crate::Player>, name: &str, color: Color) -> Self {
        Self::Joined {
            seq,
            at,
            player: player.to_string(),
            name: name.to_string(),
            color,
        }
    }
    pub fn moved(
        seq: Seq,
        at: u64,
        board: &Board,
        current: Color,
        placed: Square,
        flipped: Vec<Square>,
        outcome: Option<Outcome>,
    ) -> Self {
        Self::Moved {
            seq,
            at,
            board: board.rows(),
            current,
            placed,
            flipped,
            outcome: outcome.map(|o| o.to_string()),
        }
    }
    pub fn chat(seq: Seq, at: u64, from: ID<crate::Player>, name: &str, text: &str) -> Self {
        Self::Chat {
            seq,
            at,
            from: from.to_string(),
            name: name.to_string(),
            text: text.to_string(),
        }
    }
    pub fn game_over(outcome: Outcome) -> Self {
        Self::GameOver {
            outcome: outcome.to_string(),
        }
    }
    pub fn error(error: &crate::GameError) -> Self {
        Self::Error {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize server message")
    }
}

/// Messages accepted from clients over the chat stream.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Chat { from: String, text: String },
}
