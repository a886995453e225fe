use super::*;

/// Errors at the wire boundary. Malformed client traffic is dropped at
/// the bridge and never reaches the game error taxonomy.
#[derive(Debug, Clone)]
pub enum ProtocolError {
    InvalidMessage(String),
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMessage(s) => write!(f, "invalid message: {}", s),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Handles Event to ServerMessage conversion and inbound parsing.
/// Centralizes the protocol layer between internal events and wire format.
pub struct Protocol;

impl Protocol {
    /// Converts an internal Event to a wire ServerMessage.
    pub fn encode(event: &Event) -> ServerMessage {
        match event {
            Event::Joined {
                seq,
                at,
                player,
                name,
                color,
            } => ServerMessage::joined(*seq, *at, *player, name, *color),
            Event::Moved {
                seq,
                at,
                board,
                current,
                placed,
                flipped,
                outcome,
            } => ServerMessage::moved(
                *seq,
                *at,
                board,
                *current,
                *placed,
                flipped.clone(),
                *outcome,
            ),
            Event::Chat {
                seq,
                at,
                from,
                name,
                text,
            } => ServerMessage::chat(*seq, *at, *from, name, text),
            Event::Abandoned { seq, at } => ServerMessage::Abandoned { seq: *seq, at: *at },
        }
    }
    /// Parses a client frame into a ClientMessage.
    pub fn decode(s: &str) -> Result<ClientMessage, ProtocolError> {
        serde_json::from_str(s).map_err(|e| ProtocolError::InvalidMessage(e.to_string()))
    }
}
