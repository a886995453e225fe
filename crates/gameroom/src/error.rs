/// Caller-facing failure taxonomy.
///
/// Every variant except `Internal` is an expected, recoverable-by-caller
/// condition; none of them imply the caller should retry automatically.
/// `Internal` marks a broken invariant: it is logged with full context at
/// the point of detection and surfaced opaquely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    SessionNotFound,
    SessionFull,
    PlayerNotInSession,
    NotYourTurn,
    IllegalMove,
    GameNotInProgress,
    Internal(String),
}

impl GameError {
    /// Stable snake_case tag for the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SessionNotFound => "session_not_found",
            Self::SessionFull => "session_full",
            Self::PlayerNotInSession => "player_not_in_session",
            Self::NotYourTurn => "not_your_turn",
            Self::IllegalMove => "illegal_move",
            Self::GameNotInProgress => "game_not_in_progress",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SessionNotFound => write!(f, "no such session"),
            Self::SessionFull => write!(f, "both colors are already taken"),
            Self::PlayerNotInSession => write!(f, "player is not part of this session"),
            Self::NotYourTurn => write!(f, "it is not your turn to move"),
            Self::IllegalMove => write!(f, "that move captures nothing"),
            Self::GameNotInProgress => write!(f, "the game is not in progress"),
            // invariant details stay in the logs, not on the wire
            Self::Internal(_) => write!(f, "internal error"),
        }
    }
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn internal_detail_is_not_displayed() {
        let err = GameError::Internal("seat bound without player".into());
        assert_eq!(err.to_string(), "internal error");
        assert_eq!(err.kind(), "internal_error");
    }
}
