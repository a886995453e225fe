use super::*;
use rvs_board::*;
use rvs_core::*;

/// Events produced by session mutations and owned transiently by the
/// hub until delivered. Immutable after creation; `seq` orders events
/// within one session and `at` is unix millis at creation.
#[derive(Clone, Debug)]
pub enum Event {
    /// A player took a seat.
    Joined {
        seq: Seq,
        at: u64,
        player: ID<Player>,
        name: String,
        color: Color,
    },
    /// A legal move was applied. Carries the full board snapshot, the
    /// color to move next (same color after a pass), and the terminal
    /// outcome when the move ended the game.
    Moved {
        seq: Seq,
        at: u64,
        board: Board,
        current: Color,
        placed: Square,
        flipped: Vec<Square>,
        outcome: Option<Outcome>,
    },
    /// A chat line from a seated player.
    Chat {
        seq: Seq,
        at: u64,
        from: ID<Player>,
        name: String,
        text: String,
    },
    /// Both players left an in-progress game.
    Abandoned { seq: Seq, at: u64 },
}

impl Event {
    /// Position of this event in its channel's total order.
    pub fn seq(&self) -> Seq {
        match self {
            Event::Joined { seq, .. }
            | Event::Moved { seq, .. }
            | Event::Chat { seq, .. }
            | Event::Abandoned { seq, .. } => *seq,
        }
    }
    /// Unix millis at creation.
    pub fn at(&self) -> u64 {
        match self {
            Event::Joined { at, .. }
            | Event::Moved { at, .. }
            | Event::Chat { at, .. }
            | Event::Abandoned { at, .. } => *at,
        }
    }
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Event::Moved { outcome, .. } => *outcome,
            _ => None,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Event::Joined { name, color, .. } => write!(f, "{} joined as {}", name, color),
            Event::Moved {
                seq,
                current,
                placed,
                flipped,
                outcome,
                ..
            } => match outcome {
                Some(o) => write!(f, "#{} {} ends the game: {}", seq, placed, o),
                None => write!(f, "#{} {} flips {}, {} to move", seq, placed, flipped.len(), current),
            },
            Event::Chat { name, text, .. } => write!(f, "{}: {}", name, text),
            Event::Abandoned { seq, .. } => write!(f, "#{} session abandoned", seq),
        }
    }
}
