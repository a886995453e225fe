use super::*;
use rvs_board::*;
use rvs_core::*;

/// Session lifecycle. `Finished` and `Abandoned` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Waiting,
    Playing,
    Finished,
    Abandoned,
}

impl Phase {
    pub fn terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Abandoned)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting_for_players"),
            Self::Playing => write!(f, "in_progress"),
            Self::Finished => write!(f, "finished"),
            Self::Abandoned => write!(f, "abandoned"),
        }
    }
}

/// Turn coordinator for one match.
///
/// Wraps the rules engine with the session state machine and serializes
/// every mutation behind the room lock held by the session store. All
/// checks and the resulting snapshot happen in one critical section, so
/// an event always reflects a consistent state.
#[derive(Debug)]
pub struct Table {
    board: Board,
    phase: Phase,
    current: Color,
    seats: [Option<Player>; SEATS],
    seq: Seq,
    winner: Option<Outcome>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            board: Board::new(),
            phase: Phase::Waiting,
            current: Color::Black,
            seats: [None, None],
            seq: 0,
            winner: None,
        }
    }
}

impl Table {
    /// Seats a player on the first free color, black then white.
    /// The second join starts the game with black to move.
    /// Joins take a slot in the session event order like moves do.
    pub fn join(&mut self, name: &str) -> Result<(Player, Event), GameError> {
        if self.phase.terminal() {
            return Err(GameError::GameNotInProgress);
        }
        let color = match &self.seats {
            [None, _] => Color::Black,
            [Some(_), None] => Color::White,
            _ => return Err(GameError::SessionFull),
        };
        let player = Player::new(name, color);
        self.seats[color as usize] = Some(player.clone());
        if self.seats.iter().all(Option::is_some) {
            self.phase = Phase::Playing;
            log::debug!("[table] both seats taken, game starts");
        }
        self.seq += 1;
        let event = Event::Joined {
            seq: self.seq,
            at: now_millis(),
            player: player.id(),
            name: player.name().to_string(),
            color: player.color(),
        };
        Ok((player, event))
    }

    /// Validates and applies one move, returning the resulting event.
    ///
    /// After a legal move the turn goes to the opponent; when the
    /// opponent has no reply the turn passes back; when neither color
    /// can move the game finishes and the winner is recorded.
    pub fn submit(&mut self, player: ID<Player>, square: Square) -> Result<Event, GameError> {
        let mover = self
            .player(player)
            .map(Player::color)
            .ok_or(GameError::PlayerNotInSession)?;
        if self.phase != Phase::Playing {
            return Err(GameError::GameNotInProgress);
        }
        if mover != self.current {
            return Err(GameError::NotYourTurn);
        }
        let flipped = self
            .board
            .play(mover, square)
            .ok_or(GameError::IllegalMove)?;
        let next = mover.opponent();
        self.current = if self.board.has_any_move(next) {
            next
        } else {
            mover
        };
        let outcome = self.board.outcome();
        if let Some(winner) = outcome {
            self.phase = Phase::Finished;
            self.winner = Some(winner);
            log::info!("[table] game over: {}", winner);
        }
        self.seq += 1;
        Ok(Event::Moved {
            seq: self.seq,
            at: now_millis(),
            board: self.board,
            current: self.current,
            placed: square,
            flipped,
            outcome,
        })
    }

    /// Marks an in-progress or waiting session terminally abandoned,
    /// yielding the stamped event. None once the session is terminal.
    pub fn abandon(&mut self) -> Option<Event> {
        if self.phase.terminal() {
            return None;
        }
        self.phase = Phase::Abandoned;
        self.seq += 1;
        Some(Event::Abandoned {
            seq: self.seq,
            at: now_millis(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn current(&self) -> Color {
        self.current
    }
    pub fn seq(&self) -> Seq {
        self.seq
    }
    pub fn winner(&self) -> Option<Outcome> {
        self.winner
    }
    pub fn player(&self, id: ID<Player>) -> Option<&Player> {
        self.seats
            .iter()
            .flatten()
            .find(|player| player.id() == id)
    }
}

#[cfg(test)]
impl Table {
    /// Swaps in a scripted position for tests; phase and turn untouched.
    pub(crate) fn rescript(&mut self, board: Board) {
        self.board = board;
    }
}
