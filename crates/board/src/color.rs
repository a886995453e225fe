use serde::Serialize;

/// Disc color. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(&self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Black => write!(f, "black"),
            Self::White => write!(f, "white"),
        }
    }
}

/// Contents of one board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Taken(Color),
}

impl Cell {
    pub fn color(&self) -> Option<Color> {
        match self {
            Self::Empty => None,
            Self::Taken(c) => Some(*c),
        }
    }
    /// Single-character board glyph: `.` empty, `X` black, `O` white.
    pub fn glyph(&self) -> char {
        match self {
            Self::Empty => '.',
            Self::Taken(Color::Black) => 'X',
            Self::Taken(Color::White) => 'O',
        }
    }
    pub fn parse(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(Self::Empty),
            'X' => Some(Self::Taken(Color::Black)),
            'O' => Some(Self::Taken(Color::White)),
            _ => None,
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        Self::Taken(color)
    }
}

/// Terminal result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Color),
    Draw,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Winner(c) => write!(f, "{}", c),
            Self::Draw => write!(f, "draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn opponent_flips() {
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(Color::White.opponent(), Color::Black);
    }
    #[test]
    fn glyph_round_trip() {
        for cell in [
            Cell::Empty,
            Cell::Taken(Color::Black),
            Cell::Taken(Color::White),
        ] {
            assert_eq!(Cell::parse(cell.glyph()), Some(cell));
        }
        assert_eq!(Cell::parse('?'), None);
    }
}
