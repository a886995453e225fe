use serde::Serialize;

/// Side length of the board.
pub const BOARD_SIZE: u8 = 8;
/// Total number of squares.
pub const NUM_SQUARES: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// A bounds-checked board coordinate. Row 0 is the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Returns None when either coordinate falls outside the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }
    pub fn row(&self) -> u8 {
        self.row
    }
    pub fn col(&self) -> u8 {
        self.col
    }
    /// Row-major index into the cell array.
    pub fn index(&self) -> usize {
        (self.row as usize) * (BOARD_SIZE as usize) + (self.col as usize)
    }
    /// Steps one square in a compass direction, None at the edge.
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Self> {
        let row = (self.row as i8) + dr;
        let col = (self.col as i8) + dc;
        (row >= 0 && col >= 0).then(|| Self::new(row as u8, col as u8))?
    }
    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Self { row, col }))
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}
