use super::*;

const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Reversi board state: a fixed 8x8 grid of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; NUM_SQUARES],
}

impl Board {
    /// Creates the official starting position:
    /// white at (3,3) and (4,4), black at (3,4) and (4,3).
    pub fn new() -> Self {
        let mut board = Self {
            cells: [Cell::Empty; NUM_SQUARES],
        };
        for (row, col, color) in [
            (3, 3, Color::White),
            (4, 4, Color::White),
            (3, 4, Color::Black),
            (4, 3, Color::Black),
        ] {
            board.cells[Square::new(row, col).expect("center square").index()] = color.into();
        }
        board
    }

    pub fn get(&self, square: Square) -> Cell {
        self.cells[square.index()]
    }
    fn set(&mut self, square: Square, cell: Cell) {
        self.cells[square.index()] = cell;
    }

    /// Every opposing disc captured by playing `color` at `square`,
    /// across all eight directions. Empty iff the move is illegal.
    ///
    /// A run is capturable when it consists of one or more contiguous
    /// opposing discs immediately bounded by a disc of `color` before
    /// any empty square or the board edge.
    pub fn flips(&self, color: Color, square: Square) -> Vec<Square> {
        if self.get(square) != Cell::Empty {
            return Vec::new();
        }
        let mut captured = Vec::new();
        for (dr, dc) in DIRECTIONS {
            let mut run = Vec::new();
            let mut walk = square.offset(dr, dc);
            while let Some(next) = walk {
                match self.get(next).color() {
                    Some(c) if c == color.opponent() => {
                        run.push(next);
                        walk = next.offset(dr, dc);
                    }
                    Some(_) => {
                        captured.append(&mut run);
                        break;
                    }
                    None => break,
                }
            }
        }
        captured
    }

    pub fn is_legal(&self, color: Color, square: Square) -> bool {
        !self.flips(color, square).is_empty()
    }
    pub fn legal_moves(&self, color: Color) -> Vec<Square> {
        Square::all().filter(|s| self.is_legal(color, *s)).collect()
    }
    pub fn has_any_move(&self, color: Color) -> bool {
        Square::all().any(|s| self.is_legal(color, s))
    }

    /// Places a disc and flips every captured run.
    /// Returns the flipped squares, or None (no mutation) when illegal.
    pub fn play(&mut self, color: Color, square: Square) -> Option<Vec<Square>> {
        let flipped = self.flips(color, square);
        if flipped.is_empty() {
            return None;
        }
        self.set(square, color.into());
        for &run in &flipped {
            self.set(run, color.into());
        }
        Some(flipped)
    }

    /// Returns `(black_count, white_count)`.
    pub fn score(&self) -> (u8, u8) {
        self.cells.iter().fold((0, 0), |(b, w), cell| match cell {
            Cell::Taken(Color::Black) => (b + 1, w),
            Cell::Taken(Color::White) => (b, w + 1),
            Cell::Empty => (b, w),
        })
    }

    /// Some iff neither color has a legal move (includes a full board).
    /// The winner holds strictly more discs; equal counts are a draw.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.has_any_move(Color::Black) || self.has_any_move(Color::White) {
            return None;
        }
        let (black, white) = self.score();
        Some(match black.cmp(&white) {
            std::cmp::Ordering::Greater => Outcome::Winner(Color::Black),
            std::cmp::Ordering::Less => Outcome::Winner(Color::White),
            std::cmp::Ordering::Equal => Outcome::Draw,
        })
    }

    /// Wire snapshot: 8 rows of 8 glyphs, row-major.
    pub fn rows(&self) -> [String; 8] {
        std::array::from_fn(|row| {
            (0..BOARD_SIZE)
                .map(|col| self.cells[row * (BOARD_SIZE as usize) + (col as usize)].glyph())
                .collect()
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.rows().join("\n"))
    }
}

/// Parses the same 8-row glyph format `rows` produces.
/// Scaffolding for scripted positions in tests.
impl std::str::FromStr for Board {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [Cell::Empty; NUM_SQUARES];
        let rows = s.split_whitespace().collect::<Vec<_>>();
        if rows.len() != BOARD_SIZE as usize {
            return Err(format!("expected 8 rows, got {}", rows.len()));
        }
        for (r, row) in rows.iter().enumerate() {
            if row.chars().count() != BOARD_SIZE as usize {
                return Err(format!("row {} is not 8 squares: {:?}", r, row));
            }
            for (c, glyph) in row.chars().enumerate() {
                cells[r * (BOARD_SIZE as usize) + c] =
                    Cell::parse(glyph).ok_or_else(|| format!("bad glyph {:?}", glyph))?;
            }
        }
        Ok(Self { cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    /// Black surrounds a buried white corner plus two capturable whites.
    /// Black to move; after (2,5) white has no reply but black still does.
    const PASS_POSITION: &str = "OXXXXXXX
                                 XX......
                                 X.X...OX
                                 X..X....
                                 X...X...
                                 XO...X..
                                 X.....X.
                                 X......X";

    #[test]
    fn initial_black_moves_are_four_expected_squares() {
        let board = Board::new();
        let expected = vec![sq(2, 3), sq(3, 2), sq(4, 5), sq(5, 4)];
        assert_eq!(board.legal_moves(Color::Black), expected);
    }

    #[test]
    fn legal_moves_are_empty_squares_with_captures() {
        let board = Board::new();
        for color in [Color::Black, Color::White] {
            for square in board.legal_moves(color) {
                assert_eq!(board.get(square), Cell::Empty);
                assert!(!board.flips(color, square).is_empty());
            }
        }
    }

    #[test]
    fn opening_move_flips_adjacent_white() {
        let mut board = Board::new();
        let flipped = board.play(Color::Black, sq(2, 3)).unwrap();
        assert_eq!(flipped, vec![sq(3, 3)]);
        assert_eq!(board.score(), (4, 1));
        assert_eq!(board.get(sq(2, 3)), Cell::Taken(Color::Black));
        assert_eq!(board.get(sq(3, 3)), Cell::Taken(Color::Black));
    }

    #[test]
    fn play_is_deterministic() {
        let mut a = Board::new();
        let mut b = Board::new();
        assert_eq!(
            a.play(Color::Black, sq(2, 3)),
            b.play(Color::Black, sq(2, 3))
        );
        assert_eq!(a, b);
    }

    #[test]
    fn play_adds_exactly_one_disc() {
        let mut board = Board::new();
        let (b0, w0) = board.score();
        board.play(Color::Black, sq(2, 3)).unwrap();
        let (b1, w1) = board.score();
        assert_eq!(b1 + w1, b0 + w0 + 1);
    }

    #[test]
    fn illegal_play_leaves_board_unchanged() {
        let mut board = Board::new();
        let before = board;
        assert_eq!(board.play(Color::Black, sq(0, 0)), None);
        assert_eq!(board.play(Color::Black, sq(3, 3)), None); // occupied
        assert_eq!(board, before);
    }

    #[test]
    fn snapshot_round_trip() {
        let board = Board::new();
        let parsed = board.rows().join("\n").parse::<Board>().unwrap();
        assert_eq!(parsed, board);
        assert!("not a board".parse::<Board>().is_err());
    }

    #[test]
    fn initial_snapshot_shows_center_setup() {
        let rows = Board::new().rows();
        assert_eq!(rows[3], "...OX...");
        assert_eq!(rows[4], "...XO...");
    }

    #[test]
    fn scripted_position_forces_a_pass() {
        let mut board = PASS_POSITION.parse::<Board>().unwrap();
        let flipped = board.play(Color::Black, sq(2, 5)).unwrap();
        assert_eq!(flipped, vec![sq(2, 6)]);
        assert!(!board.has_any_move(Color::White));
        assert!(board.has_any_move(Color::Black));
        assert_eq!(board.outcome(), None);
    }

    #[test]
    fn double_pass_ends_the_game() {
        let mut board = PASS_POSITION.parse::<Board>().unwrap();
        board.play(Color::Black, sq(2, 5)).unwrap();
        board.play(Color::Black, sq(5, 2)).unwrap();
        assert!(!board.has_any_move(Color::Black));
        assert!(!board.has_any_move(Color::White));
        assert_eq!(board.outcome(), Some(Outcome::Winner(Color::Black)));
    }

    #[test]
    fn outcome_none_while_moves_remain() {
        assert_eq!(Board::new().outcome(), None);
    }

    #[test]
    fn drawn_board_reports_draw() {
        // Top four rows black, bottom four rows white: 32 each, no moves.
        let board = "XXXXXXXX
                     XXXXXXXX
                     XXXXXXXX
                     XXXXXXXX
                     OOOOOOOO
                     OOOOOOOO
                     OOOOOOOO
                     OOOOOOOO"
            .parse::<Board>()
            .unwrap();
        assert_eq!(board.score(), (32, 32));
        assert_eq!(board.outcome(), Some(Outcome::Draw));
    }
}
