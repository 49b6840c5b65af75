use serde::{Deserialize, Serialize};

/// A player's mark. Player 1 always plays `x`, player 2 always plays `o`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    #[serde(rename = "x")]
    X,
    #[serde(rename = "o")]
    O,
}

impl Mark {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mark::X => "x",
            Mark::O => "o",
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One slot of the grid. Serializes to the document format used on the wire:
/// `""`, `"x"` or `"o"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    #[serde(rename = "")]
    Empty,
    #[serde(rename = "x")]
    X,
    #[serde(rename = "o")]
    O,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum BoardError {
    OutOfRange(usize),
}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::OutOfRange(index) => {
                write!(f, "Cell index {} is outside the board (0-8)", index)
            }
        }
    }
}

impl std::error::Error for BoardError {}

pub const BOARD_CELLS: usize = 9;

/// The 8 lines that decide a game: 3 rows, 3 columns, 2 diagonals.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// The 3x3 grid, stored as 9 cells indexed 0-8 left-to-right, top-to-bottom
/// (row = index / 3, column = index % 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board([Cell; BOARD_CELLS]);

impl Default for Board {
    fn default() -> Self {
        Board([Cell::Empty; BOARD_CELLS])
    }
}

impl Board {
    pub fn new() -> Self {
        Board::default()
    }

    pub fn get(&self, index: usize) -> Result<Cell, BoardError> {
        self.0
            .get(index)
            .copied()
            .ok_or(BoardError::OutOfRange(index))
    }

    /// Returns a copy of the board with `mark` at `index`. Does not check
    /// whether the slot is free or whether the move is in turn; legality is
    /// the move validation's job.
    pub fn place(&self, index: usize, mark: Mark) -> Result<Board, BoardError> {
        if index >= BOARD_CELLS {
            return Err(BoardError::OutOfRange(index));
        }
        let mut cells = self.0;
        cells[index] = Cell::from(mark);
        Ok(Board(cells))
    }

    /// True when any winning line holds three equal non-empty cells. Empty
    /// cells never match each other, so a fresh board has no winner.
    pub fn has_winner(&self) -> bool {
        WINNING_LINES.iter().any(|&[a, b, c]| {
            !self.0[a].is_empty() && self.0[a] == self.0[b] && self.0[b] == self.0[c]
        })
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(|cell| !cell.is_empty())
    }

    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.0
    }
}
