use std::fmt;

use crate::models::board::Mark;

/// A move rejected by the rules. The board and state are untouched whenever
/// one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicTacToeServiceError {
    NotAPlayer(String),
    WrongMark(Mark),
    GameFinished,
    NotYourTurn(Mark),
    OutOfRange(usize),
    CellOccupied(usize),
}

impl fmt::Display for TicTacToeServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TicTacToeServiceError::NotAPlayer(username) => {
                write!(f, "{} is not a player in this game", username)
            }
            TicTacToeServiceError::WrongMark(mark) => {
                write!(f, "{} is not this player's mark", mark)
            }
            TicTacToeServiceError::GameFinished => write!(f, "The game is already over"),
            TicTacToeServiceError::NotYourTurn(mark) => write!(f, "It is not {}'s turn", mark),
            TicTacToeServiceError::OutOfRange(index) => {
                write!(f, "Cell index {} is outside the board (0-8)", index)
            }
            TicTacToeServiceError::CellOccupied(index) => {
                write!(f, "Cell {} is already taken", index)
            }
        }
    }
}

impl std::error::Error for TicTacToeServiceError {}
