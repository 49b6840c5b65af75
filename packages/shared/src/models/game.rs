use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::board::{Board, Mark};

/// Whose turn it is, or how the game ended. The wire strings are the ones the
/// stored documents use: `wait/p1`, `wait/p2`, `win/p1`, `win/p2`, `draw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[serde(rename = "wait/p1")]
    WaitingOnPlayer1,
    #[serde(rename = "wait/p2")]
    WaitingOnPlayer2,
    #[serde(rename = "win/p1")]
    WonByPlayer1,
    #[serde(rename = "win/p2")]
    WonByPlayer2,
    #[serde(rename = "draw")]
    Draw,
}

impl GameState {
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            GameState::WaitingOnPlayer1 | GameState::WaitingOnPlayer2
        )
    }

    /// The mark expected to move next, `None` once the game is over.
    pub fn turn(&self) -> Option<Mark> {
        match self {
            GameState::WaitingOnPlayer1 => Some(Mark::X),
            GameState::WaitingOnPlayer2 => Some(Mark::O),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::WaitingOnPlayer1 => "wait/p1",
            GameState::WaitingOnPlayer2 => "wait/p2",
            GameState::WonByPlayer1 => "win/p1",
            GameState::WonByPlayer2 => "win/p2",
            GameState::Draw => "draw",
        }
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One game between two registered users, stored as a single mutable
/// document. `player1` always plays `x`, `player2` always plays `o`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub player1: String,
    pub player2: String,
    pub board: Board,
    pub state: GameState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Game {
    pub fn new(player1: &str, player2: &str) -> Self {
        let now = Utc::now();
        Game {
            id: Uuid::new_v4().to_string(),
            player1: player1.to_string(),
            player2: player2.to_string(),
            board: Board::new(),
            state: GameState::WaitingOnPlayer1,
            created_at: now,
            updated_at: now,
        }
    }

    /// The mark of the seat `username` occupies, `None` for non-participants.
    pub fn mark_of(&self, username: &str) -> Option<Mark> {
        if username == self.player1 {
            Some(Mark::X)
        } else if username == self.player2 {
            Some(Mark::O)
        } else {
            None
        }
    }

    pub fn is_participant(&self, username: &str) -> bool {
        self.mark_of(username).is_some()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
