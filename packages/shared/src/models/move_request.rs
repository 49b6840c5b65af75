use serde::{Deserialize, Serialize};

use crate::models::board::Mark;

/// A move submission: which game, which cell (0-8), which mark is placed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    pub game_id: String,
    pub cell: usize,
    pub mark: Mark,
}

impl MoveRequest {
    pub fn new(game_id: String, cell: usize, mark: Mark) -> Self {
        MoveRequest {
            game_id,
            cell,
            mark,
        }
    }
}
