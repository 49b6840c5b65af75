use crate::repositories::errors::game_repository_errors::GameRepositoryError;
use crate::services::errors::tictactoe_service_errors::TicTacToeServiceError;

#[derive(Debug)]
pub enum GameServiceError {
    GameNotFound,
    ValidationError(String),
    IllegalMove(TicTacToeServiceError),
    /// A concurrent move won the write race; nothing was persisted.
    MoveConflict,
    RepositoryError(String),
}

impl std::fmt::Display for GameServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameServiceError::GameNotFound => write!(f, "Game does not exist"),
            GameServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            GameServiceError::IllegalMove(err) => write!(f, "Illegal move: {}", err),
            GameServiceError::MoveConflict => {
                write!(f, "The game was updated by another move; retry with fresh state")
            }
            GameServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GameServiceError {}

impl From<TicTacToeServiceError> for GameServiceError {
    fn from(err: TicTacToeServiceError) -> Self {
        GameServiceError::IllegalMove(err)
    }
}

impl From<GameRepositoryError> for GameServiceError {
    fn from(err: GameRepositoryError) -> Self {
        match err {
            GameRepositoryError::ConditionFailed => GameServiceError::MoveConflict,
            other => GameServiceError::RepositoryError(other.to_string()),
        }
    }
}
