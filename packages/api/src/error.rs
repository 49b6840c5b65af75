use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shared::services::errors::{
    game_service_errors::GameServiceError, tictactoe_service_errors::TicTacToeServiceError,
    user_service_errors::UserServiceError,
};

#[derive(Debug)]
pub enum ApiError {
    UserService(UserServiceError),
    GameService(GameServiceError),
    Unauthorized(String),
}

impl From<UserServiceError> for ApiError {
    fn from(error: UserServiceError) -> Self {
        ApiError::UserService(error)
    }
}

impl From<GameServiceError> for ApiError {
    fn from(error: GameServiceError) -> Self {
        ApiError::GameService(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::UserService(UserServiceError::UserNotFound) => {
                (StatusCode::NOT_FOUND, self.to_message())
            }
            ApiError::UserService(UserServiceError::UserAlreadyExists) => {
                (StatusCode::CONFLICT, self.to_message())
            }
            ApiError::UserService(UserServiceError::InvalidCredentials) => {
                (StatusCode::UNAUTHORIZED, self.to_message())
            }
            ApiError::UserService(UserServiceError::ValidationError(_)) => {
                (StatusCode::BAD_REQUEST, self.to_message())
            }
            ApiError::UserService(UserServiceError::RepositoryError(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_message())
            }

            ApiError::GameService(GameServiceError::GameNotFound) => {
                (StatusCode::NOT_FOUND, self.to_message())
            }
            ApiError::GameService(GameServiceError::ValidationError(_)) => {
                (StatusCode::BAD_REQUEST, self.to_message())
            }
            // A bad cell index is malformed input; the rest of the rules
            // violations are conflicts with the current game state.
            ApiError::GameService(GameServiceError::IllegalMove(
                TicTacToeServiceError::OutOfRange(_),
            )) => (StatusCode::BAD_REQUEST, self.to_message()),
            ApiError::GameService(GameServiceError::IllegalMove(_)) => {
                (StatusCode::CONFLICT, self.to_message())
            }
            ApiError::GameService(GameServiceError::MoveConflict) => {
                (StatusCode::CONFLICT, self.to_message())
            }
            ApiError::GameService(GameServiceError::RepositoryError(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_message())
            }

            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, self.to_message()),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl ApiError {
    fn to_message(&self) -> String {
        match self {
            // Persistence details stay in the logs.
            ApiError::UserService(UserServiceError::RepositoryError(_))
            | ApiError::GameService(GameServiceError::RepositoryError(_)) => {
                "Something went wrong".to_string()
            }
            ApiError::UserService(err) => err.to_string(),
            ApiError::GameService(err) => err.to_string(),
            ApiError::Unauthorized(msg) => msg.clone(),
        }
    }
}
