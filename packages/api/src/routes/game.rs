use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use tracing::{debug, error};

use crate::{error::ApiError, middleware::auth::AuthenticatedPlayer, state::AppState};
use shared::models::board::Mark;
use shared::models::game::Game;
use shared::models::move_request::MoveRequest;
use shared::models::requests::{CreateGameRequest, PlayMoveRequest};
use shared::services::errors::game_service_errors::GameServiceError;
use shared::services::errors::user_service_errors::UserServiceError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/game/info/{id}", get(game_info))
        .route("/api/game/user/{username}", get(games_for_user))
        .route("/api/game/new", post(create_game))
        .route("/api/game/play/{id}/{mark}", put(play_move))
}

async fn game_info(
    State(state): State<AppState>,
    _player: AuthenticatedPlayer,
    Path(id): Path<String>,
) -> Result<Json<Game>, ApiError> {
    state.game_service.get_game(&id).await.map(Json).map_err(|e| {
        error!("Failed to retrieve game {}: {}", id, e);
        ApiError::from(e)
    })
}

async fn games_for_user(
    State(state): State<AppState>,
    _player: AuthenticatedPlayer,
    Path(username): Path<String>,
) -> Result<Json<Vec<Game>>, ApiError> {
    state
        .game_service
        .games_for_player(&username)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to list games for {}: {}", username, e);
            ApiError::from(e)
        })
}

async fn create_game(
    State(state): State<AppState>,
    _player: AuthenticatedPlayer,
    Json(game_data): Json<CreateGameRequest>,
) -> Result<Json<Game>, ApiError> {
    let player1 = lookup_player(&state, &game_data.player1).await?;
    let player2 = lookup_player(&state, &game_data.player2).await?;

    let game = state
        .game_service
        .create_game(&player1, &player2)
        .await
        .map_err(|e| {
            error!(
                "Failed to create game between {} and {}: {}",
                player1.username, player2.username, e
            );
            ApiError::from(e)
        })?;
    debug!("Game ready: {}", game.id);
    Ok(Json(game))
}

async fn play_move(
    State(state): State<AppState>,
    player: AuthenticatedPlayer,
    Path((id, mark)): Path<(String, Mark)>,
    Json(move_data): Json<PlayMoveRequest>,
) -> Result<Json<Game>, ApiError> {
    let request = MoveRequest::new(id, move_data.cell, mark);

    let game = state
        .game_service
        .play_move(&request, &player.username)
        .await
        .map_err(|e| {
            error!(
                "Rejected move by {} on game {}: {}",
                player.username, request.game_id, e
            );
            ApiError::from(e)
        })?;
    Ok(Json(game))
}

/// Players are identified by email in the creation request; an unknown
/// email is the caller's mistake, not a missing resource.
async fn lookup_player(state: &AppState, email: &str) -> Result<shared::models::user::User, ApiError> {
    state
        .user_service
        .get_user_by_email(email)
        .await
        .map_err(|e| match e {
            UserServiceError::UserNotFound => ApiError::GameService(
                GameServiceError::ValidationError(format!("{} is not a registered player", email)),
            ),
            other => ApiError::from(other),
        })
}
