use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::{error::ApiError, state::AppState};
use shared::models::requests::{AvailabilityQuery, LoginRequest, RegisterUserRequest};
use shared::models::user::User;
use shared::services::errors::user_service_errors::UserServiceError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/user/new", post(register))
        .route("/api/user/login", post(login))
        .route("/api/user/info/{username}", get(user_info))
        .route("/api/user/available", get(availability))
}

async fn register(
    State(state): State<AppState>,
    Json(user_data): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state
        .user_service
        .register(
            &user_data.name,
            &user_data.username,
            &user_data.email,
            &user_data.password,
        )
        .await
        .map_err(|e| {
            error!("Failed to register user {}: {}", user_data.username, e);
            ApiError::from(e)
        })?;
    debug!("User registered successfully: {}", user.username);
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login(
    State(state): State<AppState>,
    Json(login_data): Json<LoginRequest>,
) -> Result<Json<User>, ApiError> {
    state
        .user_service
        .login(&login_data.username, &login_data.password)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to log in user {}: {}", login_data.username, e);
            ApiError::from(e)
        })
}

async fn user_info(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<User>, ApiError> {
    state
        .user_service
        .get_user_by_username(&username)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to retrieve user {}: {}", username, e);
            ApiError::from(e)
        })
}

/// Pre-registration check that a username and/or email is still free.
async fn availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Value>, ApiError> {
    if query.username.is_none() && query.email.is_none() {
        return Err(ApiError::UserService(UserServiceError::ValidationError(
            "Provide a username or an email to check".to_string(),
        )));
    }

    let mut available = true;
    if let Some(username) = &query.username {
        available &= !state.user_service.username_exists(username).await?;
    }
    if let Some(email) = &query.email {
        available &= !state.user_service.email_exists(email).await?;
    }

    Ok(Json(json!({ "available": available })))
}
