use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{error::ApiError, state::AppState};
use shared::services::errors::user_service_errors::UserServiceError;

/// Request-scoped identity for the game endpoints: the `x-player` header
/// names a registered username. Handlers receive the caller explicitly
/// instead of reading ambient session state.
#[derive(Debug, Clone)]
pub struct AuthenticatedPlayer {
    pub username: String,
}

impl FromRequestParts<AppState> for AuthenticatedPlayer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let username = parts
            .headers
            .get("x-player")
            .ok_or_else(|| ApiError::Unauthorized("User not authenticated".to_string()))?
            .to_str()
            .map_err(|_| ApiError::Unauthorized("Invalid x-player header".to_string()))?;

        let user = state
            .user_service
            .get_user_by_username(username)
            .await
            .map_err(|e| match e {
                UserServiceError::UserNotFound | UserServiceError::ValidationError(_) => {
                    ApiError::Unauthorized("User not authenticated".to_string())
                }
                other => ApiError::from(other),
            })?;

        Ok(AuthenticatedPlayer {
            username: user.username,
        })
    }
}
