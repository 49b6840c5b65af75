use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

/// The full application router; the server binary and the tests build on
/// the same wiring.
pub fn app(app_state: AppState) -> Router {
    // ToDo: Tighten this up
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(routes::user::routes())
        .merge(routes::game::routes())
        .layer(cors)
        .with_state(app_state)
}
