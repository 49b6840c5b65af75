use std::sync::Arc;

use api::state::AppState;
use shared::repositories::game_repository::DynamoDbGameRepository;
use shared::repositories::user_repository::DynamoDbUserRepository;
use shared::services::game_service::GameService;
use shared::services::user_service::UserService;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    // Set up services
    let config = aws_config::load_from_env().await;
    let client = aws_sdk_dynamodb::Client::new(&config);

    let user_repository = Arc::new(DynamoDbUserRepository::new(client.clone()));
    let user_service = Arc::new(UserService::new(user_repository));

    let game_repository = Arc::new(DynamoDbGameRepository::new(client.clone()));
    let game_service = Arc::new(GameService::new(game_repository));

    let app_state = AppState {
        user_service,
        game_service,
    };

    let app = api::app(app_state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "8073".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind server port");
    tracing::info!("Server up and listening on port {}", port);
    axum::serve(listener, app).await.expect("Server error");
}
