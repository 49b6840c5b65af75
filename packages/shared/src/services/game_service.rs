use std::sync::Arc;

use tracing::{debug, info};

use crate::models::game::Game;
use crate::models::move_request::MoveRequest;
use crate::models::user::User;
use crate::repositories::game_repository::GameRepository;
use crate::services::errors::game_service_errors::GameServiceError;
use crate::services::tictactoe_service::TicTacToeService;

#[derive(Clone)]
pub struct GameService {
    repository: Arc<dyn GameRepository + Send + Sync>,
    rules: TicTacToeService,
}

impl GameService {
    pub fn new(repository: Arc<dyn GameRepository + Send + Sync>) -> Self {
        GameService {
            repository,
            rules: TicTacToeService::new(),
        }
    }

    /// Start a game between two registered users. If a game between the pair
    /// is still running (either seat order), that game is returned instead
    /// of creating a second one.
    pub async fn create_game(
        &self,
        player1: &User,
        player2: &User,
    ) -> Result<Game, GameServiceError> {
        if player1.username == player2.username {
            return Err(GameServiceError::ValidationError(
                "A game needs two distinct players".to_string(),
            ));
        }

        let existing = self
            .repository
            .find_between(&player1.username, &player2.username)
            .await
            .map_err(|e| GameServiceError::RepositoryError(e.to_string()))?;

        if let Some(ongoing) = existing.into_iter().find(|game| !game.state.is_terminal()) {
            debug!(
                "Game {} between {} and {} is still running, returning it",
                ongoing.id, player1.username, player2.username
            );
            return Ok(ongoing);
        }

        let game = Game::new(&player1.username, &player2.username);
        self.repository
            .create_game(&game)
            .await
            .map_err(|e| GameServiceError::RepositoryError(e.to_string()))?;

        info!(
            "Created game {} between {} and {}",
            game.id, game.player1, game.player2
        );
        Ok(game)
    }

    pub async fn get_game(&self, game_id: &str) -> Result<Game, GameServiceError> {
        self.repository
            .get_game(game_id)
            .await
            .map_err(|e| GameServiceError::RepositoryError(e.to_string()))?
            .ok_or(GameServiceError::GameNotFound)
    }

    /// All games `username` participates in, most recently updated first.
    pub async fn games_for_player(&self, username: &str) -> Result<Vec<Game>, GameServiceError> {
        self.repository
            .find_by_participant(username)
            .await
            .map_err(|e| GameServiceError::RepositoryError(e.to_string()))
    }

    /// Load, validate, apply and persist one move. The write is conditioned
    /// on the state observed at load time, so of two racing moves exactly
    /// one commits; the other gets `MoveConflict` and changes nothing.
    pub async fn play_move(
        &self,
        request: &MoveRequest,
        username: &str,
    ) -> Result<Game, GameServiceError> {
        let mut game = self.get_game(&request.game_id).await?;
        let observed_state = game.state;

        self.rules.validate_and_make_move(&mut game, request, username)?;

        game.touch();
        self.repository
            .update_game(&game, observed_state)
            .await
            .map_err(GameServiceError::from)?;

        debug!(
            "{} played cell {} on game {}, state is now {}",
            username, request.cell, game.id, game.state
        );
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::board::Mark;
    use crate::models::game::GameState;
    use crate::repositories::errors::game_repository_errors::GameRepositoryError;
    use crate::repositories::game_repository::MockGameRepository;
    use crate::services::errors::tictactoe_service_errors::TicTacToeServiceError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn user(username: &str) -> User {
        User::new(
            username.to_string(),
            username.to_string(),
            format!("{}@example.com", username),
            "password123".to_string(),
        )
    }

    // Backed by a plain map; update honors the conditional-state contract.
    #[derive(Default)]
    struct InMemoryGameRepository {
        games: Mutex<HashMap<String, Game>>,
    }

    #[async_trait]
    impl GameRepository for InMemoryGameRepository {
        async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
            let mut games = self.games.lock().unwrap();
            if games.contains_key(&game.id) {
                return Err(GameRepositoryError::DynamoDb("duplicate id".to_string()));
            }
            games.insert(game.id.clone(), game.clone());
            Ok(())
        }

        async fn get_game(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError> {
            Ok(self.games.lock().unwrap().get(game_id).cloned())
        }

        async fn find_by_participant(
            &self,
            username: &str,
        ) -> Result<Vec<Game>, GameRepositoryError> {
            let mut games: Vec<Game> = self
                .games
                .lock()
                .unwrap()
                .values()
                .filter(|game| game.is_participant(username))
                .cloned()
                .collect();
            games.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            Ok(games)
        }

        async fn find_between(
            &self,
            player_a: &str,
            player_b: &str,
        ) -> Result<Vec<Game>, GameRepositoryError> {
            let mut games = self.find_by_participant(player_a).await?;
            games.retain(|game| game.is_participant(player_b));
            Ok(games)
        }

        async fn update_game(
            &self,
            game: &Game,
            expected_state: GameState,
        ) -> Result<(), GameRepositoryError> {
            let mut games = self.games.lock().unwrap();
            match games.get(&game.id) {
                Some(stored) if stored.state == expected_state => {
                    games.insert(game.id.clone(), game.clone());
                    Ok(())
                }
                _ => Err(GameRepositoryError::ConditionFailed),
            }
        }
    }

    fn service() -> (GameService, Arc<InMemoryGameRepository>) {
        let repository = Arc::new(InMemoryGameRepository::default());
        (GameService::new(repository.clone()), repository)
    }

    #[tokio::test]
    async fn test_create_game_persists_fresh_game() {
        let (service, _) = service();

        let game = service.create_game(&user("alice"), &user("bob")).await.unwrap();

        assert_eq!(game.player1, "alice");
        assert_eq!(game.player2, "bob");
        assert_eq!(game.state, GameState::WaitingOnPlayer1);
        assert_eq!(service.get_game(&game.id).await.unwrap(), game);
    }

    #[tokio::test]
    async fn test_create_game_rejects_same_player_twice() {
        let (service, _) = service();

        let result = service.create_game(&user("alice"), &user("alice")).await;

        assert!(matches!(result, Err(GameServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_duplicate_creation_returns_existing_game() {
        let (service, _) = service();

        let first = service.create_game(&user("alice"), &user("bob")).await.unwrap();
        let second = service.create_game(&user("alice"), &user("bob")).await.unwrap();
        // Seat order reversed still hits the same running game.
        let third = service.create_game(&user("bob"), &user("alice")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.id, third.id);
    }

    #[tokio::test]
    async fn test_finished_game_does_not_block_a_new_one() {
        let (service, repository) = service();

        let first = service.create_game(&user("alice"), &user("bob")).await.unwrap();
        {
            let mut games = repository.games.lock().unwrap();
            games.get_mut(&first.id).unwrap().state = GameState::WonByPlayer1;
        }

        let second = service.create_game(&user("alice"), &user("bob")).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_play_move_applies_and_persists() {
        let (service, _) = service();
        let game = service.create_game(&user("alice"), &user("bob")).await.unwrap();

        let request = MoveRequest::new(game.id.clone(), 4, Mark::X);
        let updated = service.play_move(&request, "alice").await.unwrap();

        assert_eq!(updated.state, GameState::WaitingOnPlayer2);
        assert!(updated.updated_at >= game.updated_at);

        let stored = service.get_game(&game.id).await.unwrap();
        assert_eq!(stored.board, updated.board);
        assert_eq!(stored.state, GameState::WaitingOnPlayer2);
    }

    #[tokio::test]
    async fn test_play_move_unknown_game() {
        let (service, _) = service();

        let request = MoveRequest::new("missing".to_string(), 0, Mark::X);
        let result = service.play_move(&request, "alice").await;

        assert!(matches!(result, Err(GameServiceError::GameNotFound)));
    }

    #[tokio::test]
    async fn test_rejected_move_leaves_store_untouched() {
        let (service, _) = service();
        let game = service.create_game(&user("alice"), &user("bob")).await.unwrap();

        let request = MoveRequest::new(game.id.clone(), 0, Mark::O);
        let result = service.play_move(&request, "bob").await;

        assert!(matches!(
            result,
            Err(GameServiceError::IllegalMove(
                TicTacToeServiceError::NotYourTurn(Mark::O)
            ))
        ));
        let stored = service.get_game(&game.id).await.unwrap();
        assert_eq!(stored, game);
    }

    #[tokio::test]
    async fn test_games_for_player_orders_most_recent_first() {
        let (service, _) = service();

        let older = service.create_game(&user("alice"), &user("bob")).await.unwrap();
        let newer = service.create_game(&user("alice"), &user("carol")).await.unwrap();

        // Touch the older game so it becomes the most recently updated.
        let request = MoveRequest::new(older.id.clone(), 0, Mark::X);
        service.play_move(&request, "alice").await.unwrap();

        let games = service.games_for_player("alice").await.unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].id, older.id);
        assert_eq!(games[1].id, newer.id);
    }

    #[tokio::test]
    async fn test_lost_write_race_surfaces_as_conflict() {
        let mut repository = MockGameRepository::new();
        let game = Game::new("alice", "bob");
        let game_id = game.id.clone();

        repository
            .expect_get_game()
            .returning(move |_| Ok(Some(game.clone())));
        repository
            .expect_update_game()
            .returning(|_, _| Err(GameRepositoryError::ConditionFailed));

        let service = GameService::new(Arc::new(repository));
        let request = MoveRequest::new(game_id, 4, Mark::X);
        let result = service.play_move(&request, "alice").await;

        assert!(matches!(result, Err(GameServiceError::MoveConflict)));
    }
}
