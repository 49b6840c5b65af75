use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_attribute_value, to_item};

#[cfg(test)]
use mockall::automock;

use crate::models::game::{Game, GameState};
use crate::repositories::errors::game_repository_errors::GameRepositoryError;

pub struct DynamoDbGameRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbGameRepository {
    pub fn new(client: Client) -> Self {
        let table_name =
            std::env::var("GAMES_TABLE").expect("GAMES_TABLE environment variable must be set");
        Self { client, table_name }
    }

    async fn query_seat(
        &self,
        index_name: &str,
        seat_attribute: &str,
        username: &str,
    ) -> Result<Vec<Game>, GameRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(index_name)
            .key_condition_expression(format!("{} = :username", seat_attribute))
            .expression_attribute_values(
                ":username",
                to_attribute_value(username)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;

        let mut games = Vec::new();
        if let Some(items) = output.items {
            for item in items {
                let game: Game = from_item(item)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
                games.push(game);
            }
        }
        Ok(games)
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError>;

    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError>;

    /// Games where `username` occupies either seat, most recently updated
    /// first.
    async fn find_by_participant(&self, username: &str)
        -> Result<Vec<Game>, GameRepositoryError>;

    /// Games where the two usernames occupy the two seats, in either order.
    async fn find_between(
        &self,
        player_a: &str,
        player_b: &str,
    ) -> Result<Vec<Game>, GameRepositoryError>;

    /// Persists board, state and timestamp as one write, conditional on the
    /// stored state still being `expected_state`. `ConditionFailed` means a
    /// concurrent move landed first and nothing was written.
    async fn update_game(
        &self,
        game: &Game,
        expected_state: GameState,
    ) -> Result<(), GameRepositoryError>;
}

#[async_trait]
impl GameRepository for DynamoDbGameRepository {
    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
        let item =
            to_item(game).map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
            .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;

        Ok(())
    }

    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(
                "id",
                to_attribute_value(game_id)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;

        if let Some(item) = output.item {
            let game: Game =
                from_item(item).map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
            Ok(Some(game))
        } else {
            Ok(None)
        }
    }

    async fn find_by_participant(
        &self,
        username: &str,
    ) -> Result<Vec<Game>, GameRepositoryError> {
        let mut games = self
            .query_seat("GSI_GameByPlayer1", "player1", username)
            .await?;
        games.extend(
            self.query_seat("GSI_GameByPlayer2", "player2", username)
                .await?,
        );

        // Two index queries, so the combined order is established here.
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
        let item =
            to_item(game).map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_exists(id) AND #st = :expected")
            .expression_attribute_names("#st", "state")
            .expression_attribute_values(
                ":expected",
                to_attribute_value(expected_state)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                if let SdkError::ServiceError(service_err) = &e {
                    if service_err.err().is_conditional_check_failed_exception() {
                        return Err(GameRepositoryError::ConditionFailed);
                    }
                }
                Err(GameRepositoryError::DynamoDb(e.to_string()))
            }
        }
    }
}
