use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_attribute_value, to_item};

#[cfg(test)]
use mockall::automock;

use crate::models::user::User;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;

pub struct DynamoDbUserRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbUserRepository {
    pub fn new(client: Client) -> Self {
        let table_name =
            std::env::var("USERS_TABLE").expect("USERS_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: &User) -> Result<(), UserRepositoryError>;
    async fn get_user_by_username(&self, username: &str) -> Result<User, UserRepositoryError>;
    async fn get_user_by_email(&self, email: &str) -> Result<User, UserRepositoryError>;
    async fn email_exists(&self, email: &str) -> Result<bool, UserRepositoryError>;
    async fn username_exists(&self, username: &str) -> Result<bool, UserRepositoryError>;
}

#[async_trait]
impl UserRepository for DynamoDbUserRepository {
    async fn create_user(&self, user: &User) -> Result<(), UserRepositoryError> {
        let item = to_item(user).map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(username)")
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                if let SdkError::ServiceError(service_err) = &e {
                    if service_err.err().is_conditional_check_failed_exception() {
                        return Err(UserRepositoryError::AlreadyExists);
                    }
                }
                Err(UserRepositoryError::DynamoDb(e.to_string()))
            }
        }
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User, UserRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(
                "username",
                to_attribute_value(username)
                    .map_err(|e| UserRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| UserRepositoryError::DynamoDb(e.to_string()))?;

        if let Some(item) = output.item {
            let user: User =
                from_item(item).map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
            Ok(user)
        } else {
            Err(UserRepositoryError::NotFound)
        }
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name("GSI_UserByEmail")
            .key_condition_expression("email = :email")
            .expression_attribute_values(
                ":email",
                to_attribute_value(email)
                    .map_err(|e| UserRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| UserRepositoryError::DynamoDb(e.to_string()))?;

        if let Some(item) = output.items.and_then(|items| items.into_iter().next()) {
            let user: User =
                from_item(item).map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
            Ok(user)
        } else {
            Err(UserRepositoryError::NotFound)
        }
    }

    async fn email_exists(&self, email: &str) -> Result<bool, UserRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name("GSI_UserByEmail")
            .key_condition_expression("email = :email")
            .expression_attribute_values(
                ":email",
                to_attribute_value(email)
                    .map_err(|e| UserRepositoryError::Serialization(e.to_string()))?,
            )
            .limit(1)
            .send()
            .await
            .map_err(|e| UserRepositoryError::DynamoDb(e.to_string()))?;

        Ok(output
            .items
            .as_ref()
            .map_or(false, |items| !items.is_empty()))
    }

    async fn username_exists(&self, username: &str) -> Result<bool, UserRepositoryError> {
        match self.get_user_by_username(username).await {
            Ok(_) => Ok(true),
            Err(UserRepositoryError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
