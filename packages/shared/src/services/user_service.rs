use std::sync::Arc;

use tracing::info;

use crate::models::user::User;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::user_service_errors::UserServiceError;

pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository + Send + Sync>) -> Self {
        UserService { repository }
    }

    pub async fn register(
        &self,
        name: &str,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, UserServiceError> {
        if name.is_empty() || username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Name, username, email and password are all required".to_string(),
            ));
        }
        if !email.contains('@') {
            return Err(UserServiceError::ValidationError(
                "Email is invalid".to_string(),
            ));
        }
        if username.len() <= 3 {
            return Err(UserServiceError::ValidationError(
                "Username is too short".to_string(),
            ));
        }
        if password.len() <= 6 {
            return Err(UserServiceError::ValidationError(
                "Password is too short".to_string(),
            ));
        }

        if self
            .repository
            .email_exists(email)
            .await
            .map_err(|e| UserServiceError::RepositoryError(e.to_string()))?
        {
            return Err(UserServiceError::UserAlreadyExists);
        }
        if self
            .repository
            .username_exists(username)
            .await
            .map_err(|e| UserServiceError::RepositoryError(e.to_string()))?
        {
            return Err(UserServiceError::UserAlreadyExists);
        }

        // Stored as given; see the User model note on credentials.
        let user = User::new(
            name.to_string(),
            username.to_string(),
            email.to_string(),
            password.to_string(),
        );
        self.repository
            .create_user(&user)
            .await
            .map_err(|e| match e {
                UserRepositoryError::AlreadyExists => UserServiceError::UserAlreadyExists,
                _ => UserServiceError::RepositoryError(e.to_string()),
            })?;

        info!("Registered user {}", user.username);
        Ok(user)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<User, UserServiceError> {
        if username.is_empty() || password.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Username and password are required".to_string(),
            ));
        }

        let user = match self.repository.get_user_by_username(username).await {
            Ok(user) => user,
            Err(UserRepositoryError::NotFound) => {
                return Err(UserServiceError::InvalidCredentials)
            }
            Err(e) => return Err(UserServiceError::RepositoryError(e.to_string())),
        };

        if user.password != password {
            return Err(UserServiceError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<User, UserServiceError> {
        if username.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Username cannot be empty".to_string(),
            ));
        }
        self.repository
            .get_user_by_username(username)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => UserServiceError::UserNotFound,
                _ => UserServiceError::RepositoryError(e.to_string()),
            })
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<User, UserServiceError> {
        if email.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Email cannot be empty".to_string(),
            ));
        }
        self.repository
            .get_user_by_email(email)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => UserServiceError::UserNotFound,
                _ => UserServiceError::RepositoryError(e.to_string()),
            })
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, UserServiceError> {
        self.repository
            .email_exists(email)
            .await
            .map_err(|e| UserServiceError::RepositoryError(e.to_string()))
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool, UserServiceError> {
        self.repository
            .username_exists(username)
            .await
            .map_err(|e| UserServiceError::RepositoryError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;

    fn stored_user() -> User {
        User::new(
            "Alice Example".to_string(),
            "alice".to_string(),
            "alice@example.com".to_string(),
            "password123".to_string(),
        )
    }

    #[tokio::test]
    async fn test_register_creates_user() {
        let mut repository = MockUserRepository::new();
        repository.expect_email_exists().returning(|_| Ok(false));
        repository.expect_username_exists().returning(|_| Ok(false));
        repository.expect_create_user().returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository));
        let user = service
            .register("Alice Example", "alice", "alice@example.com", "password123")
            .await
            .unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_register_rejects_taken_email() {
        let mut repository = MockUserRepository::new();
        repository.expect_email_exists().returning(|_| Ok(true));

        let service = UserService::new(Arc::new(repository));
        let result = service
            .register("Alice", "alice", "alice@example.com", "password123")
            .await;

        assert!(matches!(result, Err(UserServiceError::UserAlreadyExists)));
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let repository = MockUserRepository::new();

        let service = UserService::new(Arc::new(repository));
        let result = service
            .register("Alice", "alice", "alice@example.com", "short")
            .await;

        assert!(matches!(result, Err(UserServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_short_username() {
        let repository = MockUserRepository::new();

        let service = UserService::new(Arc::new(repository));
        let result = service
            .register("Al", "al", "al@example.com", "password123")
            .await;

        assert!(matches!(result, Err(UserServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_login_with_matching_credentials() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_get_user_by_username()
            .returning(|_| Ok(stored_user()));

        let service = UserService::new(Arc::new(repository));
        let user = service.login("alice", "password123").await.unwrap();

        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_get_user_by_username()
            .returning(|_| Ok(stored_user()));

        let service = UserService::new(Arc::new(repository));
        let result = service.login("alice", "wrong").await;

        assert!(matches!(result, Err(UserServiceError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_hides_unknown_user() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_get_user_by_username()
            .returning(|_| Err(UserRepositoryError::NotFound));

        let service = UserService::new(Arc::new(repository));
        let result = service.login("nobody", "password123").await;

        // Indistinguishable from a bad password.
        assert!(matches!(result, Err(UserServiceError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_get_user_by_email_maps_not_found() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_get_user_by_email()
            .returning(|_| Err(UserRepositoryError::NotFound));

        let service = UserService::new(Arc::new(repository));
        let result = service.get_user_by_email("ghost@example.com").await;

        assert!(matches!(result, Err(UserServiceError::UserNotFound)));
    }
}
