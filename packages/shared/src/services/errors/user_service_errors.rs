use std::fmt;

#[derive(Debug)]
pub enum UserServiceError {
    UserNotFound,
    UserAlreadyExists,
    InvalidCredentials,
    ValidationError(String),
    RepositoryError(String),
}

impl fmt::Display for UserServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UserServiceError::UserNotFound => write!(f, "User not found"),
            UserServiceError::UserAlreadyExists => write!(f, "User already exists"),
            UserServiceError::InvalidCredentials => write!(f, "Invalid username or password"),
            UserServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            UserServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for UserServiceError {}
