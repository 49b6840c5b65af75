#[derive(Debug)]
pub enum GameRepositoryError {
    /// A conditional write did not match the stored document; the write was
    /// discarded.
    ConditionFailed,
    Serialization(String),
    DynamoDb(String),
}

impl std::fmt::Display for GameRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameRepositoryError::ConditionFailed => {
                write!(f, "Stored game did not match the expected state")
            }
            GameRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            GameRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
        }
    }
}

impl std::error::Error for GameRepositoryError {}
