use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered player. The password is stored as given; hardening the
/// credential store is outside this service's scope.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, username: String, email: String, password: String) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            name,
            username,
            email,
            password,
            created_at: Utc::now(),
        }
    }
}
