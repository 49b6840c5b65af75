use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Both players are identified by email.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateGameRequest {
    pub player1: String,
    pub player2: String,
}

/// Body of a move submission. Existing clients send the cell index under
/// `box`; `cell` is the canonical name.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayMoveRequest {
    #[serde(alias = "box")]
    pub cell: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub username: Option<String>,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_move_request_accepts_box_alias() {
        let request: PlayMoveRequest = serde_json::from_str(r#"{"box": 4}"#).unwrap();
        assert_eq!(request.cell, 4);

        let request: PlayMoveRequest = serde_json::from_str(r#"{"cell": 7}"#).unwrap();
        assert_eq!(request.cell, 7);
    }

    #[test]
    fn test_create_game_request_round_trip() {
        let request = CreateGameRequest {
            player1: "alice@example.com".to_string(),
            player2: "bob@example.com".to_string(),
        };

        let json = serde_json::to_string(&request).unwrap();
        let restored: CreateGameRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.player1, request.player1);
        assert_eq!(restored.player2, request.player2);
    }
}
