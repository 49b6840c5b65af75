pub mod errors;
pub mod game_service;
pub mod tictactoe_service;
pub mod user_service;
