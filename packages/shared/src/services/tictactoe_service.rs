use crate::models::board::Mark;
use crate::models::game::{Game, GameState};
use crate::models::move_request::MoveRequest;
use crate::services::errors::tictactoe_service_errors::TicTacToeServiceError;

#[derive(Clone, Default)]
pub struct TicTacToeService;

impl TicTacToeService {
    pub fn new() -> Self {
        TicTacToeService
    }

    /// Validate a move against the game and apply it.
    /// Updates the board and state together; on any error both are left
    /// exactly as they were.
    pub fn validate_and_make_move(
        &self,
        game: &mut Game,
        request: &MoveRequest,
        username: &str,
    ) -> Result<(), TicTacToeServiceError> {
        // The mover must sit at one of the two seats and play that seat's
        // mark.
        let seat = game
            .mark_of(username)
            .ok_or_else(|| TicTacToeServiceError::NotAPlayer(username.to_string()))?;
        if request.mark != seat {
            return Err(TicTacToeServiceError::WrongMark(request.mark));
        }

        // No moves on a decided game.
        let turn = game
            .state
            .turn()
            .ok_or(TicTacToeServiceError::GameFinished)?;
        if request.mark != turn {
            return Err(TicTacToeServiceError::NotYourTurn(request.mark));
        }

        let target = game
            .board
            .get(request.cell)
            .map_err(|_| TicTacToeServiceError::OutOfRange(request.cell))?;
        if !target.is_empty() {
            return Err(TicTacToeServiceError::CellOccupied(request.cell));
        }

        let board = game
            .board
            .place(request.cell, request.mark)
            .map_err(|_| TicTacToeServiceError::OutOfRange(request.cell))?;

        game.state = if board.has_winner() {
            // The move that completed a line decides the game for its mark.
            match request.mark {
                Mark::X => GameState::WonByPlayer1,
                Mark::O => GameState::WonByPlayer2,
            }
        } else if board.is_full() {
            GameState::Draw
        } else {
            match request.mark {
                Mark::X => GameState::WaitingOnPlayer2,
                Mark::O => GameState::WaitingOnPlayer1,
            }
        };
        game.board = board;

        Ok(())
    }
}
