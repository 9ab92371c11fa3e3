use std::error::Error;
use std::fmt;

use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::ChessMove;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveGenerationError {
    InvalidState(String),
}

impl fmt::Display for MoveGenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveGenerationError::InvalidState(msg) => write!(f, "invalid game state: {msg}"),
        }
    }
}

impl Error for MoveGenerationError {}

pub trait MoveGenerator: Send + Sync {
    /// Legal moves for `color`. The position is used as scratch space for
    /// make/undo and is handed back exactly as it was found.
    fn generate_legal_moves(
        &self,
        game_state: &mut GameState,
        color: Color,
    ) -> MoveGenResult<Vec<ChessMove>>;
}
