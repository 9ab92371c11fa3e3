//! Engine abstraction layer.
//!
//! Defines the read-only view of a game an engine works from, the request
//! parameters and output payload, and the error type, so different players
//! can be swapped behind a single trait interface.

use std::error::Error;
use std::fmt;

use crate::game_state::{chess_types::Color, game_state::GameState};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::move_generation::move_generator::MoveGenerationError;
use crate::moves::chess_move::ChessMove;

/// What an engine needs to see of a game: a position snapshot to clone and
/// search, whose turn it is, and whether the game has already ended.
pub trait GameStateView {
    fn position(&self) -> &GameState;

    fn is_game_over(&self) -> bool;

    fn side_to_move(&self) -> Color {
        self.position().side_to_move
    }

    fn legal_moves(&self, color: Color) -> Vec<ChessMove> {
        legal_moves(self.position(), color)
    }
}

impl GameStateView for GameState {
    fn position(&self) -> &GameState {
        self
    }

    fn is_game_over(&self) -> bool {
        self.game_over
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Overrides the engine's configured difficulty for this request.
    pub difficulty: Option<u8>,
    /// Overrides the engine's configured time budget for this request.
    pub movetime_ms: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<ChessMove>,
    pub info_lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    InvalidPosition(String),
    WrongSideToMove { requested: Color, to_move: Color },
    InvalidOption { name: String, value: String },
    MoveGeneration(MoveGenerationError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidPosition(msg) => write!(f, "invalid position: {msg}"),
            EngineError::WrongSideToMove { requested, to_move } => write!(
                f,
                "asked to move for {requested:?} but {to_move:?} is to move"
            ),
            EngineError::InvalidOption { name, value } => {
                write!(f, "invalid option {name} = '{value}'")
            }
            EngineError::MoveGeneration(err) => write!(f, "move generation failed: {err}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EngineError::MoveGeneration(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MoveGenerationError> for EngineError {
    fn from(err: MoveGenerationError) -> Self {
        EngineError::MoveGeneration(err)
    }
}

pub trait Engine: Send {
    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> Result<(), EngineError> {
        Ok(())
    }

    fn choose_move(
        &mut self,
        game: &dyn GameStateView,
        params: &SearchParams,
    ) -> Result<EngineOutput, EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_state_is_its_own_view() {
        let game = GameState::new_game();
        let view: &dyn GameStateView = &game;
        assert_eq!(view.side_to_move(), Color::White);
        assert!(!view.is_game_over());
        assert_eq!(view.legal_moves(Color::Black).len(), 20);
    }

    #[test]
    fn move_generation_errors_convert_and_chain() {
        let err: EngineError = MoveGenerationError::InvalidState("broken".to_owned()).into();
        assert!(err.to_string().contains("broken"));
        assert!(err.source().is_some());
    }
}
