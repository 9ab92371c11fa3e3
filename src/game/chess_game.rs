//! Authoritative game controller.
//!
//! Owns the canonical position, accepts only legal moves, keeps the move
//! history, and re-evaluates whether the game has ended after every move.

use std::error::Error;
use std::fmt;

use tracing::{debug, info};

use crate::engines::engine_trait::{EngineError, GameStateView};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::{is_king_in_check, king_square};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::ChessMove;
use crate::utils::long_algebraic::long_algebraic_to_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    /// The side to move has no king; treated as a loss for it.
    KingMissing { winner: Color },
}

impl GameOutcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            GameOutcome::Checkmate { winner } | GameOutcome::KingMissing { winner } => Some(winner),
            GameOutcome::Stalemate | GameOutcome::InsufficientMaterial => None,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Checkmate { winner } | GameOutcome::KingMissing { winner } => {
                write!(f, "{winner:?} wins")
            }
            GameOutcome::Stalemate => write!(f, "Stalemate"),
            GameOutcome::InsufficientMaterial => write!(f, "Insufficient material"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    GameOver,
    IllegalMove(String),
    Engine(EngineError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::GameOver => write!(f, "the game is already over"),
            GameError::IllegalMove(msg) => write!(f, "illegal move: {msg}"),
            GameError::Engine(err) => write!(f, "engine failed: {err}"),
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GameError::Engine(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EngineError> for GameError {
    fn from(err: EngineError) -> Self {
        GameError::Engine(err)
    }
}

#[derive(Debug, Clone)]
pub struct ChessGame {
    state: GameState,
    history: Vec<ChessMove>,
    outcome: Option<GameOutcome>,
}

impl ChessGame {
    pub fn new() -> Self {
        Self::from_state(GameState::new_game())
    }

    pub fn from_fen(fen: &str) -> Result<Self, String> {
        let state = GameState::from_fen(fen)?;
        state.validate()?;
        Ok(Self::from_state(state))
    }

    fn from_state(state: GameState) -> Self {
        let mut game = Self {
            state,
            history: Vec::new(),
            outcome: None,
        };
        game.refresh_outcome();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn history(&self) -> &[ChessMove] {
        &self.history
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Applies `mv` if it is legal for the side to move. The move is matched
    /// against the generated candidates by squares and promotion, so callers
    /// need not fill in capture or special-move flags.
    pub fn make_move(&mut self, mv: ChessMove) -> Result<ChessMove, GameError> {
        if self.outcome.is_some() {
            return Err(GameError::GameOver);
        }
        let side = self.state.side_to_move;
        if mv.color != side {
            return Err(GameError::IllegalMove(format!("{mv}: {side:?} is to move")));
        }

        let candidate = legal_moves(&self.state, side)
            .into_iter()
            .find(|candidate| candidate.same_action(&mv))
            .ok_or_else(|| GameError::IllegalMove(mv.to_string()))?;

        apply_move(&mut self.state, candidate)
            .map_err(|err| GameError::IllegalMove(format!("{candidate}: {err}")))?;
        self.history.push(candidate);
        debug!(mv = %candidate, fen = %self.state.get_fen(), "move played");

        self.refresh_outcome();
        Ok(candidate)
    }

    /// Plays a move written in long algebraic notation (`e2e4`, `e7e8q`).
    pub fn make_move_lan(&mut self, text: &str) -> Result<ChessMove, GameError> {
        if self.outcome.is_some() {
            return Err(GameError::GameOver);
        }
        let mv = long_algebraic_to_move(text, &self.state).map_err(GameError::IllegalMove)?;
        self.make_move(mv)
    }

    fn refresh_outcome(&mut self) {
        let side = self.state.side_to_move;
        self.outcome = if king_square(&self.state, side).is_none() {
            Some(GameOutcome::KingMissing {
                winner: side.opposite(),
            })
        } else if legal_moves(&self.state, side).is_empty() {
            if is_king_in_check(&self.state, side) {
                Some(GameOutcome::Checkmate {
                    winner: side.opposite(),
                })
            } else {
                Some(GameOutcome::Stalemate)
            }
        } else if has_insufficient_material(&self.state, Color::White)
            && has_insufficient_material(&self.state, Color::Black)
        {
            Some(GameOutcome::InsufficientMaterial)
        } else {
            None
        };

        self.state.game_over = self.outcome.is_some();
        if let Some(outcome) = self.outcome {
            info!(%outcome, moves = self.history.len(), "game over");
        }
    }
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStateView for ChessGame {
    fn position(&self) -> &GameState {
        &self.state
    }

    fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }
}

/// No queen, rook or pawn, and at most two pieces in total (king plus one
/// minor piece).
fn has_insufficient_material(game_state: &GameState, color: Color) -> bool {
    let heavy_or_pawn = [PieceKind::Queen, PieceKind::Rook, PieceKind::Pawn]
        .into_iter()
        .any(|kind| game_state.piece_count(color, kind) > 0);
    if heavy_or_pawn {
        return false;
    }
    let total: u32 = ALL_PIECE_KINDS
        .into_iter()
        .map(|kind| game_state.piece_count(color, kind))
        .sum();
    total < 3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game: &mut ChessGame, moves: &[&str]) {
        for text in moves {
            game.make_move_lan(text).expect("move should be legal");
        }
    }

    #[test]
    fn fools_mate_ends_the_game() {
        let mut game = ChessGame::new();
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);

        assert_eq!(
            game.outcome(),
            Some(GameOutcome::Checkmate {
                winner: Color::Black
            })
        );
        assert!(game.is_game_over());
        assert!(game.state().game_over);
        assert!(is_king_in_check(game.state(), Color::White));
        assert!(game.legal_moves(Color::White).is_empty());
        assert_eq!(game.history().len(), 4);
        assert_eq!(game.make_move_lan("a2a3"), Err(GameError::GameOver));
    }

    #[test]
    fn illegal_moves_are_rejected_without_change() {
        let mut game = ChessGame::new();
        let before = game.state().clone();

        let leap = ChessMove::quiet(Color::White, PieceKind::Pawn, 12, 36);
        assert!(matches!(game.make_move(leap), Err(GameError::IllegalMove(_))));
        let wrong_side = ChessMove::quiet(Color::Black, PieceKind::Pawn, 52, 36);
        assert!(matches!(game.make_move(wrong_side), Err(GameError::IllegalMove(_))));
        assert!(game.make_move_lan("e2e5").is_err());

        assert_eq!(game.state(), &before);
        assert!(game.history().is_empty());
    }

    #[test]
    fn caller_built_moves_get_canonical_flags() {
        let mut game = ChessGame::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let played = game
            .make_move(ChessMove::quiet(Color::White, PieceKind::King, 4, 6))
            .expect("castling should be legal");
        assert!(played.is_castle());
        assert_eq!(game.state().piece_at(5).map(|p| p.kind), Some(PieceKind::Rook));
    }

    #[test]
    fn stalemate_and_insufficient_material_are_draws() {
        let game = ChessGame::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert_eq!(game.outcome(), Some(GameOutcome::Stalemate));
        assert_eq!(game.outcome().and_then(GameOutcome::winner), None);

        let mut game =
            ChessGame::from_fen("4k3/8/8/8/8/8/3r4/4K1N1 w - - 0 1").expect("FEN should parse");
        assert_eq!(game.outcome(), None);
        play(&mut game, &["e1d2"]);
        assert_eq!(game.outcome(), Some(GameOutcome::InsufficientMaterial));
    }

    #[test]
    fn missing_king_is_a_loss_for_the_side_to_move() {
        let game = ChessGame::from_fen("4k3/8/8/8/8/8/8/R7 w - - 0 1").expect("FEN should parse");
        assert_eq!(
            game.outcome(),
            Some(GameOutcome::KingMissing {
                winner: Color::Black
            })
        );
    }

    #[test]
    fn reset_restores_the_opening() {
        let mut game = ChessGame::new();
        play(&mut game, &["e2e4", "e7e5"]);
        game.reset();
        assert_eq!(game.state(), &GameState::new_game());
        assert!(game.history().is_empty());
    }
}
