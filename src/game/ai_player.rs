//! Computer opponent bound to one color of a `ChessGame`.

use tracing::debug;

use crate::engines::difficulty::Difficulty;
use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_trait::GameStateView;
use crate::game::chess_game::{ChessGame, GameError};
use crate::game_state::chess_types::Color;
use crate::moves::chess_move::ChessMove;

pub struct AiPlayer {
    engine: MinimaxEngine,
    plays: Color,
    active: bool,
    difficulty: Difficulty,
}

impl AiPlayer {
    pub fn new(engine: MinimaxEngine, plays: Color, difficulty: u8) -> Self {
        Self {
            engine,
            plays,
            active: true,
            difficulty: Difficulty::new(difficulty),
        }
    }

    pub fn plays(&self) -> Color {
        self.plays
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, level: u8) {
        self.difficulty = Difficulty::new(level);
    }

    pub fn engine_mut(&mut self) -> &mut MinimaxEngine {
        &mut self.engine
    }

    /// Plays one move when active, the game is still running and it is this
    /// player's turn; otherwise does nothing and returns `Ok(None)`.
    pub fn take_turn(&mut self, game: &mut ChessGame) -> Result<Option<ChessMove>, GameError> {
        if !self.active || game.is_game_over() || game.side_to_move() != self.plays {
            return Ok(None);
        }

        let Some(mv) = self
            .engine
            .select_move(&*game, self.difficulty.level(), self.plays)?
        else {
            debug!(side = ?self.plays, "engine proposed no move");
            return Ok(None);
        };

        game.make_move(mv).map(Some)
    }
}
