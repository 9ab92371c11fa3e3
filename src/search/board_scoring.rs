//! Pluggable board evaluation.
//!
//! Search delegates static scoring to `BoardScorer` so heuristics can be
//! swapped without touching the search. The baseline `PositionalScorer`
//! combines material, piece placement and optional mobility, and lets
//! finished games override everything else.

use tracing::warn;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{is_king_in_check, king_square};
use crate::move_generation::legal_move_generator::legal_moves_in_place;

pub const CHECKMATE_SCORE: i32 = 10_000;

/// Combined non-pawn, non-king material (both sides) at or above which the
/// king is rewarded for sheltering on a wing.
pub const MIDDLEGAME_MATERIAL_THRESHOLD: i32 = 2_600;

pub trait BoardScorer: Send + Sync {
    /// Score from `perspective`'s point of view; positive favours it.
    fn score(&self, game_state: &GameState, perspective: Color) -> i32;
}

#[inline]
pub const fn piece_value(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20_000,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PositionalScorer {
    pub include_mobility: bool,
    pub mobility_weight: i32,
}

impl Default for PositionalScorer {
    fn default() -> Self {
        Self {
            include_mobility: false,
            mobility_weight: 5,
        }
    }
}

impl PositionalScorer {
    pub const fn with_mobility(mobility_weight: i32) -> Self {
        Self {
            include_mobility: true,
            mobility_weight,
        }
    }

    fn white_minus_black(&self, game_state: &GameState, side_moves: usize) -> i32 {
        let middlegame = is_middlegame(game_state);
        let mut score = 0i32;

        for (square, piece) in game_state.occupied_squares() {
            let value = piece_value(piece.kind) + positional_bonus(piece, square, middlegame);
            score += match piece.color {
                Color::White => value,
                Color::Black => -value,
            };
        }

        if self.include_mobility {
            let side = game_state.side_to_move;
            let other_moves = count_legal_moves(game_state, side.opposite());
            let (white, black) = match side {
                Color::White => (side_moves, other_moves),
                Color::Black => (other_moves, side_moves),
            };
            score += (white as i32 - black as i32) * self.mobility_weight;
        }

        score
    }
}

/// Positions the generator cannot work on count as having no moves.
fn count_legal_moves(game_state: &GameState, color: Color) -> usize {
    let mut scratch = game_state.clone();
    match legal_moves_in_place(&mut scratch, color) {
        Ok(moves) => moves.len(),
        Err(err) => {
            warn!(%err, fen = %game_state.get_fen(), "move count unavailable while scoring");
            0
        }
    }
}

impl BoardScorer for PositionalScorer {
    fn score(&self, game_state: &GameState, perspective: Color) -> i32 {
        let side = game_state.side_to_move;
        let orient = |white_minus_black: i32| match perspective {
            Color::White => white_minus_black,
            Color::Black => -white_minus_black,
        };
        let from_side = |score: i32| if perspective == side { score } else { -score };

        if king_square(game_state, side).is_none() {
            return from_side(-CHECKMATE_SCORE);
        }

        let side_moves = count_legal_moves(game_state, side);
        if side_moves == 0 {
            return if is_king_in_check(game_state, side) {
                from_side(-CHECKMATE_SCORE)
            } else {
                0
            };
        }

        orient(self.white_minus_black(game_state, side_moves))
    }
}

fn is_middlegame(game_state: &GameState) -> bool {
    let mut material = 0;
    for color in [Color::White, Color::Black] {
        for kind in [PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen] {
            material += game_state.piece_count(color, kind) as i32 * piece_value(kind);
        }
    }
    material >= MIDDLEGAME_MATERIAL_THRESHOLD
}

/// Placement bonus for one piece, measured from its own side of the board.
pub fn positional_bonus(piece: Piece, square: Square, middlegame: bool) -> i32 {
    let file = file_of(square) as i32;
    let rank = piece.color.relative_rank(square) as i32;
    let edge_distance = file.min(7 - file) + rank.min(7 - rank);

    match piece.kind {
        PieceKind::Pawn => 10 * (rank - 1) + 3 * edge_distance,
        PieceKind::Knight => 5 * edge_distance,
        PieceKind::Bishop => 3 * edge_distance,
        PieceKind::Queen => 2 * edge_distance,
        PieceKind::Rook if rank == 6 => 30,
        PieceKind::Rook => 0,
        PieceKind::King if middlegame && !(2..=5).contains(&file) => 20,
        PieceKind::King => 0,
    }
}
