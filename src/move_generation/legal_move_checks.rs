//! Attack oracle and check detection.
//!
//! These are primitives used by the legality filter, castling generation and
//! the evaluator; nothing here generates or filters moves.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    let kings = game_state.pieces[color.index()][PieceKind::King.index()];
    if kings == 0 {
        None
    } else {
        Some(kings.trailing_zeros() as Square)
    }
}

/// `false` when `color` has no king; callers that must treat a missing king
/// as fatal check `king_square` themselves.
#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

/// Whether any `attacker_color` piece attacks `square`. Pawns count with
/// their capture pattern whether or not the square is occupied.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let theirs = &game_state.pieces[attacker_color.index()];

    // Look outwards from the target with each pattern and see whether a
    // matching attacker sits at the other end.
    if pawn_attacks(attacker_color.opposite(), square) & theirs[PieceKind::Pawn.index()] != 0 {
        return true;
    }
    if knight_attacks(square) & theirs[PieceKind::Knight.index()] != 0 {
        return true;
    }
    if king_attacks(square) & theirs[PieceKind::King.index()] != 0 {
        return true;
    }

    let queens = theirs[PieceKind::Queen.index()];
    let diagonal = theirs[PieceKind::Bishop.index()] | queens;
    if diagonal != 0 && bishop_attacks(square, game_state.occupancy_all) & diagonal != 0 {
        return true;
    }
    let orthogonal = theirs[PieceKind::Rook.index()] | queens;
    orthogonal != 0 && rook_attacks(square, game_state.occupancy_all) & orthogonal != 0
}
