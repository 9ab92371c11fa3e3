//! Long algebraic move notation (`e2e4`, `e1g1`, `a7a8q`).
//!
//! Parsing resolves the text against the legal moves of the side to move, so
//! the returned `ChessMove` always carries correct capture, castling and
//! en-passant flags.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::{ChessMove, PROMOTION_KIND};
use crate::utils::algebraic::algebraic_to_square;

pub fn long_algebraic_to_move(
    long_algebraic: &str,
    game_state: &GameState,
) -> Result<ChessMove, String> {
    if !long_algebraic.is_ascii() || !(4..=5).contains(&long_algebraic.len()) {
        return Err(format!("Invalid long algebraic move: {long_algebraic}"));
    }

    let from = algebraic_to_square(&long_algebraic[0..2])?;
    let to = algebraic_to_square(&long_algebraic[2..4])?;
    let promotion = match long_algebraic.as_bytes().get(4) {
        None => None,
        Some(ch) => Some(char_to_promotion(char::from(*ch))?),
    };

    let candidate = legal_moves(game_state, game_state.side_to_move)
        .into_iter()
        .find(|mv| mv.from == from && mv.to == to)
        .ok_or_else(|| format!("Not a legal move in this position: {long_algebraic}"))?;

    match (candidate.promotion, promotion) {
        (Some(_), None) => Err("Missing promotion piece in long algebraic move".to_owned()),
        (None, Some(_)) => Err("Only pawns reaching the last rank may promote".to_owned()),
        _ => Ok(candidate),
    }
}

pub fn move_to_long_algebraic(mv: &ChessMove) -> String {
    mv.to_string()
}

fn char_to_promotion(ch: char) -> Result<PieceKind, String> {
    match ch.to_ascii_lowercase() {
        'q' => Ok(PROMOTION_KIND),
        'n' | 'b' | 'r' => Err(format!("Under-promotion is not supported: {ch}")),
        _ => Err(format!("Invalid promotion piece character: {ch}")),
    }
}
