//! Full legal move generation pipeline.
//!
//! Gathers pseudo-legal moves piece by piece, then applies each candidate on
//! the working position and drops those that leave the mover's king attacked
//! (or that are made with no king on the board at all).

use tracing::warn;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_checks::{is_king_in_check, king_square};
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_sliders::generate_slider_moves;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerator};
use crate::moves::chess_move::ChessMove;

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(
        &self,
        game_state: &mut GameState,
        color: Color,
    ) -> MoveGenResult<Vec<ChessMove>> {
        legal_moves_in_place(game_state, color)
    }
}

pub fn generate_pseudo_legal_moves(game_state: &GameState, color: Color) -> Vec<ChessMove> {
    let mut pseudo = Vec::<ChessMove>::with_capacity(64);

    generate_pawn_moves(game_state, color, &mut pseudo);
    generate_knight_moves(game_state, color, &mut pseudo);
    generate_slider_moves(game_state, color, &mut pseudo);
    generate_king_moves(game_state, color, &mut pseudo);

    pseudo
}

/// Filters pseudo-legal moves by make/undo on `game_state`, which is left as
/// it was found.
pub fn legal_moves_in_place(
    game_state: &mut GameState,
    color: Color,
) -> MoveGenResult<Vec<ChessMove>> {
    if king_square(game_state, color).is_none() {
        return Ok(Vec::new());
    }

    let pseudo = generate_pseudo_legal_moves(game_state, color);
    let mut legal = Vec::with_capacity(pseudo.len());
    for mv in pseudo {
        if leaves_king_safe(game_state, mv)? {
            legal.push(mv);
        }
    }

    Ok(legal)
}

/// Legal moves for `color` without touching the caller's position.
///
/// A position too broken to apply moves on yields no moves.
pub fn legal_moves(game_state: &GameState, color: Color) -> Vec<ChessMove> {
    let mut scratch = game_state.clone();
    match legal_moves_in_place(&mut scratch, color) {
        Ok(moves) => moves,
        Err(err) => {
            warn!(%err, fen = %game_state.get_fen(), "legal move generation failed");
            Vec::new()
        }
    }
}

/// Whether `mv` is a legal move for its color. The move is matched against
/// the generated candidates by squares and promotion, so caller-built moves
/// with missing flags are judged by the canonical candidate.
pub fn is_legal(game_state: &GameState, mv: &ChessMove) -> bool {
    if king_square(game_state, mv.color).is_none() {
        return false;
    }

    let Some(candidate) = generate_pseudo_legal_moves(game_state, mv.color)
        .into_iter()
        .find(|candidate| candidate.same_action(mv))
    else {
        return false;
    };

    let mut scratch = game_state.clone();
    leaves_king_safe(&mut scratch, candidate).unwrap_or(false)
}

/// No legal moves and either in check or without a king.
pub fn is_checkmate(game_state: &GameState, color: Color) -> bool {
    let exposed = king_square(game_state, color).is_none() || is_king_in_check(game_state, color);
    exposed && legal_moves(game_state, color).is_empty()
}

pub fn is_stalemate(game_state: &GameState, color: Color) -> bool {
    king_square(game_state, color).is_some()
        && !is_king_in_check(game_state, color)
        && legal_moves(game_state, color).is_empty()
}

fn leaves_king_safe(game_state: &mut GameState, mv: ChessMove) -> MoveGenResult<bool> {
    let undo = apply_move(game_state, mv)?;
    let safe = king_square(game_state, mv.color).is_some() && !is_king_in_check(game_state, mv.color);
    undo_move(game_state, undo);
    Ok(safe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_apply::{apply_move, undo_move};

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let g = GameState::new_game();
        assert_eq!(legal_moves(&g, Color::White).len(), 20);
        assert_eq!(legal_moves(&g, Color::Black).len(), 20);
    }

    #[test]
    fn generator_hands_back_the_position_unchanged() {
        let mut g = game("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let before = g.clone();
        let moves = LegalMoveGenerator
            .generate_legal_moves(&mut g, Color::White)
            .expect("generation should succeed");
        assert_eq!(moves.len(), 48);
        assert_eq!(g, before);
    }

    #[test]
    fn king_must_leave_the_checking_file() {
        let g = game("4r3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert!(is_king_in_check(&g, Color::White));
        let moves = legal_moves(&g, Color::White);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|mv| file_of(mv.to) != 4));
    }

    #[test]
    fn every_legal_move_leaves_own_king_safe() {
        let g = game("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let mut working = g.clone();
        for mv in legal_moves(&g, Color::White) {
            let undo = apply_move(&mut working, mv).expect("legal move should apply");
            assert!(!is_king_in_check(&working, Color::White), "{mv} left king in check");
            undo_move(&mut working, undo);
        }
        assert_eq!(working, g);
    }

    #[test]
    fn pinned_knight_cannot_move() {
        let g = game("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        let moves = legal_moves(&g, Color::White);
        assert!(moves.iter().all(|mv| mv.piece != PieceKind::Knight));
    }

    #[test]
    fn castling_into_attack_is_filtered() {
        let g = game("6rk/8/8/8/8/8/8/4K2R w K - 0 1");
        assert!(legal_moves(&g, Color::White).iter().all(|mv| !mv.is_castle()));
    }

    #[test]
    fn is_legal_judges_caller_built_moves() {
        let g = GameState::new_game();
        let push = ChessMove::quiet(Color::White, PieceKind::Pawn, 12, 28);
        assert!(is_legal(&g, &push));
        let leap = ChessMove::quiet(Color::White, PieceKind::Pawn, 12, 36);
        assert!(!is_legal(&g, &leap));
        let onto_own = ChessMove::quiet(Color::White, PieceKind::Bishop, 5, 12);
        assert!(!is_legal(&g, &onto_own));
    }

    #[test]
    fn missing_king_makes_every_move_illegal() {
        let g = game("4k3/8/8/8/8/8/4P3/R7 w - - 0 1");
        assert!(legal_moves(&g, Color::White).is_empty());
        assert!(!is_legal(&g, &ChessMove::quiet(Color::White, PieceKind::Rook, 0, 1)));
        assert!(is_checkmate(&g, Color::White));
        assert!(!is_stalemate(&g, Color::White));
    }

    #[test]
    fn mate_and_stalemate_are_told_apart() {
        let mate = game("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(is_checkmate(&mate, Color::White));
        assert!(!is_stalemate(&mate, Color::White));

        let stale = game("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(is_stalemate(&stale, Color::Black));
        assert!(!is_checkmate(&stale, Color::Black));
    }
}
