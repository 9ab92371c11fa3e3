//! Move ordering heuristics for alpha-beta.
//!
//! Captures come first, most valuable victim first; quiet moves follow,
//! most central destination first. The sort is stable, so generation order
//! settles ties.

use crate::game_state::chess_types::{file_of, rank_of, Square};
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::piece_value;

/// Sum of the file and rank distances from the nearest edges; 0 in a corner,
/// 6 on the four centre squares.
#[inline]
pub fn centrality(square: Square) -> i32 {
    let file = file_of(square) as i32;
    let rank = rank_of(square) as i32;
    file.min(7 - file) + rank.min(7 - rank)
}

#[inline]
fn ordering_key(mv: &ChessMove) -> (bool, i32) {
    match mv.captured {
        Some(victim) => (false, -piece_value(victim)),
        None => (true, -centrality(mv.to)),
    }
}

pub fn order_moves(moves: &mut [ChessMove]) {
    moves.sort_by_key(ordering_key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{square_of, Color, PieceKind};

    #[test]
    fn captures_lead_by_victim_value() {
        let mut moves = vec![
            ChessMove::quiet(Color::White, PieceKind::Knight, 1, 18),
            ChessMove::capture(Color::White, PieceKind::Queen, 3, 11, PieceKind::Pawn),
            ChessMove::capture(Color::White, PieceKind::Pawn, 12, 19, PieceKind::Rook),
        ];
        order_moves(&mut moves);
        assert_eq!(moves[0].captured, Some(PieceKind::Rook));
        assert_eq!(moves[1].captured, Some(PieceKind::Pawn));
        assert_eq!(moves[2].captured, None);
    }

    #[test]
    fn quiet_moves_prefer_the_centre_and_keep_ties_stable() {
        let edge = ChessMove::quiet(Color::White, PieceKind::Knight, 1, square_of(0, 2));
        let centre_a = ChessMove::quiet(Color::White, PieceKind::Pawn, 12, square_of(4, 3));
        let centre_b = ChessMove::quiet(Color::White, PieceKind::Pawn, 11, square_of(3, 3));
        let mut moves = vec![edge, centre_a, centre_b];
        order_moves(&mut moves);
        assert_eq!(moves, vec![centre_a, centre_b, edge]);
    }

    #[test]
    fn centrality_peaks_in_the_middle() {
        assert_eq!(centrality(square_of(0, 0)), 0);
        assert_eq!(centrality(square_of(3, 4)), 6);
        assert!(centrality(square_of(4, 3)) > centrality(square_of(0, 2)));
    }
}
