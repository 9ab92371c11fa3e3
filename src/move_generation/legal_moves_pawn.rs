use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{enemy_piece_on, squares_of};
use crate::moves::attack_tables::pawn_attacks;
use crate::moves::chess_move::{ChessMove, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT};

pub fn generate_pawn_moves(game_state: &GameState, color: Color, out: &mut Vec<ChessMove>) {
    let forward: i8 = match color {
        Color::White => 8,
        Color::Black => -8,
    };
    let empty = !game_state.occupancy_all;

    for from in squares_of(game_state, color, PieceKind::Pawn) {
        // Validated positions never hold a pawn on its promotion rank, but a
        // hand-built one might; it simply has nowhere to go.
        if rank_of(from) == color.promotion_rank() {
            continue;
        }
        let one_step = (from as i8 + forward) as Square;

        if (1u64 << one_step) & empty != 0 {
            push_pawn_move(color, ChessMove::quiet(color, PieceKind::Pawn, from, one_step), out);

            if rank_of(from) == color.pawn_home_rank() {
                let two_step = (one_step as i8 + forward) as Square;
                if (1u64 << two_step) & empty != 0 {
                    out.push(
                        ChessMove::quiet(color, PieceKind::Pawn, from, two_step)
                            .with_flags(FLAG_DOUBLE_PAWN_PUSH),
                    );
                }
            }
        }

        let mut targets = pawn_attacks(color, from);
        while targets != 0 {
            let to = targets.trailing_zeros() as Square;
            targets &= targets - 1;

            if let Some(victim) = enemy_piece_on(game_state, color, to) {
                push_pawn_move(
                    color,
                    ChessMove::capture(color, PieceKind::Pawn, from, to, victim),
                    out,
                );
            } else if is_en_passant_target(game_state, color, from, to) {
                out.push(
                    ChessMove::capture(color, PieceKind::Pawn, from, to, PieceKind::Pawn)
                        .with_flags(FLAG_EN_PASSANT),
                );
            }
        }
    }
}

/// The target belongs to the side to move and is only live when the pawn
/// that skipped over it sits beside the capturer.
fn is_en_passant_target(game_state: &GameState, color: Color, from: Square, to: Square) -> bool {
    if game_state.side_to_move != color || game_state.en_passant_square != Some(to) {
        return false;
    }
    let victim_square = square_of(file_of(to), rank_of(from));
    game_state.piece_at(victim_square).is_some_and(|piece| {
        piece.kind == PieceKind::Pawn && piece.color != color
    })
}

#[inline]
fn push_pawn_move(color: Color, mv: ChessMove, out: &mut Vec<ChessMove>) {
    if rank_of(mv.to) == color.promotion_rank() {
        out.push(mv.promoting());
    } else {
        out.push(mv);
    }
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::{chess_types::*, game_state::GameState};

    fn pawn_moves(fen: &str, color: Color) -> Vec<crate::moves::chess_move::ChessMove> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_pawn_moves(&game, color, &mut out);
        out
    }

    #[test]
    fn start_rank_pawns_push_one_or_two() {
        let moves = pawn_moves("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", Color::White);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().any(|mv| mv.is_double_pawn_push()));
    }

    #[test]
    fn blocked_intermediate_square_stops_double_push() {
        let moves = pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", Color::White);
        assert!(moves.is_empty());
    }

    #[test]
    fn black_pawn_captures_diagonally_downwards() {
        let moves = pawn_moves("4k3/8/3p4/2N1N3/8/8/8/4K3 b - - 0 1", Color::Black);
        let captures: Vec<_> = moves.iter().filter(|mv| mv.is_capture()).collect();
        assert_eq!(captures.len(), 2);
        assert_eq!(moves.len(), 3);
    }

    #[test]
    fn reaching_last_rank_promotes_to_queen_only() {
        let moves = pawn_moves("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1", Color::White);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|mv| mv.promotion == Some(PieceKind::Queen)));
    }

    #[test]
    fn en_passant_requires_adjacent_enemy_pawn_and_side_to_move() {
        let moves = pawn_moves("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", Color::White);
        assert!(moves.iter().any(|mv| mv.is_en_passant() && mv.to == 43));

        // Same geometry, but it is Black's ply: the target is stale for White.
        let stale = pawn_moves("4k3/8/8/3pP3/8/8/8/4K3 b - d6 0 1", Color::White);
        assert!(!stale.iter().any(|mv| mv.is_en_passant()));
    }
}
