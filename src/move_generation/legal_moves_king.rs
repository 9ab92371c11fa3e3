use crate::game_state::chess_rules::{KINGSIDE_ROOK_FILE, KING_START_FILE, QUEENSIDE_ROOK_FILE};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::{push_moves_to_targets, squares_of};
use crate::moves::attack_tables::king_attacks;
use crate::moves::chess_move::{ChessMove, FLAG_CASTLING};

pub fn generate_king_moves(game_state: &GameState, color: Color, out: &mut Vec<ChessMove>) {
    let own_occ = game_state.occupancy_by_color[color.index()];

    for from in squares_of(game_state, color, PieceKind::King) {
        let targets = king_attacks(from) & !own_occ;
        push_moves_to_targets(game_state, color, PieceKind::King, from, targets, out);
        generate_castling_moves(game_state, color, from, out);
    }
}

/// Offers castling when king and rook are unmoved, the squares between them
/// are empty, and neither the king's square nor the square it crosses is
/// attacked. The landing square is left to the legality filter.
fn generate_castling_moves(
    game_state: &GameState,
    color: Color,
    king_from: Square,
    out: &mut Vec<ChessMove>,
) {
    let rank = color.back_rank();
    if king_from != square_of(KING_START_FILE, rank)
        || !game_state.piece_at(king_from).is_some_and(|king| king.never_moved)
    {
        return;
    }

    let enemy = color.opposite();
    let mut king_square_checked = false;

    for rook_file in [KINGSIDE_ROOK_FILE, QUEENSIDE_ROOK_FILE] {
        let rook_square = square_of(rook_file, rank);
        let rook_ready = game_state.piece_at(rook_square).is_some_and(|rook| {
            rook.kind == PieceKind::Rook && rook.color == color && rook.never_moved
        });
        if !rook_ready {
            continue;
        }

        let (low, high) = if rook_file > KING_START_FILE {
            (KING_START_FILE + 1, rook_file)
        } else {
            (rook_file + 1, KING_START_FILE)
        };
        let path_clear = (low..high).all(|file| game_state.piece_at(square_of(file, rank)).is_none());
        if !path_clear {
            continue;
        }

        if !king_square_checked {
            if is_square_attacked(game_state, king_from, enemy) {
                return;
            }
            king_square_checked = true;
        }

        let (transit_file, landing_file) = if rook_file > KING_START_FILE {
            (KING_START_FILE + 1, KING_START_FILE + 2)
        } else {
            (KING_START_FILE - 1, KING_START_FILE - 2)
        };
        if is_square_attacked(game_state, square_of(transit_file, rank), enemy) {
            continue;
        }

        out.push(
            ChessMove::quiet(color, PieceKind::King, king_from, square_of(landing_file, rank))
                .with_flags(FLAG_CASTLING),
        );
    }
}
