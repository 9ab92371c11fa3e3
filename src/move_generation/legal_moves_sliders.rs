//! Bishop, rook and queen moves by ray casting.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{push_moves_to_targets, squares_of};
use crate::moves::attack_tables::attacks_from;
use crate::moves::chess_move::ChessMove;

const SLIDER_KINDS: [PieceKind; 3] = [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen];

pub fn generate_slider_moves(game_state: &GameState, color: Color, out: &mut Vec<ChessMove>) {
    let own_occ = game_state.occupancy_by_color[color.index()];

    for kind in SLIDER_KINDS {
        for from in squares_of(game_state, color, kind) {
            // Rays include the first blocker; dropping our own pieces leaves
            // empty squares plus at most one enemy capture per ray.
            let targets = attacks_from(kind, color, from, game_state.occupancy_all) & !own_occ;
            push_moves_to_targets(game_state, color, kind, from, targets, out);
        }
    }
}
