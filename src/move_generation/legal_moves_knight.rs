use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{push_moves_to_targets, squares_of};
use crate::moves::attack_tables::knight_attacks;
use crate::moves::chess_move::ChessMove;

pub fn generate_knight_moves(game_state: &GameState, color: Color, out: &mut Vec<ChessMove>) {
    let own_occ = game_state.occupancy_by_color[color.index()];

    for from in squares_of(game_state, color, PieceKind::Knight) {
        let targets = knight_attacks(from) & !own_occ;
        push_moves_to_targets(game_state, color, PieceKind::Knight, from, targets, out);
    }
}
