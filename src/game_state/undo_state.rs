use crate::game_state::chess_types::*;
use crate::moves::chess_move::ChessMove;

/// Single undo record for `apply_move` / `undo_move`.
///
/// Records are produced and consumed strictly LIFO; undoing out of order is
/// not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub mv: ChessMove,
    /// The mover exactly as it stood on `mv.from` (the pawn, for promotions).
    pub moved_piece: Piece,
    /// Captured piece and the square it was removed from.
    pub captured: Option<(Square, Piece)>,
    /// Castling rook as it stood before the castle, with its origin square.
    pub castling_rook: Option<(Square, Piece)>,

    pub prev_side_to_move: Color,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,
    pub prev_game_over: bool,
}
