//! Canonical chess-rule constants.
//!
//! Starting position and the fixed castling geometry shared by move
//! generation, make/undo and notation.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// File the king starts on.
pub const KING_START_FILE: u8 = 4;

pub const KINGSIDE_ROOK_FILE: u8 = 7;
pub const QUEENSIDE_ROOK_FILE: u8 = 0;

/// Files the castling rook lands on.
pub const KINGSIDE_ROOK_TARGET_FILE: u8 = 5;
pub const QUEENSIDE_ROOK_TARGET_FILE: u8 = 3;

/// Returns `(rook_from_file, rook_to_file)` for a king stepping two files
/// from `king_from_file` to `king_to_file`.
#[inline]
pub const fn castling_rook_files(king_from_file: u8, king_to_file: u8) -> (u8, u8) {
    if king_to_file > king_from_file {
        (KINGSIDE_ROOK_FILE, KINGSIDE_ROOK_TARGET_FILE)
    } else {
        (QUEENSIDE_ROOK_FILE, QUEENSIDE_ROOK_TARGET_FILE)
    }
}
