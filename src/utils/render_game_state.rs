//! Terminal-oriented Unicode board renderer for debugging and the self-play
//! binary.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Render the board to a Unicode string, White at the bottom.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::from("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        let label = char::from(b'1' + rank);
        out.push(label);

        for file in 0..8u8 {
            out.push(' ');
            out.push(
                game_state
                    .piece_at(square_of(file, rank))
                    .map_or('·', piece_to_unicode),
            );
        }

        out.push(' ');
        out.push(label);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");
    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}
