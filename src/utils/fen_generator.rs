//! GameState-to-FEN serializer.
//!
//! The castling field is reconstructed from `never_moved` flags: a wing is
//! listed while both its king and corner rook are still unmoved.

use crate::game_state::chess_rules::{KINGSIDE_ROOK_FILE, KING_START_FILE, QUEENSIDE_ROOK_FILE};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::square_name;

pub fn generate_fen(game_state: &GameState) -> String {
    let side_to_move = match game_state.side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };
    let en_passant = game_state
        .en_passant_square
        .map(square_name)
        .unwrap_or_else(|| "-".to_owned());

    format!(
        "{} {} {} {} {} {}",
        generate_board_field(game_state),
        side_to_move,
        generate_castling_field(game_state),
        en_passant,
        game_state.halfmove_clock,
        game_state.fullmove_number
    )
}

fn generate_board_field(game_state: &GameState) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            match game_state.piece_at(square_of(file, rank)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece_to_fen_char(piece));
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(game_state: &GameState) -> String {
    let unmoved = |sq: Square, kind: PieceKind, color: Color| {
        game_state
            .piece_at(sq)
            .is_some_and(|p| p.kind == kind && p.color == color && p.never_moved)
    };

    let mut out = String::new();
    for color in [Color::White, Color::Black] {
        let rank = color.back_rank();
        if !unmoved(square_of(KING_START_FILE, rank), PieceKind::King, color) {
            continue;
        }
        for (rook_file, symbol) in [(KINGSIDE_ROOK_FILE, 'k'), (QUEENSIDE_ROOK_FILE, 'q')] {
            if unmoved(square_of(rook_file, rank), PieceKind::Rook, color) {
                out.push(match color {
                    Color::White => symbol.to_ascii_uppercase(),
                    Color::Black => symbol,
                });
            }
        }
    }

    if out.is_empty() {
        out.push('-');
    }
    out
}

pub(crate) fn piece_to_fen_char(piece: Piece) -> char {
    let base = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };

    match piece.color {
        Color::White => base.to_ascii_uppercase(),
        Color::Black => base,
    }
}
