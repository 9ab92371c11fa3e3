//! FEN-to-GameState parser.
//!
//! Besides the board, side to move and clocks, the castling field is turned
//! into `never_moved` flags: a king on its start square keeps the flag when
//! its side has any castling right, and a corner rook keeps it when the right
//! on its wing is present. Pawns on their home rank are also marked unmoved.

use crate::game_state::chess_rules::{KINGSIDE_ROOK_FILE, KING_START_FILE, QUEENSIDE_ROOK_FILE};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

#[derive(Debug, Clone, Copy, Default)]
struct CastlingField {
    white_kingside: bool,
    white_queenside: bool,
    black_kingside: bool,
    black_queenside: bool,
}

impl CastlingField {
    fn wing(&self, color: Color, kingside: bool) -> bool {
        match (color, kingside) {
            (Color::White, true) => self.white_kingside,
            (Color::White, false) => self.white_queenside,
            (Color::Black, true) => self.black_kingside,
            (Color::Black, false) => self.black_queenside,
        }
    }
}

pub fn parse_fen(fen: &str) -> Result<GameState, String> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or("Missing board layout in FEN")?;
    let side_part = parts.next().ok_or("Missing side-to-move in FEN")?;
    let castling_part = parts.next().ok_or("Missing castling rights in FEN")?;
    let en_passant_part = parts.next().ok_or("Missing en-passant square in FEN")?;
    // Clocks are optional; plenty of test positions omit them.
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err("FEN has extra trailing fields".to_owned());
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    let castling = parse_castling_field(castling_part)?;
    apply_castling_field(&mut game_state, castling);
    game_state.en_passant_square = parse_en_passant_square(en_passant_part)?;
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| format!("Invalid halfmove clock: {halfmove_part}"))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| format!("Invalid fullmove number: {fullmove_part}"))?;

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> Result<(), String> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err("Board layout must contain 8 ranks".to_owned());
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(format!("Invalid empty-square count '{ch}'"));
                }
                file = file
                    .checked_add(empty_count as u8)
                    .filter(|&files| files <= 8)
                    .ok_or("Board rank has too many files")?;
                continue;
            }

            let (color, kind) = piece_from_fen_char(ch)
                .ok_or_else(|| format!("Invalid piece character '{ch}' in board layout"))?;

            if file >= 8 {
                return Err("Board rank has too many files".to_owned());
            }

            let sq = square_of(file, board_rank);
            let never_moved = kind == PieceKind::Pawn && board_rank == color.pawn_home_rank();
            game_state.put_piece(
                sq,
                Piece {
                    kind,
                    color,
                    never_moved,
                },
            );
            file += 1;
        }

        if file != 8 {
            return Err("Board rank does not sum to 8 files".to_owned());
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, String> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(format!("Invalid side-to-move field: {side_part}")),
    }
}

fn parse_castling_field(castling_part: &str) -> Result<CastlingField, String> {
    let mut field = CastlingField::default();
    if castling_part == "-" {
        return Ok(field);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => field.white_kingside = true,
            'Q' => field.white_queenside = true,
            'k' => field.black_kingside = true,
            'q' => field.black_queenside = true,
            _ => return Err(format!("Invalid castling rights character: {ch}")),
        }
    }

    Ok(field)
}

fn apply_castling_field(game_state: &mut GameState, field: CastlingField) {
    for color in [Color::White, Color::Black] {
        let rank = color.back_rank();
        let mut any_wing = false;

        for (kingside, rook_file) in [(true, KINGSIDE_ROOK_FILE), (false, QUEENSIDE_ROOK_FILE)] {
            if !field.wing(color, kingside) {
                continue;
            }
            let sq = square_of(rook_file, rank);
            if let Some(piece) = game_state.board[sq as usize].as_mut() {
                if piece.kind == PieceKind::Rook && piece.color == color {
                    piece.never_moved = true;
                    any_wing = true;
                }
            }
        }

        let king_sq = square_of(KING_START_FILE, rank);
        if let Some(piece) = game_state.board[king_sq as usize].as_mut() {
            if piece.kind == PieceKind::King && piece.color == color {
                piece.never_moved = any_wing;
            }
        }
    }
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, String> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    Ok(Some(algebraic_to_square(en_passant_part)?))
}

pub(crate) fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, kind))
}
