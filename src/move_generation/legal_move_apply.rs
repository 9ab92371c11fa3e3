//! Make/undo on a working position.
//!
//! `apply_move` mutates in place and returns the `UndoState` needed to put
//! everything back; `undo_move` consumes it. Records must be undone in
//! reverse order of application.

use crate::game_state::chess_rules::castling_rook_files;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::chess_move::{ChessMove, PROMOTION_KIND};

pub fn apply_move(game_state: &mut GameState, mv: ChessMove) -> MoveGenResult<UndoState> {
    if mv.from > 63 || mv.to > 63 {
        return Err(MoveGenerationError::InvalidState(format!(
            "move {} -> {} leaves the board",
            mv.from, mv.to
        )));
    }

    let color = mv.color;
    let moved_piece = game_state
        .piece_at(mv.from)
        .filter(|piece| piece.color == color && piece.kind == mv.piece)
        .ok_or_else(|| {
            MoveGenerationError::InvalidState(format!(
                "no {:?} {:?} on from-square {}",
                color, mv.piece, mv.from
            ))
        })?;

    // Work out every square involved before touching the board so a bad
    // move leaves the position untouched.
    let capture_square = if mv.is_en_passant() {
        let sq = square_of(file_of(mv.to), rank_of(mv.from));
        match game_state.piece_at(sq) {
            Some(piece) if piece.kind == PieceKind::Pawn && piece.color != color => Some(sq),
            _ => {
                return Err(MoveGenerationError::InvalidState(format!(
                    "no pawn to capture en passant on {sq}"
                )))
            }
        }
    } else {
        match game_state.piece_at(mv.to) {
            Some(piece) if piece.color == color => {
                return Err(MoveGenerationError::InvalidState(format!(
                    "destination {} holds a friendly piece",
                    mv.to
                )))
            }
            Some(_) => Some(mv.to),
            None => None,
        }
    };

    let is_castle = moved_piece.kind == PieceKind::King && file_of(mv.from).abs_diff(file_of(mv.to)) == 2;
    let rook_squares = if is_castle {
        let (rook_from_file, rook_to_file) = castling_rook_files(file_of(mv.from), file_of(mv.to));
        let rank = rank_of(mv.from);
        let rook_from = square_of(rook_from_file, rank);
        match game_state.piece_at(rook_from) {
            Some(rook) if rook.kind == PieceKind::Rook && rook.color == color => {
                Some((rook_from, square_of(rook_to_file, rank)))
            }
            _ => {
                return Err(MoveGenerationError::InvalidState(format!(
                    "no rook to castle with on {rook_from}"
                )))
            }
        }
    } else {
        None
    };

    let mut undo = UndoState {
        mv,
        moved_piece,
        captured: None,
        castling_rook: None,
        prev_side_to_move: game_state.side_to_move,
        prev_en_passant_square: game_state.en_passant_square,
        prev_halfmove_clock: game_state.halfmove_clock,
        prev_fullmove_number: game_state.fullmove_number,
        prev_game_over: game_state.game_over,
    };

    if let Some(sq) = capture_square {
        undo.captured = game_state.remove_piece(sq).map(|piece| (sq, piece));
    }

    game_state.remove_piece(mv.from);
    let promotes = moved_piece.kind == PieceKind::Pawn && rank_of(mv.to) == color.promotion_rank();
    let landed = if promotes {
        Piece::moved(PROMOTION_KIND, color)
    } else {
        Piece {
            never_moved: false,
            ..moved_piece
        }
    };
    game_state.put_piece(mv.to, landed);

    if let Some((rook_from, rook_to)) = rook_squares {
        if let Some(rook) = game_state.remove_piece(rook_from) {
            undo.castling_rook = Some((rook_from, rook));
            game_state.put_piece(
                rook_to,
                Piece {
                    never_moved: false,
                    ..rook
                },
            );
        }
    }

    game_state.en_passant_square =
        if moved_piece.kind == PieceKind::Pawn && rank_of(mv.from).abs_diff(rank_of(mv.to)) == 2 {
            Some(square_of(file_of(mv.from), (rank_of(mv.from) + rank_of(mv.to)) / 2))
        } else {
            None
        };

    if moved_piece.kind == PieceKind::Pawn || undo.captured.is_some() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if color == Color::Black {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }
    game_state.side_to_move = color.opposite();

    Ok(undo)
}

pub fn undo_move(game_state: &mut GameState, undo: UndoState) {
    let mv = undo.mv;

    game_state.remove_piece(mv.to);
    game_state.put_piece(mv.from, undo.moved_piece);

    if let Some((rook_from, rook)) = undo.castling_rook {
        let (_, rook_to_file) = castling_rook_files(file_of(mv.from), file_of(mv.to));
        game_state.remove_piece(square_of(rook_to_file, rank_of(rook_from)));
        game_state.put_piece(rook_from, rook);
    }

    if let Some((sq, piece)) = undo.captured {
        game_state.put_piece(sq, piece);
    }

    game_state.side_to_move = undo.prev_side_to_move;
    game_state.en_passant_square = undo.prev_en_passant_square;
    game_state.halfmove_clock = undo.prev_halfmove_clock;
    game_state.fullmove_number = undo.prev_fullmove_number;
    game_state.game_over = undo.prev_game_over;
}

#[cfg(test)]
mod tests {
    use super::{apply_move, undo_move};
    use crate::game_state::{chess_types::*, game_state::GameState};
    use crate::moves::chess_move::{ChessMove, FLAG_CASTLING, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT};

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    fn round_trip(fen: &str, mv: ChessMove) -> GameState {
        let mut working = game(fen);
        let before = working.clone();
        let undo = apply_move(&mut working, mv).expect("move should apply");
        let after = working.clone();
        undo_move(&mut working, undo);
        assert_eq!(working, before, "undo should restore {fen}");
        assert!(after.validate().is_ok());
        after
    }

    #[test]
    fn double_push_sets_and_next_move_clears_en_passant_target() {
        let mv = ChessMove::quiet(Color::White, PieceKind::Pawn, 12, 28).with_flags(FLAG_DOUBLE_PAWN_PUSH);
        let mut after = round_trip("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", mv);
        assert_eq!(after.en_passant_square, Some(20));
        assert_eq!(after.side_to_move, Color::Black);

        let reply = ChessMove::quiet(Color::Black, PieceKind::King, 60, 59);
        apply_move(&mut after, reply).expect("reply should apply");
        assert_eq!(after.en_passant_square, None);
    }

    #[test]
    fn capture_removes_victim_and_restores_it() {
        let mv = ChessMove::capture(Color::White, PieceKind::Rook, 0, 56, PieceKind::Rook);
        let after = round_trip("r3k3/8/8/8/8/8/8/R3K3 w Qq - 0 1", mv);
        assert_eq!(after.piece_count(Color::Black, PieceKind::Rook), 0);
        assert_eq!(after.halfmove_clock, 0);
    }

    #[test]
    fn kingside_castle_relocates_rook_and_clears_flags() {
        let mv = ChessMove::quiet(Color::White, PieceKind::King, 4, 6).with_flags(FLAG_CASTLING);
        let after = round_trip("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", mv);
        assert_eq!(after.piece_at(5), Some(Piece::moved(PieceKind::Rook, Color::White)));
        assert_eq!(after.piece_at(6), Some(Piece::moved(PieceKind::King, Color::White)));
        assert_eq!(after.piece_at(7), None);
    }

    #[test]
    fn queenside_castle_relocates_rook() {
        let mv = ChessMove::quiet(Color::Black, PieceKind::King, 60, 58).with_flags(FLAG_CASTLING);
        let after = round_trip("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", mv);
        assert_eq!(after.piece_at(59).map(|p| p.kind), Some(PieceKind::Rook));
        assert_eq!(after.piece_at(56), None);
        assert_eq!(after.fullmove_number, 2);
    }

    #[test]
    fn en_passant_removes_pawn_behind_destination() {
        let mv = ChessMove::capture(Color::White, PieceKind::Pawn, 36, 43, PieceKind::Pawn)
            .with_flags(FLAG_EN_PASSANT);
        let after = round_trip("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", mv);
        assert_eq!(after.piece_at(35), None);
        assert_eq!(after.piece_at(43).map(|p| p.kind), Some(PieceKind::Pawn));
    }

    #[test]
    fn promotion_replaces_pawn_and_undo_restores_it() {
        let mv = ChessMove::capture(Color::White, PieceKind::Pawn, 48, 57, PieceKind::Knight).promoting();
        let after = round_trip("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1", mv);
        assert_eq!(after.piece_at(57), Some(Piece::moved(PieceKind::Queen, Color::White)));
        assert_eq!(after.piece_count(Color::White, PieceKind::Pawn), 0);
    }

    #[test]
    fn bad_move_is_rejected_without_mutation() {
        let mut working = GameState::new_game();
        let before = working.clone();
        let ghost = ChessMove::quiet(Color::White, PieceKind::Knight, 27, 44);
        assert!(apply_move(&mut working, ghost).is_err());
        let onto_own = ChessMove::quiet(Color::White, PieceKind::Rook, 0, 8);
        assert!(apply_move(&mut working, onto_own).is_err());
        assert_eq!(working, before);
    }

    #[test]
    fn off_board_squares_are_rejected() {
        let mut working = GameState::new_game();
        let before = working.clone();
        let off_board = ChessMove::quiet(Color::White, PieceKind::Pawn, 12, 64);
        assert!(apply_move(&mut working, off_board).is_err());
        let from_nowhere = ChessMove::quiet(Color::White, PieceKind::Pawn, 200, 20);
        assert!(apply_move(&mut working, from_nowhere).is_err());
        assert_eq!(working, before);
    }
}
