//! Core position representation.
//!
//! `GameState` keeps a square-indexed mailbox of live pieces (which carries
//! the per-piece `never_moved` flags) alongside per color/kind bitboards and
//! occupancy caches used by the attack tables. All mutation goes through
//! `put_piece` / `remove_piece` so the two views never drift apart.

use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // --- Mailbox ---
    pub board: [Option<Piece>; 64],

    // --- Bitboard caches, [color][piece_kind] ---
    pub pieces: [[u64; 6]; 2],
    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub en_passant_square: Option<Square>,
    pub game_over: bool,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: [None; 64],

            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::White,
            en_passant_square: None,
            game_over: false,

            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, String> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square as usize]
    }

    /// Places `piece` on an empty `square`, keeping every cache in sync.
    #[inline]
    pub fn put_piece(&mut self, square: Square, piece: Piece) {
        let mask = 1u64 << square;
        self.board[square as usize] = Some(piece);
        self.pieces[piece.color.index()][piece.kind.index()] |= mask;
        self.occupancy_by_color[piece.color.index()] |= mask;
        self.occupancy_all |= mask;
    }

    /// Lifts whatever stands on `square`, keeping every cache in sync.
    #[inline]
    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        let piece = self.board[square as usize].take()?;
        let mask = !(1u64 << square);
        self.pieces[piece.color.index()][piece.kind.index()] &= mask;
        self.occupancy_by_color[piece.color.index()] &= mask;
        self.occupancy_all &= mask;
        Some(piece)
    }

    /// Iterates `(square, piece)` over every live piece, a1 first.
    pub fn occupied_squares(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.board
            .iter()
            .enumerate()
            .filter_map(|(sq, piece)| piece.map(|p| (sq as Square, p)))
    }

    #[inline]
    pub fn piece_count(&self, color: Color, kind: PieceKind) -> u32 {
        self.pieces[color.index()][kind.index()].count_ones()
    }

    /// Structural sanity check run before the engine trusts a position.
    ///
    /// A missing king is tolerated (it is a terminal condition, not a
    /// malformed board); two kings of one color are not, and neither is a
    /// king left in check by the side that just moved.
    pub fn validate(&self) -> Result<(), String> {
        let mut rebuilt = Self::new_empty();
        for (sq, piece) in self.occupied_squares() {
            rebuilt.put_piece(sq, piece);
        }
        if rebuilt.pieces != self.pieces
            || rebuilt.occupancy_by_color != self.occupancy_by_color
            || rebuilt.occupancy_all != self.occupancy_all
        {
            return Err("bitboard caches disagree with the mailbox".to_owned());
        }

        for color in [Color::White, Color::Black] {
            if self.piece_count(color, PieceKind::King) > 1 {
                return Err(format!("{color:?} has more than one king"));
            }
        }

        let waiting = self.side_to_move.opposite();
        if is_king_in_check(self, waiting) {
            return Err(format!("{waiting:?} king is in check with {:?} to move", self.side_to_move));
        }

        let back_ranks = 0x0000_0000_0000_00FFu64 | 0xFF00_0000_0000_0000u64;
        let pawns = self.pieces[Color::White.index()][PieceKind::Pawn.index()]
            | self.pieces[Color::Black.index()][PieceKind::Pawn.index()];
        if pawns & back_ranks != 0 {
            return Err("pawn on a back rank".to_owned());
        }

        if let Some(ep) = self.en_passant_square {
            let expected_rank = match self.side_to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            if ep > 63 || rank_of(ep) != expected_rank || self.piece_at(ep).is_some() {
                return Err(format!("impossible en-passant square {ep}"));
            }
        }

        Ok(())
    }

    /// Color-mirrored copy: ranks flipped, colors swapped, side to move swapped.
    pub fn mirrored(&self) -> Self {
        let mut out = Self::new_empty();
        for (sq, piece) in self.occupied_squares() {
            let flipped = square_of(file_of(sq), 7 - rank_of(sq));
            out.put_piece(
                flipped,
                Piece {
                    color: piece.color.opposite(),
                    ..piece
                },
            );
        }
        out.side_to_move = self.side_to_move.opposite();
        out.en_passant_square = self
            .en_passant_square
            .map(|ep| square_of(file_of(ep), 7 - rank_of(ep)));
        out.game_over = self.game_over;
        out.halfmove_clock = self.halfmove_clock;
        out.fullmove_number = self.fullmove_number;
        out
    }
}
