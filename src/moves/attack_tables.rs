//! Attack patterns for every piece kind.
//!
//! Leapers (knight, king) and pawn captures come from tables built at compile
//! time from their offset lists; sliders cast rays against an occupancy
//! bitboard, stopping on (and including) the first occupied square. Slider
//! generation dispatches through `attacks_from`; the attack oracle looks up
//! the per-kind functions directly.

use crate::game_state::chess_types::{Color, PieceKind, Square};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub const DIAGONAL_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ORTHOGONAL_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

pub const KNIGHT_ATTACKS: [u64; 64] = leaper_table(&KNIGHT_OFFSETS);
pub const KING_ATTACKS: [u64; 64] = leaper_table(&KING_OFFSETS);

/// Pawn capture targets, `[color][square]`.
pub const PAWN_ATTACKS: [[u64; 64]; 2] = [
    leaper_table(&[(-1, 1), (1, 1)]),
    leaper_table(&[(-1, -1), (1, -1)]),
];

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square as usize]
}

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square as usize]
}

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    PAWN_ATTACKS[color.index()][square as usize]
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    ray_attacks(square, &DIAGONAL_DIRECTIONS, occupancy)
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    ray_attacks(square, &ORTHOGONAL_DIRECTIONS, occupancy)
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

/// Squares a piece of `kind`/`color` on `square` attacks given `occupancy`.
///
/// For pawns this is the diagonal capture pattern only, whether or not
/// anything stands on the target squares.
pub fn attacks_from(kind: PieceKind, color: Color, square: Square, occupancy: u64) -> u64 {
    match kind {
        PieceKind::Pawn => pawn_attacks(color, square),
        PieceKind::Knight => knight_attacks(square),
        PieceKind::Bishop => bishop_attacks(square, occupancy),
        PieceKind::Rook => rook_attacks(square, occupancy),
        PieceKind::Queen => queen_attacks(square, occupancy),
        PieceKind::King => king_attacks(square),
    }
}

/// Walks each direction from `square` until the board edge or the first
/// occupied square, which is included.
pub fn ray_attacks(square: Square, directions: &[(i32, i32)], occupancy: u64) -> u64 {
    let mut attacks = 0u64;

    for &(file_step, rank_step) in directions {
        let mut file = i32::from(square % 8) + file_step;
        let mut rank = i32::from(square / 8) + rank_step;

        while (0..8).contains(&file) && (0..8).contains(&rank) {
            let bit = 1u64 << (rank * 8 + file);
            attacks |= bit;
            if occupancy & bit != 0 {
                break;
            }
            file += file_step;
            rank += rank_step;
        }
    }

    attacks
}

const fn leaper_table(offsets: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut i = 0usize;

        while i < offsets.len() {
            let f = file + offsets[i].0;
            let r = rank + offsets[i].1;
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                table[sq] |= 1u64 << (r * 8 + f);
            }
            i += 1;
        }

        sq += 1;
    }

    table
}
