//! Move value produced by generation and consumed by make/undo and search.

use std::fmt;

use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::utils::algebraic::square_name;

pub const FLAG_CAPTURE: u8 = 1 << 0;
pub const FLAG_DOUBLE_PAWN_PUSH: u8 = 1 << 1;
pub const FLAG_EN_PASSANT: u8 = 1 << 2;
pub const FLAG_CASTLING: u8 = 1 << 3;
pub const FLAG_PROMOTION: u8 = 1 << 4;

/// Only queen promotions are modelled.
pub const PROMOTION_KIND: PieceKind = PieceKind::Queen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub color: Color,
    pub piece: PieceKind,
    pub from: Square,
    pub to: Square,
    pub captured: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
    pub flags: u8,
}

impl ChessMove {
    #[inline]
    pub fn quiet(color: Color, piece: PieceKind, from: Square, to: Square) -> Self {
        Self {
            color,
            piece,
            from,
            to,
            captured: None,
            promotion: None,
            flags: 0,
        }
    }

    #[inline]
    pub fn capture(
        color: Color,
        piece: PieceKind,
        from: Square,
        to: Square,
        captured: PieceKind,
    ) -> Self {
        Self {
            captured: Some(captured),
            flags: FLAG_CAPTURE,
            ..Self::quiet(color, piece, from, to)
        }
    }

    #[inline]
    pub fn with_flags(mut self, flags: u8) -> Self {
        self.flags |= flags;
        self
    }

    #[inline]
    pub fn promoting(mut self) -> Self {
        self.promotion = Some(PROMOTION_KIND);
        self.flags |= FLAG_PROMOTION;
        self
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.flags & FLAG_CAPTURE != 0
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.flags & FLAG_EN_PASSANT != 0
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.flags & FLAG_CASTLING != 0
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.flags & FLAG_PROMOTION != 0
    }

    #[inline]
    pub fn is_double_pawn_push(&self) -> bool {
        self.flags & FLAG_DOUBLE_PAWN_PUSH != 0
    }

    /// Same squares and promotion; used to match caller-built moves against
    /// generated candidates.
    #[inline]
    pub fn same_action(&self, other: &ChessMove) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }
}

impl fmt::Display for ChessMove {
    /// Long algebraic form, e.g. `e2e4` or `a7a8q`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", square_name(self.from), square_name(self.to))?;
        if self.promotion.is_some() {
            write!(f, "q")?;
        }
        Ok(())
    }
}
