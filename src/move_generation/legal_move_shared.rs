use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::chess_move::ChessMove;

/// Emits one move per set bit of `targets`, flagging captures of enemy
/// pieces. Callers have already masked out their own pieces.
pub fn push_moves_to_targets(
    game_state: &GameState,
    color: Color,
    kind: PieceKind,
    from: Square,
    mut targets: u64,
    out: &mut Vec<ChessMove>,
) {
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        let mv = match enemy_piece_on(game_state, color, to) {
            Some(victim) => ChessMove::capture(color, kind, from, to, victim),
            None => ChessMove::quiet(color, kind, from, to),
        };
        out.push(mv);
        targets &= targets - 1;
    }
}

/// Kind of the `color`'s opponent piece on `square`, if any.
#[inline]
pub fn enemy_piece_on(game_state: &GameState, color: Color, square: Square) -> Option<PieceKind> {
    game_state
        .piece_at(square)
        .filter(|piece| piece.color != color)
        .map(|piece| piece.kind)
}

/// Iterates the squares of every `color` piece of `kind`.
#[inline]
pub fn squares_of(game_state: &GameState, color: Color, kind: PieceKind) -> SquareIter {
    SquareIter(game_state.pieces[color.index()][kind.index()])
}

pub struct SquareIter(u64);

impl Iterator for SquareIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let sq = self.0.trailing_zeros() as Square;
        self.0 &= self.0 - 1;
        Some(sq)
    }
}
