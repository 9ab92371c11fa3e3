//! Leaf counting over the legal move tree, with a breakdown of the move
//! kinds reaching the last ply.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
}

pub fn perft<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    let mut working = game_state.clone();
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return Ok(counts);
    }
    perft_recurse(generator, &mut working, depth, &mut counts)?;
    Ok(counts)
}

/// Leaf count per root move, in generation order. Useful for diffing against
/// another generator when a total disagrees.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<Vec<(String, usize)>> {
    let mut working = game_state.clone();
    let side = working.side_to_move;
    let mut out = Vec::new();
    if depth == 0 {
        return Ok(out);
    }

    for mv in generator.generate_legal_moves(&mut working, side)? {
        let undo = apply_move(&mut working, mv)?;
        let mut counts = PerftCounts::default();
        if depth == 1 {
            counts.nodes = 1;
        } else {
            perft_recurse(generator, &mut working, depth - 1, &mut counts)?;
        }
        undo_move(&mut working, undo);
        out.push((mv.to_string(), counts.nodes));
    }

    Ok(out)
}

fn perft_recurse<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    let side = game_state.side_to_move;
    let moves = generator.generate_legal_moves(game_state, side)?;

    if depth == 1 {
        for mv in moves {
            counts.nodes += 1;
            if mv.is_capture() {
                counts.captures += 1;
            }
            if mv.is_en_passant() {
                counts.en_passant += 1;
            }
            if mv.is_castle() {
                counts.castles += 1;
            }
            if mv.is_promotion() {
                counts.promotions += 1;
            }

            let undo = apply_move(game_state, mv)?;
            if is_king_in_check(game_state, side.opposite()) {
                counts.checks += 1;
            }
            undo_move(game_state, undo);
        }
        return Ok(());
    }

    for mv in moves {
        let undo = apply_move(game_state, mv)?;
        perft_recurse(generator, game_state, depth - 1, counts)?;
        undo_move(game_state, undo);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{perft, perft_divide};
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

    fn nodes(fen: &str, depth: u8) -> usize {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        perft(&LegalMoveGenerator, &game, depth)
            .expect("perft should run")
            .nodes
    }

    #[test]
    fn start_position_counts() {
        let game = GameState::new_game();
        let counts = [1, 2, 3].map(|depth| {
            perft(&LegalMoveGenerator, &game, depth)
                .expect("perft should run")
                .nodes
        });
        assert_eq!(counts, [20, 400, 8902]);
    }

    #[test]
    fn start_position_depth_three_breakdown() {
        let counts = perft(&LegalMoveGenerator, &GameState::new_game(), 3).expect("perft should run");
        assert_eq!(counts.captures, 34);
        assert_eq!(counts.checks, 12);
        assert_eq!(counts.castles, 0);
    }

    #[test]
    fn kiwipete_counts() {
        assert_eq!(nodes(KIWIPETE, 1), 48);
        assert_eq!(nodes(KIWIPETE, 2), 2039);
    }

    #[test]
    fn kiwipete_depth_one_has_both_castles() {
        let game = GameState::from_fen(KIWIPETE).expect("FEN should parse");
        let counts = perft(&LegalMoveGenerator, &game, 1).expect("perft should run");
        assert_eq!(counts.castles, 2);
        assert_eq!(counts.captures, 8);
    }

    #[test]
    fn rook_endgame_counts() {
        assert_eq!(nodes(ENDGAME, 1), 14);
        assert_eq!(nodes(ENDGAME, 2), 191);
        assert_eq!(nodes(ENDGAME, 3), 2812);
    }

    #[test]
    fn divide_sums_to_total() {
        let game = GameState::new_game();
        let divide = perft_divide(&LegalMoveGenerator, &game, 2).expect("divide should run");
        assert_eq!(divide.len(), 20);
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<usize>(), 400);
    }
}
