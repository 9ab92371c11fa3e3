//! Fixed-depth minimax with alpha-beta pruning.
//!
//! The side to move at the root is the maximizing side and every score is
//! taken from its point of view. The search works on a private clone with
//! make/undo, keeps one undo record per recursion level, and watches a
//! wall clock: the root loop stops taking new moves after the root cutoff,
//! and nodes entered after the full budget return their static evaluation.

use tracing::{debug, trace};

use crate::engines::time_management::{SearchClock, DEFAULT_ROOT_CUTOFF_PERCENT, DEFAULT_TIME_BUDGET_MS};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_checks::{is_king_in_check, king_square};
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerator};
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::{BoardScorer, CHECKMATE_SCORE};
use crate::search::move_ordering::order_moves;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: u8,
    /// `None` searches to full depth regardless of time.
    pub budget_ms: Option<u64>,
    pub root_cutoff_percent: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            budget_ms: Some(DEFAULT_TIME_BUDGET_MS),
            root_cutoff_percent: DEFAULT_ROOT_CUTOFF_PERCENT,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    pub best_move: Option<ChessMove>,
    pub best_score: i32,
    pub nodes: u64,
    pub root_moves_completed: usize,
    pub root_moves_total: usize,
    pub timed_out: bool,
    pub elapsed_ms: u64,
}

struct SearchContext<'a, G: MoveGenerator, S: BoardScorer> {
    generator: &'a G,
    scorer: &'a S,
    perspective: Color,
    clock: SearchClock,
    nodes: u64,
    timed_out: bool,
}

pub fn alpha_beta_search<G: MoveGenerator, S: BoardScorer>(
    game_state: &GameState,
    generator: &G,
    scorer: &S,
    config: SearchConfig,
) -> MoveGenResult<SearchResult> {
    let clock = match config.budget_ms {
        Some(budget_ms) => SearchClock::start(budget_ms, config.root_cutoff_percent),
        None => SearchClock::unlimited(),
    };
    let perspective = game_state.side_to_move;
    let mut working = game_state.clone();
    let mut ctx = SearchContext {
        generator,
        scorer,
        perspective,
        clock,
        nodes: 0,
        timed_out: false,
    };

    let mut root_moves = generator.generate_legal_moves(&mut working, perspective)?;
    let mut result = SearchResult {
        root_moves_total: root_moves.len(),
        ..SearchResult::default()
    };

    debug!(
        side = ?perspective,
        depth = config.max_depth,
        budget_ms = ?config.budget_ms,
        root_moves = root_moves.len(),
        "alpha-beta search started"
    );

    if root_moves.is_empty() || config.max_depth == 0 {
        result.best_score = scorer.score(&working, perspective);
        result.nodes = 1;
        return Ok(result);
    }

    order_moves(&mut root_moves);

    let mut best_score = i32::MIN;
    let mut alpha = i32::MIN;
    let beta = i32::MAX;

    for mv in root_moves {
        let undo = apply_move(&mut working, mv)?;
        let score = ctx.minimax(&mut working, config.max_depth - 1, alpha, beta, false);
        undo_move(&mut working, undo);
        let score = score?;

        trace!(mv = %mv, score, nodes = ctx.nodes, "root move searched");
        result.root_moves_completed += 1;

        if score > best_score {
            best_score = score;
            result.best_move = Some(mv);
        }
        alpha = alpha.max(best_score);

        if ctx.clock.root_expired() {
            ctx.timed_out = true;
            break;
        }
    }

    result.best_score = best_score;
    result.nodes = ctx.nodes;
    result.timed_out = ctx.timed_out;
    result.elapsed_ms = ctx.clock.elapsed().as_millis() as u64;

    debug!(
        best_move = ?result.best_move.map(|mv| mv.to_string()),
        score = result.best_score,
        nodes = result.nodes,
        completed = result.root_moves_completed,
        timed_out = result.timed_out,
        elapsed_ms = result.elapsed_ms,
        "alpha-beta search finished"
    );

    Ok(result)
}

impl<G: MoveGenerator, S: BoardScorer> SearchContext<'_, G, S> {
    fn minimax(
        &mut self,
        game_state: &mut GameState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> MoveGenResult<i32> {
        self.nodes += 1;

        if self.clock.expired() {
            self.timed_out = true;
            return Ok(self.scorer.score(game_state, self.perspective));
        }
        if depth == 0 {
            return Ok(self.scorer.score(game_state, self.perspective));
        }

        let side = game_state.side_to_move;
        let mut moves = self.generator.generate_legal_moves(game_state, side)?;
        if moves.is_empty() {
            let mated = king_square(game_state, side).is_none() || is_king_in_check(game_state, side);
            return Ok(match (mated, maximizing) {
                (false, _) => 0,
                (true, true) => -CHECKMATE_SCORE,
                (true, false) => CHECKMATE_SCORE,
            });
        }

        if depth > 1 {
            order_moves(&mut moves);
        }

        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for mv in moves {
            let undo = apply_move(game_state, mv)?;
            let eval = self.minimax(game_state, depth - 1, alpha, beta, !maximizing);
            undo_move(game_state, undo);
            let eval = eval?;

            if maximizing {
                best = best.max(eval);
                alpha = alpha.max(eval);
            } else {
                best = best.min(eval);
                beta = beta.min(eval);
            }
            if alpha >= beta {
                break;
            }
        }

        Ok(best)
    }
}
