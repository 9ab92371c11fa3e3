//! Minimax opponent with a difficulty policy.
//!
//! Maps a strength level to a fixed search depth, occasionally plays a random
//! move at the weakest level, and otherwise runs a time-bounded alpha-beta
//! search on a private copy of the position.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::engines::difficulty::Difficulty;
use crate::engines::engine_trait::{Engine, EngineError, EngineOutput, GameStateView, SearchParams};
use crate::engines::time_management::{
    resolve_budget_ms, DEFAULT_ROOT_CUTOFF_PERCENT, DEFAULT_TIME_BUDGET_MS,
};
use crate::game_state::chess_types::Color;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::moves::chess_move::ChessMove;
use crate::search::alpha_beta::{alpha_beta_search, SearchConfig, SearchResult};
use crate::search::board_scoring::PositionalScorer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub time_budget_ms: u64,
    pub root_cutoff_percent: u8,
    /// Lowest difficulty at which the evaluator counts mobility.
    pub mobility_min_difficulty: u8,
    pub mobility_weight: i32,
    /// The weakest level plays a random move once in this many requests;
    /// zero disables it.
    pub random_move_one_in: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: DEFAULT_TIME_BUDGET_MS,
            root_cutoff_percent: DEFAULT_ROOT_CUTOFF_PERCENT,
            mobility_min_difficulty: 3,
            mobility_weight: 5,
            random_move_one_in: 3,
        }
    }
}

enum Decision {
    NoMove,
    Random(ChessMove),
    Searched(SearchResult),
}

pub struct MinimaxEngine {
    config: EngineConfig,
    difficulty: Difficulty,
    rng: StdRng,
    move_generator: LegalMoveGenerator,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_rng(&mut rand::rng()))
    }

    /// Reproducible random branch at the weakest level.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            config: EngineConfig::default(),
            difficulty: Difficulty::default(),
            rng,
            move_generator: LegalMoveGenerator,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, level: u8) {
        self.difficulty = Difficulty::new(level);
    }

    /// Proposes a move for `color` at the given strength (clamped to 1..=4).
    /// `Ok(None)` when the game is over or `color` has no legal move.
    pub fn select_move(
        &mut self,
        game: &dyn GameStateView,
        strength: u8,
        color: Color,
    ) -> Result<Option<ChessMove>, EngineError> {
        let budget_ms = self.config.time_budget_ms;
        let decision = self.decide(game, Difficulty::new(strength), color, budget_ms)?;
        Ok(match decision {
            Decision::NoMove => None,
            Decision::Random(mv) => Some(mv),
            Decision::Searched(result) => result.best_move,
        })
    }

    fn decide(
        &mut self,
        game: &dyn GameStateView,
        difficulty: Difficulty,
        color: Color,
        budget_ms: u64,
    ) -> Result<Decision, EngineError> {
        let position = game.position();
        position.validate().map_err(|msg| {
            warn!(fen = %position.get_fen(), %msg, "refusing to search invalid position");
            EngineError::InvalidPosition(msg)
        })?;

        if game.is_game_over() {
            debug!("game already over, no move proposed");
            return Ok(Decision::NoMove);
        }
        let to_move = game.side_to_move();
        if color != to_move {
            return Err(EngineError::WrongSideToMove {
                requested: color,
                to_move,
            });
        }

        let legal = game.legal_moves(color);
        if legal.is_empty() {
            debug!(side = ?color, "no legal moves, no move proposed");
            return Ok(Decision::NoMove);
        }

        let one_in = self.config.random_move_one_in;
        if difficulty.plays_random_moves() && one_in > 0 && self.rng.random_range(0..one_in) == 0 {
            if let Some(mv) = legal.as_slice().choose(&mut self.rng) {
                debug!(mv = %mv, "weakest level playing a random move");
                return Ok(Decision::Random(*mv));
            }
        }

        let scorer = PositionalScorer {
            include_mobility: difficulty.scores_mobility(self.config.mobility_min_difficulty),
            mobility_weight: self.config.mobility_weight,
        };
        let search_config = SearchConfig {
            max_depth: difficulty.search_depth(),
            budget_ms: Some(budget_ms),
            root_cutoff_percent: self.config.root_cutoff_percent,
        };
        let result = alpha_beta_search(position, &self.move_generator, &scorer, search_config)?;
        Ok(Decision::Searched(result))
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for MinimaxEngine {
    fn new_game(&mut self) {
        self.difficulty = Difficulty::default();
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), EngineError> {
        fn parse<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, EngineError> {
            value.trim().parse::<T>().map_err(|_| EngineError::InvalidOption {
                name: name.to_owned(),
                value: value.to_owned(),
            })
        }

        if name.eq_ignore_ascii_case("TimeBudgetMs") {
            self.config.time_budget_ms = parse(name, value)?;
        } else if name.eq_ignore_ascii_case("RootCutoffPercent") {
            self.config.root_cutoff_percent = parse::<u8>(name, value)?.min(100);
        } else if name.eq_ignore_ascii_case("MobilityMinDifficulty") {
            self.config.mobility_min_difficulty = parse(name, value)?;
        } else if name.eq_ignore_ascii_case("MobilityWeight") {
            self.config.mobility_weight = parse(name, value)?;
        } else if name.eq_ignore_ascii_case("RandomMoveOneIn") {
            self.config.random_move_one_in = parse(name, value)?;
        } else if name.eq_ignore_ascii_case("Difficulty") {
            self.set_difficulty(parse(name, value)?);
        } else {
            return Err(EngineError::InvalidOption {
                name: name.to_owned(),
                value: value.to_owned(),
            });
        }
        Ok(())
    }

    fn choose_move(
        &mut self,
        game: &dyn GameStateView,
        params: &SearchParams,
    ) -> Result<EngineOutput, EngineError> {
        let difficulty = params.difficulty.map(Difficulty::new).unwrap_or(self.difficulty);
        let budget_ms = resolve_budget_ms(self.config.time_budget_ms, params);
        let color = game.side_to_move();

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string minimax_engine difficulty {} depth {} budget_ms {}",
            difficulty.level(),
            difficulty.search_depth(),
            budget_ms
        ));

        match self.decide(game, difficulty, color, budget_ms)? {
            Decision::NoMove => {
                out.info_lines
                    .push("info string minimax_engine no_legal_moves".to_owned());
            }
            Decision::Random(mv) => {
                out.info_lines
                    .push("info string minimax_engine random_move".to_owned());
                out.best_move = Some(mv);
            }
            Decision::Searched(result) => {
                out.info_lines.push(format!(
                    "info depth {} score cp {} nodes {} time {}",
                    difficulty.search_depth(),
                    result.best_score,
                    result.nodes,
                    result.elapsed_ms
                ));
                out.info_lines.push(format!(
                    "info string minimax_engine root_moves {}/{} timed_out {}",
                    result.root_moves_completed, result.root_moves_total, result.timed_out
                ));
                out.best_move = result.best_move;
            }
        }

        Ok(out)
    }
}
