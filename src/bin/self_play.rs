//! Engine-vs-engine self-play for manual inspection.
//!
//! Run with:
//! `cargo run --release --bin self_play`
//! `RUST_LOG=plum_tactics=debug cargo run --release --bin self_play -- --white 3 --black 2 --seed 7`

use plum_tactics::engines::engine_minimax::{EngineConfig, MinimaxEngine};
use plum_tactics::engines::engine_trait::GameStateView;
use plum_tactics::game::ai_player::AiPlayer;
use plum_tactics::game::chess_game::ChessGame;
use plum_tactics::game_state::chess_types::Color;
use plum_tactics::utils::render_game_state::render_game_state;
use tracing_subscriber::EnvFilter;

struct Args {
    white: u8,
    black: u8,
    max_plies: usize,
    seed: u64,
    budget_ms: u64,
    quiet: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            white: 2,
            black: 2,
            max_plies: 120,
            seed: 1234,
            budget_ms: 2_000,
            quiet: false,
        }
    }
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);

    while let Some(flag) = it.next() {
        if flag == "--quiet" || flag == "-q" {
            args.quiet = true;
            continue;
        }
        let value = it
            .next()
            .ok_or_else(|| format!("missing value for {flag}"))?;
        let bad = |_| format!("invalid value '{value}' for {flag}");
        match flag.as_str() {
            "--white" => args.white = value.parse().map_err(bad)?,
            "--black" => args.black = value.parse().map_err(bad)?,
            "--max-plies" => args.max_plies = value.parse().map_err(bad)?,
            "--seed" => args.seed = value.parse().map_err(bad)?,
            "--budget-ms" => args.budget_ms = value.parse().map_err(bad)?,
            _ => return Err(format!("unknown argument {flag}")),
        }
    }

    Ok(args)
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = parse_args()?;
    let config = EngineConfig {
        time_budget_ms: args.budget_ms,
        ..EngineConfig::default()
    };
    let mut white = AiPlayer::new(
        MinimaxEngine::with_seed(args.seed).with_config(config),
        Color::White,
        args.white,
    );
    let mut black = AiPlayer::new(
        MinimaxEngine::with_seed(args.seed.wrapping_add(1)).with_config(config),
        Color::Black,
        args.black,
    );

    let mut game = ChessGame::new();
    while !game.is_game_over() && game.history().len() < args.max_plies {
        let player = match game.side_to_move() {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        let Some(mv) = player.take_turn(&mut game).map_err(|e| e.to_string())? else {
            break;
        };
        if !args.quiet {
            println!("{:>3}. {mv}", game.history().len());
        }
    }

    println!("{}", render_game_state(game.state()));
    println!("fen: {}", game.state().get_fen());
    match game.outcome() {
        Some(outcome) => println!("result: {outcome}"),
        None => println!("result: unfinished after {} plies", game.history().len()),
    }
    Ok(())
}
