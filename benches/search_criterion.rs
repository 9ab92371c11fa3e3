use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use plum_tactics::engines::engine_minimax::{EngineConfig, MinimaxEngine};
use plum_tactics::game_state::game_state::GameState;

const POSITIONS: &[(&str, &str)] = &[
    ("startpos", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
    (
        "italian",
        "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
    ),
    ("rook_endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
];

fn bench_select_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_move");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    // A generous budget keeps the clock out of the measurement; the random
    // branch is disabled so level 1 always searches.
    let config = EngineConfig {
        time_budget_ms: 600_000,
        random_move_one_in: 0,
        ..EngineConfig::default()
    };

    for (name, fen) in POSITIONS {
        let game = GameState::from_fen(fen).expect("benchmark FEN should parse");
        let color = game.side_to_move;

        for strength in 1..=3u8 {
            let mut engine = MinimaxEngine::with_seed(17).with_config(config);
            group.bench_with_input(
                BenchmarkId::new(*name, format!("difficulty_{strength}")),
                &strength,
                |b, &strength| {
                    b.iter(|| {
                        let mv = engine
                            .select_move(black_box(&game), strength, color)
                            .expect("search should run");
                        black_box(mv)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_select_move);
criterion_main!(search_benches);
