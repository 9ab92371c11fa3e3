//! End-to-end checks through the public API: game controller, legality
//! oracle, make/undo and the engine entry point.

use plum_tactics::engines::engine_minimax::{EngineConfig, MinimaxEngine};
use plum_tactics::engines::engine_trait::{Engine, GameStateView, SearchParams};
use plum_tactics::game::ai_player::AiPlayer;
use plum_tactics::game::chess_game::{ChessGame, GameOutcome};
use plum_tactics::game_state::chess_types::{Color, PieceKind};
use plum_tactics::game_state::game_state::GameState;
use plum_tactics::move_generation::legal_move_apply::{apply_move, undo_move};
use plum_tactics::move_generation::legal_move_checks::is_king_in_check;
use plum_tactics::move_generation::legal_move_generator::{is_legal, legal_moves};
use plum_tactics::search::board_scoring::{BoardScorer, PositionalScorer};

fn patient_engine(seed: u64) -> MinimaxEngine {
    MinimaxEngine::with_seed(seed).with_config(EngineConfig {
        time_budget_ms: 600_000,
        ..EngineConfig::default()
    })
}

#[test]
fn every_proposed_move_is_legal_through_a_short_game() {
    let mut game = ChessGame::new();
    let mut white = AiPlayer::new(patient_engine(1), Color::White, 2);
    let mut black = AiPlayer::new(patient_engine(2), Color::Black, 1);

    for _ in 0..16 {
        if game.is_game_over() {
            break;
        }
        let before = game.state().clone();
        let player = match game.side_to_move() {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        let mv = player
            .take_turn(&mut game)
            .expect("turn should run")
            .expect("a running game always yields a move");
        assert!(is_legal(&before, &mv), "{mv} was not legal in {}", before.get_fen());
        assert!(!is_king_in_check(game.state(), mv.color));
        assert!(game.state().validate().is_ok());
    }
}

#[test]
fn make_undo_round_trips_every_legal_move_of_rich_positions() {
    for fen in [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "r3k2r/1P6/8/3pP3/8/7p/8/R3K2R w KQkq d6 0 1",
    ] {
        let original = GameState::from_fen(fen).expect("FEN should parse");
        let mut working = original.clone();
        for mv in legal_moves(&original, original.side_to_move) {
            let undo = apply_move(&mut working, mv).expect("legal move should apply");
            undo_move(&mut working, undo);
            assert_eq!(working, original, "{mv} did not undo cleanly");
        }
    }
}

#[test]
fn rich_position_offers_every_special_move() {
    let game = GameState::from_fen("r3k2r/1P6/8/3pP3/8/7p/8/R3K2R w KQkq d6 0 1")
        .expect("FEN should parse");
    let moves = legal_moves(&game, Color::White);
    assert!(moves.iter().any(|mv| mv.is_castle() && mv.to == 6));
    assert!(moves.iter().any(|mv| mv.is_castle() && mv.to == 2));
    assert!(moves.iter().any(|mv| mv.is_en_passant()));
    assert!(moves
        .iter()
        .any(|mv| mv.is_promotion() && mv.promotion == Some(PieceKind::Queen)));
}

#[test]
fn rook_on_the_file_checks_and_confines_the_king() {
    let game = ChessGame::from_fen("4r1k1/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
    assert!(is_king_in_check(game.state(), Color::White));
    assert!(game
        .legal_moves(Color::White)
        .iter()
        .all(|mv| mv.to % 8 != 4));
}

#[test]
fn fools_mate_through_the_controller() {
    let mut game = ChessGame::new();
    for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        game.make_move_lan(text).expect("move should be legal");
    }
    assert_eq!(
        game.outcome(),
        Some(GameOutcome::Checkmate {
            winner: Color::Black
        })
    );

    let mut engine = patient_engine(3);
    assert_eq!(
        engine
            .select_move(&game, 4, Color::White)
            .expect("engine should run"),
        None
    );
}

#[test]
fn engine_trait_round_trip() {
    let game = ChessGame::new();
    let mut engine: Box<dyn Engine> = Box::new(patient_engine(4));
    engine.set_option("Difficulty", "2").expect("valid option");
    let out = engine
        .choose_move(&game, &SearchParams::default())
        .expect("engine should run");
    let mv = out.best_move.expect("opening has moves");
    assert!(is_legal(game.state(), &mv));
    assert!(!out.info_lines.is_empty());
}

#[test]
fn evaluation_is_color_symmetric() {
    let scorer = PositionalScorer::default();
    let game = GameState::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4")
        .expect("FEN should parse");
    let mirrored = game.mirrored();
    assert_eq!(
        scorer.score(&game, Color::White),
        scorer.score(&mirrored, Color::Black)
    );
}
