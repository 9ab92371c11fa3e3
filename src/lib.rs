//! Crate root module declarations for the Plum Tactics chess core.
//!
//! This file exposes the subsystems (game state, move generation, search,
//! engines, game control and notation helpers) so binaries, tests and
//! external tooling can import stable module paths.

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod attack_tables;
    pub mod chess_move;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_sliders;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod move_ordering;
}

pub mod engines {
    pub mod difficulty;
    pub mod engine_minimax;
    pub mod engine_trait;
    pub mod time_management;
}

pub mod game {
    pub mod ai_player;
    pub mod chess_game;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}
