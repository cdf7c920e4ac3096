//! Connect Four engine with minimax and alpha-beta pruning.
//! A front end creates a [`Board`] (or a [`Game`] that owns one), plays
//! confirmed moves with [`apply_turn`], asks [`choose_ai_move`] for the
//! computer's column and checks [`outcome`] after every move. Searches run on
//! copies, so the live board only changes through `apply_turn`.
pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod eval;
pub mod game;
pub mod notation;
pub mod rules;
pub mod search;

pub use api::{
    best_move, describe, take_turn, BoardSnapshot, Dimensions, MoveRequest, MoveResponse,
    StateRequest, TurnRequest, TurnResponse,
};
pub use board::{Board, Cell, Side, STANDARD_COLS, STANDARD_ROWS};
pub use config::{EngineConfig, DEFAULT_DEPTH};
pub use error::GameError;
pub use eval::evaluate;
pub use game::{apply_turn, choose_ai_move, choose_scored_move, AiMove, Game, ScoredMove, MAX_DEPTH};
pub use notation::{format_history, parse_history, TypedMove};
pub use rules::{has_four_in_a_row, is_terminal, outcome, GameOutcome};
pub use search::{full_minimax, search, search_with_stats, SearchResult, SearchStats, WIN_SCORE};
