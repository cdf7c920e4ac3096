//! Request and response shapes for a stateless front end. Every request
//! carries the full move history, so nothing is kept between calls.
use serde::{Deserialize, Serialize};

use crate::board::{Cell, Side};
use crate::config::EngineConfig;
use crate::error::GameError;
use crate::eval::evaluate;
use crate::game::{choose_scored_move, Game, ScoredMove, MAX_DEPTH};
use crate::notation::{format_history, parse_history};
use crate::rules::GameOutcome;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default)]
    pub rows: Option<usize>,
    #[serde(default)]
    pub cols: Option<usize>,
}

impl Dimensions {
    fn apply(&self, defaults: &EngineConfig) -> EngineConfig {
        EngineConfig {
            rows: self.rows.unwrap_or(defaults.rows),
            cols: self.cols.unwrap_or(defaults.cols),
            depth: defaults.depth,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub position: String,
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(flatten)]
    pub dimensions: Dimensions,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub column: usize,
    pub score: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRequest {
    #[serde(default)]
    pub position: String,
    #[serde(flatten)]
    pub dimensions: Dimensions,
}

/// Everything a renderer needs to draw the position and its labels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub position: String,
    pub rows: usize,
    pub cols: usize,
    /// Top row first.
    pub cells: Vec<Vec<Cell>>,
    pub to_move: Side,
    pub outcome: GameOutcome,
    pub valid_moves: Vec<usize>,
    /// Heuristic value for the side to move.
    pub evaluation: i64,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRequest {
    #[serde(default)]
    pub position: String,
    pub column: usize,
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(flatten)]
    pub dimensions: Dimensions,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResponse {
    pub human_column: usize,
    pub ai_move: Option<ScoredMove>,
    pub state: BoardSnapshot,
}

/// The AI's choice for whichever side moves next after `position`.
pub fn best_move(defaults: &EngineConfig, request: MoveRequest) -> Result<MoveResponse, GameError> {
    let config = request.dimensions.apply(defaults);
    let level = resolve_level(&config, request.level)?;
    let game = replay(&config, &request.position)?;
    let chosen = choose_scored_move(game.board(), game.to_move(), level)?;
    Ok(MoveResponse {
        column: chosen.column,
        score: chosen.score,
    })
}

pub fn describe(defaults: &EngineConfig, request: StateRequest) -> Result<BoardSnapshot, GameError> {
    let config = request.dimensions.apply(defaults);
    let game = replay(&config, &request.position)?;
    Ok(snapshot(&game))
}

/// Plays the human's column, then answers with the AI unless the game ended.
pub fn take_turn(defaults: &EngineConfig, request: TurnRequest) -> Result<TurnResponse, GameError> {
    let config = request.dimensions.apply(defaults);
    let level = resolve_level(&config, request.level)?;
    let mut game = replay(&config, &request.position)?;
    let outcome = game.play(request.column)?;
    let ai_move = if outcome == GameOutcome::InProgress {
        let played = game.play_ai(level)?;
        Some(ScoredMove {
            column: played.column,
            score: played.score,
        })
    } else {
        None
    };
    Ok(TurnResponse {
        human_column: request.column,
        ai_move,
        state: snapshot(&game),
    })
}

/// A request may search shallower than the configured depth, never deeper.
fn resolve_level(config: &EngineConfig, requested: Option<u8>) -> Result<u8, GameError> {
    let level = requested.unwrap_or(config.depth);
    if !(1..=MAX_DEPTH).contains(&level) {
        return Err(GameError::DepthOutOfRange(level));
    }
    if level > config.depth {
        return Err(GameError::DepthAboveLimit {
            depth: level,
            limit: config.depth,
        });
    }
    Ok(level)
}

fn replay(config: &EngineConfig, position: &str) -> Result<Game, GameError> {
    let moves = parse_history(position)?;
    Game::from_history(config, &moves)
}

fn snapshot(game: &Game) -> BoardSnapshot {
    let board = game.board();
    BoardSnapshot {
        position: format_history(game.history()),
        rows: board.rows(),
        cols: board.cols(),
        cells: board.top_down(),
        to_move: game.to_move(),
        outcome: game.outcome(),
        valid_moves: if game.outcome().is_over() {
            Vec::new()
        } else {
            board.valid_moves()
        },
        evaluation: evaluate(board, game.to_move()),
        text: board.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(position: &str, level: u8) -> MoveRequest {
        MoveRequest {
            position: position.to_string(),
            level: Some(level),
            dimensions: Dimensions::default(),
        }
    }

    #[test]
    fn rejects_bad_depth() {
        let res = best_move(&EngineConfig::default(), request("", 0));
        assert!(matches!(res, Err(GameError::DepthOutOfRange(0))));
    }

    #[test]
    fn rejects_column_past_the_edge() {
        let res = best_move(&EngineConfig::default(), request("A7", 3));
        assert_eq!(res, Err(GameError::ColumnOutOfBounds { column: 7 }));
    }

    #[test]
    fn takes_immediate_win_horizontal() {
        // A holds 3, 4, 5 on the bottom row and is to move; B's own three is capped.
        let res = best_move(&EngineConfig::default(), request("B0A3B1A4B2A5B0", 4)).unwrap();
        assert_eq!(res.column, 6);
        assert_eq!(res.score, crate::search::WIN_SCORE);
    }

    #[test]
    fn blocks_vertical_four_incoming() {
        // B stacks column 0 three high; A must cap it.
        let res = best_move(&EngineConfig::default(), request("B0A1B0A1B0A2", 6)).unwrap();
        assert_eq!(res.column, 0);
    }

    #[test]
    fn level_falls_back_to_configured_depth() {
        let req = MoveRequest {
            position: "A0B0A1B1A2".to_string(),
            level: None,
            dimensions: Dimensions::default(),
        };
        let config = EngineConfig {
            depth: 2,
            ..EngineConfig::default()
        };
        assert_eq!(best_move(&config, req).unwrap().column, 3);
    }

    #[test]
    fn snapshot_of_small_board() {
        let req = StateRequest {
            position: "A1B1".to_string(),
            dimensions: Dimensions {
                rows: Some(4),
                cols: Some(5),
            },
        };
        let snap = describe(&EngineConfig::default(), req).unwrap();
        assert_eq!((snap.rows, snap.cols), (4, 5));
        assert_eq!(snap.cells.len(), 4);
        assert_eq!(snap.cells[3][1], Cell::PlayerA);
        assert_eq!(snap.cells[2][1], Cell::PlayerB);
        assert_eq!(snap.to_move, Side::PlayerA);
        assert_eq!(snap.outcome, GameOutcome::InProgress);
        assert_eq!(snap.valid_moves, vec![0, 1, 2, 3, 4]);
        assert_eq!(snap.position, "A1B1");
    }

    #[test]
    fn turn_plays_human_then_ai() {
        let req = TurnRequest {
            position: "A0B6A1B6".to_string(),
            column: 5,
            level: Some(3),
            dimensions: Dimensions::default(),
        };
        let res = take_turn(&EngineConfig::default(), req).unwrap();
        assert_eq!(res.human_column, 5);
        let ai = res.ai_move.unwrap();
        assert!(ai.column < 7);
        assert_eq!(res.state.position.len(), "A0B6A1B6A5".len() + 2);
        assert_eq!(res.state.to_move, Side::PlayerA);
    }

    #[test]
    fn winning_turn_gets_no_reply() {
        let req = TurnRequest {
            position: "A0B0A1B1A2B6".to_string(),
            column: 3,
            level: Some(3),
            dimensions: Dimensions::default(),
        };
        let res = take_turn(&EngineConfig::default(), req).unwrap();
        assert_eq!(res.ai_move, None);
        assert_eq!(res.state.outcome, GameOutcome::Win(Side::PlayerA));
        assert!(res.state.valid_moves.is_empty());
    }

    #[test]
    fn level_above_configured_depth_is_rejected() {
        let config = EngineConfig {
            depth: 4,
            ..EngineConfig::default()
        };
        let res = best_move(&config, request("", 5));
        assert_eq!(res, Err(GameError::DepthAboveLimit { depth: 5, limit: 4 }));
        assert_eq!(best_move(&config, request("A0B0A1B1A2", 4)).unwrap().column, 3);
    }

    #[test]
    fn bad_level_rejected_even_when_human_move_ends_game() {
        // Column 3 completes A's bottom row, so no search would run.
        for level in [0, MAX_DEPTH] {
            let req = TurnRequest {
                position: "A0B0A1B1A2B6".to_string(),
                column: 3,
                level: Some(level),
                dimensions: Dimensions::default(),
            };
            assert!(take_turn(&EngineConfig::default(), req).is_err(), "level {level}");
        }
    }

    #[test]
    fn illegal_turn_is_recoverable() {
        let req = TurnRequest {
            position: "A0B0A0B0A0B0".to_string(),
            column: 0,
            level: Some(3),
            dimensions: Dimensions::default(),
        };
        let err = take_turn(&EngineConfig::default(), req).unwrap_err();
        assert!(err.is_illegal_move());
    }
}
