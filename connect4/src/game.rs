//! Turn handling: the entry points a front end calls, and [`Game`], which
//! owns a live board between searches.
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::board::{Board, Side};
use crate::config::EngineConfig;
use crate::error::GameError;
use crate::notation::TypedMove;
use crate::rules::{outcome, GameOutcome};
use crate::search::search_with_stats;

pub const MAX_DEPTH: u8 = 15;

/// A column picked by the search together with its minimax score.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMove {
    pub column: usize,
    pub score: i64,
}

/// Plays `side` into `column` on the live board and reports the result.
pub fn apply_turn(board: &mut Board, side: Side, column: usize) -> Result<GameOutcome, GameError> {
    ensure_playable(board)?;
    if column >= board.cols() {
        return Err(GameError::ColumnOutOfBounds { column });
    }
    let row = board
        .next_open_row(column)
        .ok_or(GameError::ColumnFull { column })?;
    board.drop_piece(row, column, side);
    outcome(board)
}

/// Column the AI would play for `side`. Never touches `board`.
pub fn choose_ai_move(board: &Board, side: Side, depth: u8) -> Result<usize, GameError> {
    choose_scored_move(board, side, depth).map(|mv| mv.column)
}

pub fn choose_scored_move(board: &Board, side: Side, depth: u8) -> Result<ScoredMove, GameError> {
    if !(1..=MAX_DEPTH).contains(&depth) {
        return Err(GameError::DepthOutOfRange(depth));
    }
    ensure_playable(board)?;
    let (result, stats) = search_with_stats(board, depth, side);
    let column = result.column.ok_or_else(|| {
        GameError::InvariantViolation("search of a live position returned no column".to_string())
    })?;
    debug!(
        ?side,
        depth,
        column,
        score = result.score,
        nodes = stats.nodes,
        leaves = stats.leaves,
        prunes = stats.prunes,
        "search finished"
    );
    Ok(ScoredMove {
        column,
        score: result.score,
    })
}

fn ensure_playable(board: &Board) -> Result<(), GameError> {
    match outcome(board)? {
        GameOutcome::InProgress => Ok(()),
        GameOutcome::Win(_) => Err(GameError::GameFinished),
        GameOutcome::Draw => Err(GameError::NoLegalMoves),
    }
}

/// Result of [`Game::play_ai`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiMove {
    pub side: Side,
    pub column: usize,
    pub score: i64,
    pub outcome: GameOutcome,
}

/// A game in progress: the live board, whose turn it is and how it stands.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Side,
    outcome: GameOutcome,
    history: Vec<TypedMove>,
}

impl Game {
    pub fn new(config: &EngineConfig, first: Side) -> Result<Self, GameError> {
        Ok(Self::with_board(config.new_board()?, first))
    }

    /// Takes over an existing board with `first` to move.
    pub fn with_board(board: Board, first: Side) -> Self {
        let outcome = settle(&board, outcome(&board)).unwrap_or(GameOutcome::Draw);
        Self {
            board,
            to_move: first,
            outcome,
            history: Vec::new(),
        }
    }

    /// Replays `moves`; the first move decides who started. Sides must alternate.
    pub fn from_history(config: &EngineConfig, moves: &[TypedMove]) -> Result<Self, GameError> {
        let first = moves.first().map(|mv| mv.side).unwrap_or(Side::PlayerA);
        let mut game = Self::new(config, first)?;
        for (idx, mv) in moves.iter().enumerate() {
            if mv.side != game.to_move {
                return Err(GameError::ParseMove {
                    position: idx * 2,
                    reason: format!("expected {} to move", game.to_move.symbol()),
                });
            }
            game.play(mv.column)?;
        }
        Ok(game)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn history(&self) -> &[TypedMove] {
        &self.history
    }

    /// Plays `column` for the side to move.
    pub fn play(&mut self, column: usize) -> Result<GameOutcome, GameError> {
        self.ensure_running()?;
        let side = self.to_move;
        let result = apply_turn(&mut self.board, side, column);
        let outcome = settle(&self.board, result)?;
        self.history.push(TypedMove { side, column });
        self.to_move = side.opponent();
        self.outcome = outcome;
        debug!(?side, column, ?outcome, "move applied");
        Ok(outcome)
    }

    /// Searches `depth` plies for the side to move, then plays the result.
    pub fn play_ai(&mut self, depth: u8) -> Result<AiMove, GameError> {
        self.ensure_running()?;
        let side = self.to_move;
        let chosen = choose_scored_move(&self.board, side, depth)?;
        let outcome = self.play(chosen.column)?;
        Ok(AiMove {
            side,
            column: chosen.column,
            score: chosen.score,
            outcome,
        })
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        match self.outcome {
            GameOutcome::InProgress => Ok(()),
            GameOutcome::Win(_) => Err(GameError::GameFinished),
            GameOutcome::Draw => Err(GameError::NoLegalMoves),
        }
    }
}

/// A corrupt board ends the game as a draw instead of failing the caller.
fn settle(board: &Board, result: Result<GameOutcome, GameError>) -> Result<GameOutcome, GameError> {
    match result {
        Err(GameError::InvariantViolation(reason)) => {
            error!(%reason, board = %board, "treating inconsistent board as a draw");
            Ok(GameOutcome::Draw)
        }
        other => other,
    }
}
