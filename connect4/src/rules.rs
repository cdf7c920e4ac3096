//! Four-in-a-row detection and game outcome.
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Side, MAX_DIMENSION, MIN_DIMENSION};
use crate::error::GameError;

pub const WINDOW_LENGTH: usize = 4;

/// Four cell indices forming a straight run.
pub type Window = [usize; WINDOW_LENGTH];

const SHAPES: usize = MAX_DIMENSION - MIN_DIMENSION + 1;

/// Window tables for every board shape `Board::new` accepts, built once and
/// indexed by [`shape_index`].
static WINDOW_TABLES: Lazy<Vec<Vec<Window>>> = Lazy::new(|| {
    let mut tables = Vec::with_capacity(SHAPES * SHAPES);
    for rows in MIN_DIMENSION..=MAX_DIMENSION {
        for cols in MIN_DIMENSION..=MAX_DIMENSION {
            tables.push(generate_windows(rows, cols));
        }
    }
    tables
});

/// (row step, col step) for horizontal, vertical, `/` and `\` runs.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "winner", rename_all = "snake_case")]
pub enum GameOutcome {
    InProgress,
    Win(Side),
    Draw,
}

impl GameOutcome {
    pub fn is_over(self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }
}

pub fn windows(board: &Board) -> &'static [Window] {
    &WINDOW_TABLES[shape_index(board.rows(), board.cols())]
}

fn shape_index(rows: usize, cols: usize) -> usize {
    (rows - MIN_DIMENSION) * SHAPES + (cols - MIN_DIMENSION)
}

pub fn has_four_in_a_row(board: &Board, side: Side) -> bool {
    let piece = side.piece();
    windows(board)
        .iter()
        .any(|window| window.iter().all(|&idx| board.cell(idx) == piece))
}

pub fn is_terminal(board: &Board) -> bool {
    has_four_in_a_row(board, Side::PlayerA)
        || has_four_in_a_row(board, Side::PlayerB)
        || board.valid_moves().is_empty()
}

/// Both sides holding a line is unreachable through legal play and is
/// reported rather than resolved.
pub fn outcome(board: &Board) -> Result<GameOutcome, GameError> {
    let a_won = has_four_in_a_row(board, Side::PlayerA);
    let b_won = has_four_in_a_row(board, Side::PlayerB);
    match (a_won, b_won) {
        (true, true) => Err(GameError::InvariantViolation(
            "both sides have four in a row".to_string(),
        )),
        (true, false) => Ok(GameOutcome::Win(Side::PlayerA)),
        (false, true) => Ok(GameOutcome::Win(Side::PlayerB)),
        (false, false) if board.is_full() => Ok(GameOutcome::Draw),
        (false, false) => Ok(GameOutcome::InProgress),
    }
}

fn generate_windows(rows: usize, cols: usize) -> Vec<Window> {
    let mut windows = Vec::new();
    for (d_row, d_col) in DIRECTIONS {
        for row in 0..rows {
            for col in 0..cols {
                if let Some(window) = window_from(rows, cols, row, col, d_row, d_col) {
                    windows.push(window);
                }
            }
        }
    }
    windows
}

fn window_from(
    rows: usize,
    cols: usize,
    row: usize,
    col: usize,
    d_row: isize,
    d_col: isize,
) -> Option<Window> {
    let mut window = [0; WINDOW_LENGTH];
    for (offset, slot) in window.iter_mut().enumerate() {
        let r = row as isize + d_row * offset as isize;
        let c = col as isize + d_col * offset as isize;
        if r < 0 || c < 0 || r >= rows as isize || c >= cols as isize {
            return None;
        }
        *slot = r as usize * cols + c as usize;
    }
    Some(window)
}
