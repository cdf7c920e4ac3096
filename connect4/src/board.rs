//! Gravity grid. Row 0 is the bottom row, so a column fills upward:
//! ```text
//! row 5  . . . . . . .   <- top
//! row 0  . . . A B . .   <- bottom
//!        0 1 2 3 4 5 6
//! ```
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

pub const STANDARD_ROWS: usize = 6;
pub const STANDARD_COLS: usize = 7;
/// Shortest side that still admits a line of four.
pub const MIN_DIMENSION: usize = 4;
/// Columns are written as one digit in move histories.
pub const MAX_DIMENSION: usize = 10;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    PlayerA,
    PlayerB,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::PlayerA => Side::PlayerB,
            Side::PlayerB => Side::PlayerA,
        }
    }

    pub fn piece(self) -> Cell {
        match self {
            Side::PlayerA => Cell::PlayerA,
            Side::PlayerB => Cell::PlayerB,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Side::PlayerA => 'A',
            Side::PlayerB => 'B',
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    PlayerA,
    PlayerB,
}

impl Cell {
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::PlayerA => Some(Side::PlayerA),
            Cell::PlayerB => Some(Side::PlayerB),
        }
    }

    fn symbol(self) -> char {
        self.side().map(Side::symbol).unwrap_or('.')
    }
}

/// A Connect Four grid. `Clone` is the deep copy the search explores on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Result<Self, GameError> {
        check_dimension("rows", rows)?;
        check_dimension("cols", cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        })
    }

    pub fn standard() -> Self {
        Self {
            rows: STANDARD_ROWS,
            cols: STANDARD_COLS,
            cells: vec![Cell::Empty; STANDARD_ROWS * STANDARD_COLS],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn center_col(&self) -> usize {
        self.cols / 2
    }

    /// Panics if (row, col) is off the board.
    pub fn piece_at(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    pub fn is_valid_move(&self, col: usize) -> bool {
        col < self.cols && self.piece_at(self.rows - 1, col) == Cell::Empty
    }

    /// Lowest empty row of `col`, or `None` if the column is full or off the board.
    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows).find(|&row| self.piece_at(row, col) == Cell::Empty)
    }

    /// Writes `side`'s piece at (row, col). The caller picks the landing
    /// cell via [`Board::next_open_row`]; nothing here enforces gravity.
    /// Panics if (row, col) is off the board.
    pub fn drop_piece(&mut self, row: usize, col: usize, side: Side) {
        let idx = self.index(row, col);
        self.cells[idx] = side.piece();
    }

    /// Legal columns in ascending order.
    pub fn valid_moves(&self) -> Vec<usize> {
        (0..self.cols).filter(|&col| self.is_valid_move(col)).collect()
    }

    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| !self.is_valid_move(col))
    }

    /// Rows from the top down, as a front end would draw them.
    pub fn top_down(&self) -> Vec<Vec<Cell>> {
        (0..self.rows)
            .rev()
            .map(|row| (0..self.cols).map(|col| self.piece_at(row, col)).collect())
            .collect()
    }

    pub(crate) fn cell(&self, idx: usize) -> Cell {
        self.cells[idx]
    }

    pub(crate) fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "({row}, {col}) is off a {}x{} board",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            let line: Vec<String> = (0..self.cols)
                .map(|col| self.piece_at(row, col).symbol().to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        let footer: Vec<String> = (0..self.cols).map(|col| col.to_string()).collect();
        write!(f, "{}", footer.join(" "))
    }
}

fn check_dimension(name: &str, value: usize) -> Result<(), GameError> {
    if value < MIN_DIMENSION {
        return Err(GameError::Config(format!(
            "{name} must be at least {MIN_DIMENSION}, got {value}"
        )));
    }
    if value > MAX_DIMENSION {
        return Err(GameError::Config(format!(
            "{name} must be at most {MAX_DIMENSION}, got {value}"
        )));
    }
    Ok(())
}
