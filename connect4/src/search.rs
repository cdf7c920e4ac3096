//! Depth-bounded minimax with alpha-beta pruning.
//!
//! The searcher plays one fixed side as the maximizer; every node either
//! maximizes for that side or minimizes for its opponent. Moves are tried in
//! ascending column order on cloned boards, and only a strictly better score
//! replaces the current best, so the lowest column wins ties and repeated
//! searches of the same position always agree.
use serde::{Deserialize, Serialize};

use crate::board::{Board, Side};
use crate::eval::evaluate;
use crate::rules::has_four_in_a_row;

/// Sentinel for a decided game, far above any heuristic total.
pub const WIN_SCORE: i64 = 100_000_000_000_000;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// `None` only at a cutoff node.
    pub column: Option<usize>,
    pub score: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub leaves: u64,
    pub prunes: u64,
}

/// Best column for `side` looking `depth` plies ahead.
pub fn search(board: &Board, depth: u8, side: Side) -> SearchResult {
    search_with_stats(board, depth, side).0
}

pub fn search_with_stats(board: &Board, depth: u8, side: Side) -> (SearchResult, SearchStats) {
    let mut searcher = Searcher::new(side, true);
    let result = searcher.minimax(board, depth, i64::MIN, i64::MAX, true);
    (result, searcher.stats)
}

/// The same recursion with pruning switched off. Visits every node, so keep
/// `depth` small.
pub fn full_minimax(board: &Board, depth: u8, side: Side) -> SearchResult {
    let mut searcher = Searcher::new(side, false);
    searcher.minimax(board, depth, i64::MIN, i64::MAX, true)
}

struct Searcher {
    max_side: Side,
    prune: bool,
    stats: SearchStats,
}

impl Searcher {
    fn new(max_side: Side, prune: bool) -> Self {
        Self {
            max_side,
            prune,
            stats: SearchStats::default(),
        }
    }

    fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i64,
        mut beta: i64,
        maximizing: bool,
    ) -> SearchResult {
        self.stats.nodes += 1;
        let moves = board.valid_moves();
        let max_won = has_four_in_a_row(board, self.max_side);
        let min_won = has_four_in_a_row(board, self.max_side.opponent());

        if moves.is_empty() || depth == 0 || max_won || min_won {
            self.stats.leaves += 1;
            let score = if max_won {
                WIN_SCORE
            } else if min_won {
                -WIN_SCORE
            } else if moves.is_empty() {
                0
            } else {
                evaluate(board, self.max_side)
            };
            return SearchResult {
                column: None,
                score,
            };
        }

        let to_move = if maximizing {
            self.max_side
        } else {
            self.max_side.opponent()
        };
        let mut best = if maximizing { i64::MIN } else { i64::MAX };
        let mut best_column = moves[0];

        for col in moves {
            let row = board
                .next_open_row(col)
                .expect("valid column must have an open row");
            let mut child = board.clone();
            child.drop_piece(row, col, to_move);
            let score = self.minimax(&child, depth - 1, alpha, beta, !maximizing).score;

            if maximizing {
                if score > best {
                    best = score;
                    best_column = col;
                }
                alpha = alpha.max(best);
            } else {
                if score < best {
                    best = score;
                    best_column = col;
                }
                beta = beta.min(best);
            }

            if self.prune && alpha >= beta {
                self.stats.prunes += 1;
                break;
            }
        }

        SearchResult {
            column: Some(best_column),
            score: best,
        }
    }
}
