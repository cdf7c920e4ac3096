use crate::board::{Board, Cell, Side};
use crate::rules::windows;

pub const CENTER_WEIGHT: i64 = 3;

/// Heuristic value of a non-terminal board from `side`'s point of view.
pub fn evaluate(board: &Board, side: Side) -> i64 {
    let mine = side.piece();
    let theirs = side.opponent().piece();

    let center = board.center_col();
    let center_count = (0..board.rows())
        .filter(|&row| board.piece_at(row, center) == mine)
        .count() as i64;
    let mut score = CENTER_WEIGHT * center_count;

    for window in windows(board).iter() {
        let mut own = 0;
        let mut opp = 0;
        let mut empty = 0;
        for &idx in window {
            match board.cell(idx) {
                Cell::Empty => empty += 1,
                cell if cell == mine => own += 1,
                cell if cell == theirs => opp += 1,
                _ => {}
            }
        }
        score += score_window(own, opp, empty);
    }
    score
}

fn score_window(own: u8, opp: u8, empty: u8) -> i64 {
    match (own, opp, empty) {
        (4, 0, 0) => 100,
        (3, 0, 1) => 5,
        (2, 0, 2) => 2,
        (0, 3, 1) => -4,
        _ => 0, // mixed or thin windows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(board: &mut Board, col: usize, side: Side) {
        let row = board.next_open_row(col).unwrap();
        board.drop_piece(row, col, side);
    }

    #[test]
    fn empty_board_scores_zero() {
        let board = Board::standard();
        assert_eq!(evaluate(&board, Side::PlayerA), 0);
        assert_eq!(evaluate(&board, Side::PlayerB), 0);
    }

    #[test]
    fn window_table() {
        assert_eq!(score_window(4, 0, 0), 100);
        assert_eq!(score_window(3, 0, 1), 5);
        assert_eq!(score_window(2, 0, 2), 2);
        assert_eq!(score_window(0, 3, 1), -4);
        assert_eq!(score_window(2, 1, 1), 0);
        assert_eq!(score_window(1, 0, 3), 0);
        assert_eq!(score_window(0, 2, 2), 0);
    }

    #[test]
    fn single_center_piece() {
        let mut board = Board::standard();
        play(&mut board, 3, Side::PlayerA);
        // Centre bonus only; a lone piece fills no scoring window.
        assert_eq!(evaluate(&board, Side::PlayerA), 3);
        assert_eq!(evaluate(&board, Side::PlayerB), 0);
    }

    #[test]
    fn horizontal_pair_on_bottom_row() {
        let mut board = Board::standard();
        play(&mut board, 0, Side::PlayerA);
        play(&mut board, 1, Side::PlayerA);
        // Only the window at cols 0..=3 holds both pieces with two blanks.
        assert_eq!(evaluate(&board, Side::PlayerA), 2);
    }

    #[test]
    fn open_three_against_opponent() {
        let mut board = Board::standard();
        for col in 0..3 {
            play(&mut board, col, Side::PlayerB);
        }
        // Windows cols 0..=3 (three + empty) and 1..=4 (two + two empty).
        assert_eq!(evaluate(&board, Side::PlayerB), 5 + 2);
        // From A's side the three is a threat, the pair is ignored.
        assert_eq!(evaluate(&board, Side::PlayerA), -4);
    }

    #[test]
    fn center_column_uses_floor_of_half_width() {
        let mut board = Board::new(6, 9).unwrap();
        play(&mut board, 4, Side::PlayerB);
        play(&mut board, 4, Side::PlayerB);
        // Only the vertical window over rows 0..=3 holds both pieces.
        assert_eq!(evaluate(&board, Side::PlayerB), 2 * CENTER_WEIGHT + 2);
    }
}
