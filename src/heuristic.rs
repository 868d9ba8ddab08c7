//! Priority scoring for the best-first search.
//!
//! A board is scored from two views of how far it is from sorted:
//!
//! * position: how many tiles are outside their home row, and how many are
//!   outside their home column;
//! * alignment: whether the tile to the right of (and below) each tile,
//!   wrapping around the grid, is the one that belongs there.
//!
//! The alignment counters are weighted by the position counters of the
//! opposite axis, normalized by how much a single rotation can change them,
//! and half the route length is added so long routes lose priority.

use crate::board::{Board, CELLS, SIZE};

/// The counters behind a score. All start at 16 and reach 0 on the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakdown {
    /// Tiles outside their home row.
    pub row: i32,
    /// Tiles outside their home column.
    pub col: i32,
    pub right: i32,
    pub down: i32,
}

/// Home row and column of a tile value.
fn home(value: u8) -> (usize, usize) {
    let v = value as usize - 1;
    (v / SIZE, v % SIZE)
}

pub fn breakdown(board: &Board) -> Breakdown {
    let cells = board.cells();
    let mut row = CELLS as i32;
    let mut col = CELLS as i32;
    let mut right = CELLS as i32;
    let mut down = CELLS as i32;

    for (i, &value) in cells.iter().enumerate() {
        let (ideal_row, ideal_col) = home(value);
        let (current_row, current_col) = (i / SIZE, i % SIZE);

        if ideal_row == current_row {
            row -= 1;
        }
        if ideal_col == current_col {
            col -= 1;
        }

        let right_of = current_row * SIZE + (current_col + 1) % SIZE;
        let below = ((current_row + 1) % SIZE) * SIZE + current_col;
        let (right_row, right_col) = home(cells[right_of]);
        let (down_row, down_col) = home(cells[below]);

        // right neighbours are matched on row first, down neighbours on
        // column first
        if right_row == ideal_row {
            if right_col == (ideal_col + 1) % SIZE {
                right -= 1;
            } else {
                right += 2;
            }
        }
        if down_col == ideal_col {
            if down_row == (ideal_row + 1) % SIZE {
                down -= 1;
            } else {
                down += 2;
            }
        }
    }

    Breakdown {
        row,
        col,
        right,
        down,
    }
}

impl Breakdown {
    /// Combines the counters with the number of moves taken so far.
    pub fn score(&self, route_len: usize) -> f64 {
        let alignment = (self.right * self.col + self.down * self.row) as f64 / 32.0;
        let position = (self.row + self.col) as f64 / 16.0;
        alignment + position + route_len as f64 / 2.0
    }
}

/// Search priority of reaching `board` after `route_len` moves. Lower is
/// explored first.
pub fn score(board: &Board, route_len: usize) -> f64 {
    breakdown(board).score(route_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Move, Shift};

    fn board(values: [u8; CELLS]) -> Board {
        Board::from_cells(values).unwrap()
    }

    #[test]
    fn goal_scores_zero() {
        let goal = Board::solved();
        assert_eq!(
            breakdown(&goal),
            Breakdown {
                row: 0,
                col: 0,
                right: 0,
                down: 0
            }
        );
        assert_eq!(score(&goal, 0), 0.0);
    }

    #[test]
    fn route_length_adds_half_per_move() {
        let goal = Board::solved();
        assert_eq!(score(&goal, 1), 0.5);
        assert_eq!(score(&goal, 7), 3.5);
    }

    #[test]
    fn single_row_rotation() {
        // row 1 is 4 1 2 3: every tile still in its home row, none in its
        // home column
        let (rotated, _) = Board::solved().rotate_row(0, Shift::TowardEnd);
        let b = breakdown(&rotated);
        assert_eq!(b.row, 0);
        assert_eq!(b.col, 4);
        // 4->1, 1->2, 2->3 line up; 3 wraps to 4 and lines up too
        assert_eq!(b.right, 0);
        // the moved tiles and the bottom row have down neighbours from
        // another column
        assert_eq!(b.down, 8);
        assert_eq!(score(&rotated, 0), 0.25);
    }

    #[test]
    fn right_alignment_penalizes_wrong_column_in_same_row() {
        // 2 1 3 4 on the first row
        let swapped = board([2, 1, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16]);
        let b = breakdown(&swapped);
        assert_eq!(b.row, 0);
        assert_eq!(b.col, 2);
        // tile 2 -> 1: same row, wrong column (+2)
        // tile 1 -> 3: same row, wrong column (+2)
        // tile 3 -> 4: matches (-1)
        // tile 4 -> 2 (wrap): same row, wrong column (+2)
        // remaining 12 tiles match (-12)
        assert_eq!(b.right, 16 + 2 + 2 - 1 + 2 - 12);
    }

    #[test]
    fn down_alignment_checks_column_first() {
        // swap 1 and 5: down neighbours now in the right column but wrong
        // row order
        let swapped = board([5, 2, 3, 4, 1, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16]);
        let b = breakdown(&swapped);
        assert_eq!(b.row, 2);
        assert_eq!(b.col, 0);
        // 5 -> 1: column matches, row does not (+2)
        // 1 -> 9: column matches, row does not (+2)
        // 13 -> 5 (wrap): column matches, row does not (+2)
        // remaining 13 tiles match (-13)
        assert_eq!(b.down, 16 + 2 + 2 + 2 - 13);
    }

    #[test]
    fn column_rotation_keeps_down_alignment() {
        // right neighbours from another home row leave `right` untouched
        let mv = Move::column(1, Shift::TowardEnd);
        let b = breakdown(&Board::solved().apply(mv));
        assert_eq!(b.row, 4);
        assert_eq!(b.col, 0);
        assert_eq!(b.down, 0);
        assert!(b.right > 0);
    }
}
