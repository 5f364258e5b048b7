//! Static evaluation used at search cutoffs.
//!
//! Positive scores favor the computer. Every 4-cell window on the grid
//! contributes the number of a side's chips it holds, unless the opponent
//! also has a chip in it.
use crate::board::{Board, Chip};
use crate::detect::CONNECT;

/// Score of a board the computer has won. No heuristic value reaches it.
pub const WIN_SCORE: i32 = i32::MAX;
/// Score of a board the player has won.
pub const LOSS_SCORE: i32 = i32::MIN;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Axis {
    Vertical,
    Horizontal,
    /// Bottom-left to top-right.
    RisingDiagonal,
    /// Top-left to bottom-right.
    FallingDiagonal,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Vertical,
        Axis::Horizontal,
        Axis::RisingDiagonal,
        Axis::FallingDiagonal,
    ];

    fn step(self) -> (isize, isize) {
        match self {
            Axis::Vertical => (0, 1),
            Axis::Horizontal => (1, 0),
            Axis::RisingDiagonal => (1, 1),
            Axis::FallingDiagonal => (1, -1),
        }
    }
}

pub fn evaluate(board: &Board) -> i32 {
    if board.done() {
        return match board.winner() {
            Some(Chip::Computer) => WIN_SCORE,
            Some(Chip::Player) => LOSS_SCORE,
            None => 0,
        };
    }
    side_score(board, Chip::Computer) - side_score(board, Chip::Player)
}

fn side_score(board: &Board, chip: Chip) -> i32 {
    Axis::ALL
        .iter()
        .map(|&axis| axis_score(board, chip, axis))
        .sum()
}

/// Sum of `chip`'s window scores over every in-bounds window on `axis`.
pub fn axis_score(board: &Board, chip: Chip, axis: Axis) -> i32 {
    let (dc, dr) = axis.step();
    let span = CONNECT as isize - 1;
    let columns = board.columns() as isize;
    let rows = board.rows() as isize;

    let mut total = 0;
    for col in 0..columns {
        for row in 0..rows {
            let end_col = col + dc * span;
            let end_row = row + dr * span;
            if end_col < 0 || end_col >= columns || end_row < 0 || end_row >= rows {
                continue;
            }
            total += window_score(board, chip, col, row, dc, dr);
        }
    }
    total
}

fn window_score(board: &Board, chip: Chip, col: isize, row: isize, dc: isize, dr: isize) -> i32 {
    let mut points = 0;
    for i in 0..CONNECT as isize {
        match board.get((col + dc * i) as usize, (row + dr * i) as usize) {
            Some(c) if c == chip => points += 1,
            Some(_) => return 0,
            None => {}
        }
    }
    points
}
