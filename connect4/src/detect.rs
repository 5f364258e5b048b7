//! Win detection localized to the cell that was just filled.
use crate::board::{Board, Chip, Position};

/// Length of a winning run.
pub const CONNECT: usize = 4;

/// Step vectors for the four axes: vertical, horizontal, rising and falling diagonal.
const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Reports whether the chip at `pos` is part of a run of at least
/// [`CONNECT`] `chip` cells along any axis.
pub fn completes_line(board: &Board, chip: Chip, pos: Position) -> bool {
    AXES.iter().any(|&(dc, dr)| {
        let run = 1 + walk(board, chip, pos, dc, dr) + walk(board, chip, pos, -dc, -dr);
        run >= CONNECT
    })
}

/// Counts contiguous `chip` cells from `pos` (exclusive) in direction `(dc, dr)`.
fn walk(board: &Board, chip: Chip, pos: Position, dc: isize, dr: isize) -> usize {
    let mut count = 0;
    let mut col = pos.column as isize + dc;
    let mut row = pos.row as isize + dr;
    while col >= 0 && row >= 0 && board.get(col as usize, row as usize) == Some(chip) {
        count += 1;
        col += dc;
        row += dr;
    }
    count
}
