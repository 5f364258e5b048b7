use thiserror::Error;

use crate::board::Chip;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("board dimensions {columns}x{rows} must be non-zero")]
    InvalidDimensions { columns: usize, rows: usize },
    #[error("column {column} is full")]
    ColumnFull { column: usize },
    #[error("column {column} is out of range")]
    ColumnOutOfRange { column: usize },
    #[error("cannot drop chips because the game is over")]
    GameOver,
    #[error("it is the {expected}'s turn")]
    OutOfTurn { expected: Chip },
    #[error("invalid move string at position {position}: {reason}")]
    ParseMove { position: usize, reason: String },
    #[error("depth {0} is out of range (1-15)")]
    DepthOutOfRange(usize),
    #[error("no legal moves remain")]
    NoMoves,
    #[error("a computer search is already running")]
    SearchInProgress,
    #[error("search was cancelled")]
    SearchCancelled,
    #[error("search worker exited without a result")]
    SearchAborted,
}
