//! Connect 4 engine with a minimax/alpha-beta computer opponent.
//!
//! [`Board`] owns the grid and terminal state, [`search`] picks the
//! computer's column, and [`SearchTask`] runs that search off the caller's
//! thread. The computer always maximizes; positive scores favor it.
pub mod api;
pub mod board;
pub mod detect;
pub mod error;
pub mod eval;
pub mod game;
pub mod history;
pub mod search;
pub mod task;

pub use api::{best_move, board_state, MoveRequest, MoveResponse, StateResponse};
pub use board::{Board, Chip, Position, STANDARD_COLUMNS, STANDARD_ROWS};
pub use error::GameError;
pub use eval::{evaluate, LOSS_SCORE, WIN_SCORE};
pub use game::{Game, GameStatus};
pub use history::{parse_history, replay, TypedMove};
pub use search::{
    choose_move, choose_move_parallel, minimax, Difficulty, Move, Searcher, MAX_DEPTH,
};
pub use task::SearchTask;
