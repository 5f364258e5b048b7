//! Stateless entry points: the caller sends the whole move history each time.
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, Chip};
use crate::error::GameError;
use crate::history::{parse_history, replay};
use crate::search::{Difficulty, Searcher};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub position: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub column: usize,
    pub score: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateResponse {
    pub columns: usize,
    pub rows: usize,
    pub available: Vec<usize>,
    pub done: bool,
    pub winner: Option<Chip>,
}

fn board_from_history(position: &str) -> Result<Board, GameError> {
    let mut board = Board::standard();
    let moves = parse_history(position, board.columns())?;
    replay(&mut board, &moves)?;
    Ok(board)
}

/// Computer's reply to the position reached by `request.position`.
pub fn best_move(request: MoveRequest) -> Result<MoveResponse, GameError> {
    let board = board_from_history(&request.position)?;
    let depth = request.difficulty.depth();
    let mut searcher = Searcher::new();
    let best = searcher.run(&board, depth)?;
    let column = best.column.ok_or(GameError::NoMoves)?;
    debug!(
        position = %request.position,
        difficulty = ?request.difficulty,
        column,
        "best move"
    );
    Ok(MoveResponse {
        column,
        score: best.score,
    })
}

pub fn board_state(position: &str) -> Result<StateResponse, GameError> {
    let board = board_from_history(position)?;
    Ok(StateResponse {
        columns: board.columns(),
        rows: board.rows(),
        available: board.available_columns(),
        done: board.done(),
        winner: board.winner(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::WIN_SCORE;

    #[test]
    fn completes_bottom_row_before_player_stacks_four() {
        // Computer holds 1, 2, 3 on the bottom row while the player threatens column 6.
        let res = best_move(MoveRequest {
            position: "P6C1P6C2P6C3".to_string(),
            difficulty: Difficulty::Hard,
        })
        .unwrap();
        assert_eq!(res.column, 0);
        assert_eq!(res.score, WIN_SCORE);
    }

    #[test]
    fn blocks_player_column_of_three() {
        let res = best_move(MoveRequest {
            position: "P0C1P0C1P0C2".to_string(),
            difficulty: Difficulty::Medium,
        })
        .unwrap();
        assert_eq!(res.column, 0);
    }

    #[test]
    fn finished_game_is_rejected() {
        let res = best_move(MoveRequest {
            position: "P0C1P0C1P0C1P0".to_string(),
            difficulty: Difficulty::Easy,
        });
        assert_eq!(res, Err(GameError::GameOver));
    }

    #[test]
    fn state_reports_winner_and_columns() {
        let state = board_state("P0C1P0C1P0C1P0").unwrap();
        assert!(state.done);
        assert_eq!(state.winner, Some(Chip::Player));
        assert_eq!(state.available, vec![0, 1, 2, 3, 4, 5, 6]);

        let state = board_state("").unwrap();
        assert_eq!((state.columns, state.rows), (7, 6));
        assert!(!state.done);
    }

    #[test]
    fn request_difficulty_defaults_to_medium() {
        let req: MoveRequest = serde_json::from_str(r#"{"position":"P3"}"#).unwrap();
        assert_eq!(req.difficulty, Difficulty::Medium);
        let req: MoveRequest =
            serde_json::from_str(r#"{"position":"","difficulty":"hard"}"#).unwrap();
        assert_eq!(req.difficulty, Difficulty::Hard);
    }
}
