//! Human versus computer session over one owned board.
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::{Board, Chip, Position};
use crate::error::GameError;
use crate::search::{choose_move, Difficulty, Move};
use crate::task::SearchTask;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "status", content = "winner")]
pub enum GameStatus {
    InProgress,
    Won(Chip),
    Tie,
}

impl GameStatus {
    pub fn of(board: &Board) -> Self {
        match (board.done(), board.winner()) {
            (false, _) => GameStatus::InProgress,
            (true, Some(chip)) => GameStatus::Won(chip),
            (true, None) => GameStatus::Tie,
        }
    }
}

/// The player always moves first, including after [`Game::reset`].
///
/// At most one background search runs per game. It is held here until its
/// column is applied, and dropped (which cancels it) on reset.
#[derive(Debug)]
pub struct Game {
    board: Board,
    difficulty: Difficulty,
    turn: Chip,
    search: Option<SearchTask>,
}

impl Game {
    pub fn new(columns: usize, rows: usize, difficulty: Difficulty) -> Result<Self, GameError> {
        Ok(Self::with_board(Board::new(columns, rows)?, difficulty))
    }

    pub fn standard(difficulty: Difficulty) -> Self {
        Self::with_board(Board::standard(), difficulty)
    }

    fn with_board(board: Board, difficulty: Difficulty) -> Self {
        Self {
            board,
            difficulty,
            turn: Chip::Player,
            search: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Chip {
        self.turn
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Takes effect on the next computer turn.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn status(&self) -> GameStatus {
        GameStatus::of(&self.board)
    }

    /// Drops the player's chip. A rejected column leaves the turn with the player.
    pub fn play_player(&mut self, column: usize) -> Result<Position, GameError> {
        self.play(Chip::Player, column)
    }

    /// Searches and plays the computer's move on the calling thread.
    pub fn play_computer(&mut self) -> Result<Position, GameError> {
        self.expect_turn(Chip::Computer)?;
        self.expect_idle()?;
        let column = choose_move(&self.board, self.difficulty.depth())?;
        self.play(Chip::Computer, column)
    }

    /// Starts the computer's search on a background thread. Follow up with
    /// [`Game::poll_computer_turn`] or [`Game::wait_computer_turn`].
    pub fn begin_computer_turn(&mut self) -> Result<(), GameError> {
        self.expect_turn(Chip::Computer)?;
        self.expect_idle()?;
        if self.board.done() {
            return Err(GameError::GameOver);
        }
        self.search = Some(SearchTask::spawn(self.board.clone(), self.difficulty.depth()));
        Ok(())
    }

    pub fn is_thinking(&self) -> bool {
        self.search.is_some()
    }

    /// Plays the background search's column once it is ready.
    pub fn poll_computer_turn(&mut self) -> Option<Result<Position, GameError>> {
        let result = self.search.as_mut()?.poll()?;
        self.search = None;
        Some(result.and_then(|mv| self.play_searched(mv)))
    }

    /// Blocks on the background search, starting one if none is running.
    pub fn wait_computer_turn(&mut self) -> Result<Position, GameError> {
        if self.search.is_none() {
            self.begin_computer_turn()?;
        }
        let task = self.search.take().ok_or(GameError::SearchAborted)?;
        let mv = task.wait()?;
        self.play_searched(mv)
    }

    /// Plays `column` for the computer, abandoning any running search.
    pub fn apply_computer_move(&mut self, column: usize) -> Result<Position, GameError> {
        self.expect_turn(Chip::Computer)?;
        self.search = None;
        self.play(Chip::Computer, column)
    }

    pub fn reset(&mut self) {
        self.search = None;
        self.board.initialize();
        self.turn = Chip::Player;
    }

    fn play_searched(&mut self, mv: Move) -> Result<Position, GameError> {
        let column = mv.column.ok_or(GameError::NoMoves)?;
        self.play(Chip::Computer, column)
    }

    fn expect_idle(&self) -> Result<(), GameError> {
        if self.search.is_some() {
            return Err(GameError::SearchInProgress);
        }
        Ok(())
    }

    fn expect_turn(&self, chip: Chip) -> Result<(), GameError> {
        if self.turn != chip {
            return Err(GameError::OutOfTurn {
                expected: self.turn,
            });
        }
        Ok(())
    }

    fn play(&mut self, chip: Chip, column: usize) -> Result<Position, GameError> {
        self.expect_turn(chip)?;
        let pos = self.board.drop_chip(chip, column)?;
        self.turn = chip.opponent();
        if self.board.done() {
            info!(status = ?self.status(), moves = self.board.moves_played(), "game over");
        }
        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_alternate() {
        let mut game = Game::standard(Difficulty::Easy);
        assert_eq!(game.turn(), Chip::Player);
        game.play_player(3).unwrap();
        assert_eq!(game.turn(), Chip::Computer);
        assert_eq!(
            game.play_player(3),
            Err(GameError::OutOfTurn {
                expected: Chip::Computer
            })
        );
        let pos = game.play_computer().unwrap();
        assert!(pos.column < 7);
        assert_eq!(game.turn(), Chip::Player);
    }

    #[test]
    fn rejected_column_keeps_player_turn() {
        let mut game = Game::new(3, 1, Difficulty::Easy).unwrap();
        game.play_player(0).unwrap();
        game.apply_computer_move(1).unwrap();
        assert_eq!(
            game.play_player(0),
            Err(GameError::ColumnFull { column: 0 })
        );
        assert_eq!(
            game.play_player(5),
            Err(GameError::ColumnOutOfRange { column: 5 })
        );
        assert_eq!(game.turn(), Chip::Player);
        game.play_player(2).unwrap();
        assert_eq!(game.status(), GameStatus::Tie);
    }

    #[test]
    fn background_turn_applies_search_result() {
        let mut game = Game::standard(Difficulty::Easy);
        game.play_player(0).unwrap();
        game.begin_computer_turn().unwrap();
        assert!(game.is_thinking());
        let pos = loop {
            if let Some(result) = game.poll_computer_turn() {
                break result.unwrap();
            }
            std::thread::sleep(std::time::Duration::from_millis(1));
        };
        assert!(pos.column < 7);
        assert!(!game.is_thinking());
        assert_eq!(game.board().moves_played(), 2);
        assert_eq!(game.turn(), Chip::Player);
    }

    #[test]
    fn only_one_search_per_game() {
        let mut game = Game::standard(Difficulty::Hard);
        game.play_player(3).unwrap();
        game.begin_computer_turn().unwrap();
        assert_eq!(game.begin_computer_turn(), Err(GameError::SearchInProgress));
        assert_eq!(game.play_computer(), Err(GameError::SearchInProgress));

        game.apply_computer_move(3).unwrap();
        assert!(!game.is_thinking());
        game.play_player(4).unwrap();
        game.begin_computer_turn().unwrap();
        game.reset();
        assert!(!game.is_thinking());
        assert_eq!(game.turn(), Chip::Player);
    }

    #[test]
    fn wait_starts_and_finishes_a_search() {
        let mut game = Game::standard(Difficulty::Easy);
        game.play_player(6).unwrap();
        game.wait_computer_turn().unwrap();
        assert_eq!(game.turn(), Chip::Player);
        assert_eq!(game.board().moves_played(), 2);
    }

    #[test]
    fn zero_sized_game_is_rejected() {
        assert_eq!(
            Game::new(0, 0, Difficulty::Easy).unwrap_err(),
            GameError::InvalidDimensions { columns: 0, rows: 0 }
        );
    }

    #[test]
    fn computer_finishes_the_game() {
        let mut game = Game::standard(Difficulty::Medium);
        for col in [0, 0, 0] {
            game.play_player(6).unwrap();
            game.apply_computer_move(col).unwrap();
        }
        game.play_player(5).unwrap();
        game.play_computer().unwrap();
        assert_eq!(game.status(), GameStatus::Won(Chip::Computer));
        assert_eq!(game.play_player(1), Err(GameError::GameOver));
    }

    #[test]
    fn reset_returns_to_player_turn() {
        let mut game = Game::standard(Difficulty::Hard);
        game.play_player(2).unwrap();
        game.set_difficulty(Difficulty::Easy);
        game.reset();
        assert_eq!(game.turn(), Chip::Player);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.board().moves_played(), 0);
        assert_eq!(game.difficulty(), Difficulty::Easy);
    }

    #[test]
    fn status_serializes_with_winner() {
        let json = serde_json::to_string(&GameStatus::Won(Chip::Player)).unwrap();
        assert_eq!(json, r#"{"status":"won","winner":"player"}"#);
        let json = serde_json::to_string(&GameStatus::Tie).unwrap();
        assert_eq!(json, r#"{"status":"tie"}"#);
    }
}
