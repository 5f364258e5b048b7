//! Minimax with alpha-beta pruning.
//!
//! The computer is the maximizing side, the player the minimizing side.
//! Candidates are tried in ascending column order and only a strictly better
//! score replaces the current best, so the lowest column wins ties.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, Chip};
use crate::error::GameError;
use crate::eval::evaluate;

/// Deepest ply budget accepted from callers.
pub const MAX_DEPTH: usize = 15;

/// A column choice and the score backing it. `column` is `None` at leaves.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Move {
    pub column: Option<usize>,
    pub score: i32,
}

impl Move {
    fn leaf(board: &Board) -> Self {
        Self {
            column: None,
            score: evaluate(board),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn depth(self) -> usize {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 5,
            Difficulty::Hard => 8,
        }
    }
}

/// Runs one search. Counts visited nodes and honours an optional
/// cancellation flag shared with another thread.
#[derive(Debug, Default)]
pub struct Searcher {
    /// Nodes visited so far (diagnostics only).
    pub nodes: u64,
    cancel: Option<Arc<AtomicBool>>,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel_flag(cancel: Arc<AtomicBool>) -> Self {
        Self {
            nodes: 0,
            cancel: Some(cancel),
        }
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Top-level search from the computer's point of view.
    pub fn run(&mut self, board: &Board, depth: usize) -> Result<Move, GameError> {
        check_request(board, depth)?;
        let start = Instant::now();
        let best = self.maximize(board, depth, i32::MIN, i32::MAX);
        if self.cancelled() {
            return Err(GameError::SearchCancelled);
        }
        if best.column.is_none() {
            return Err(GameError::NoMoves);
        }
        debug!(
            depth,
            column = ?best.column,
            score = best.score,
            nodes = self.nodes,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search finished"
        );
        Ok(best)
    }

    pub fn maximize(&mut self, board: &Board, depth: usize, mut alpha: i32, beta: i32) -> Move {
        self.nodes += 1;
        if depth == 0 || board.done() {
            return Move::leaf(board);
        }

        let mut best: Option<Move> = None;
        for col in board.available_columns() {
            if self.cancelled() {
                break;
            }
            let child = board
                .apply_to_clone(Chip::Computer, col)
                .expect("available column must accept a chip");
            let reply = self.minimize(&child, depth - 1, alpha, beta);
            if best.map_or(true, |b| reply.score > b.score) {
                best = Some(Move {
                    column: Some(col),
                    score: reply.score,
                });
                alpha = alpha.max(reply.score);
            }
            if alpha >= beta {
                break;
            }
        }
        best.unwrap_or_else(|| Move::leaf(board))
    }

    pub fn minimize(&mut self, board: &Board, depth: usize, alpha: i32, mut beta: i32) -> Move {
        self.nodes += 1;
        if depth == 0 || board.done() {
            return Move::leaf(board);
        }

        let mut best: Option<Move> = None;
        for col in board.available_columns() {
            if self.cancelled() {
                break;
            }
            let child = board
                .apply_to_clone(Chip::Player, col)
                .expect("available column must accept a chip");
            let reply = self.maximize(&child, depth - 1, alpha, beta);
            if best.map_or(true, |b| reply.score < b.score) {
                best = Some(Move {
                    column: Some(col),
                    score: reply.score,
                });
                beta = beta.min(reply.score);
            }
            if alpha >= beta {
                break;
            }
        }
        best.unwrap_or_else(|| Move::leaf(board))
    }
}

fn check_request(board: &Board, depth: usize) -> Result<(), GameError> {
    if !(1..=MAX_DEPTH).contains(&depth) {
        return Err(GameError::DepthOutOfRange(depth));
    }
    if board.done() {
        return Err(GameError::GameOver);
    }
    Ok(())
}

/// Picks the computer's column for `board` with a `depth`-ply search.
pub fn choose_move(board: &Board, depth: usize) -> Result<usize, GameError> {
    let best = Searcher::new().run(board, depth)?;
    best.column.ok_or(GameError::NoMoves)
}

/// Like [`choose_move`], but searches each top-level column on the rayon pool.
///
/// Every root candidate gets the full window, so there is no pruning across
/// root branches. The reduction keeps the lowest column among equal scores.
pub fn choose_move_parallel(board: &Board, depth: usize) -> Result<usize, GameError> {
    check_request(board, depth)?;
    let scored: Vec<(usize, i32, u64)> = board
        .available_columns()
        .into_par_iter()
        .map(|col| {
            let child = board
                .apply_to_clone(Chip::Computer, col)
                .expect("available column must accept a chip");
            let mut searcher = Searcher::new();
            let reply = searcher.minimize(&child, depth - 1, i32::MIN, i32::MAX);
            (col, reply.score, searcher.nodes)
        })
        .collect();

    let mut best: Option<(usize, i32)> = None;
    for &(col, score, _) in &scored {
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((col, score));
        }
    }
    let nodes: u64 = scored.iter().map(|&(_, _, n)| n).sum();
    let (column, score) = best.ok_or(GameError::NoMoves)?;
    debug!(depth, column, score, nodes, "parallel search finished");
    Ok(column)
}

/// Plain minimax without pruning. Same move order and tie-break as
/// [`Searcher::maximize`]; exponentially slower.
pub fn minimax(board: &Board, depth: usize) -> Move {
    minimax_for(board, depth, Chip::Computer)
}

fn minimax_for(board: &Board, depth: usize, side: Chip) -> Move {
    if depth == 0 || board.done() {
        return Move::leaf(board);
    }
    let mut best: Option<Move> = None;
    for col in board.available_columns() {
        let child = board
            .apply_to_clone(side, col)
            .expect("available column must accept a chip");
        let score = minimax_for(&child, depth - 1, side.opponent()).score;
        let better = match (best, side) {
            (None, _) => true,
            (Some(b), Chip::Computer) => score > b.score,
            (Some(b), Chip::Player) => score < b.score,
        };
        if better {
            best = Some(Move {
                column: Some(col),
                score,
            });
        }
    }
    best.unwrap_or_else(|| Move::leaf(board))
}
