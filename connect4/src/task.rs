//! Background search for frame-driven callers.
//!
//! A [`SearchTask`] owns its own board snapshot and runs a [`Searcher`] on a
//! worker thread. The caller polls it once per frame (or blocks on
//! [`SearchTask::wait`]) and applies the column itself.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::board::Board;
use crate::error::GameError;
use crate::search::{Move, Searcher};

/// Dropping a task cancels its search.
#[derive(Debug)]
pub struct SearchTask {
    receiver: Receiver<Result<Move, GameError>>,
    cancel: Arc<AtomicBool>,
    started: Instant,
    finished: bool,
    worker: Option<JoinHandle<()>>,
}

impl SearchTask {
    pub fn spawn(board: Board, depth: usize) -> Self {
        let (tx, rx) = channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);

        let worker = thread::spawn(move || {
            let mut searcher = Searcher::with_cancel_flag(flag);
            let result = searcher.run(&board, depth);
            debug!(depth, nodes = searcher.nodes, "search task done");
            let _ = tx.send(result);
        });

        Self {
            receiver: rx,
            cancel,
            started: Instant::now(),
            finished: false,
            worker: Some(worker),
        }
    }

    /// Non-blocking check. Yields the result exactly once.
    pub fn poll(&mut self) -> Option<Result<Move, GameError>> {
        if self.finished {
            return None;
        }
        match self.receiver.try_recv() {
            Ok(result) => {
                self.finished = true;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                warn!("search worker exited without a result");
                self.finished = true;
                Some(Err(GameError::SearchAborted))
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Asks the worker to stop at its next loop iteration.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Blocks until the worker answers.
    pub fn wait(mut self) -> Result<Move, GameError> {
        if self.finished {
            return Err(GameError::SearchAborted);
        }
        let result = self.receiver.recv().unwrap_or(Err(GameError::SearchAborted));
        self.finished = true;
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        result
    }
}

impl Drop for SearchTask {
    fn drop(&mut self) {
        if !self.finished {
            self.cancel();
        }
    }
}
