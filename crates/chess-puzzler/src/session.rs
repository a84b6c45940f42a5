//! Puzzle solution tracking.
//!
//! A `SolverSession` walks a puzzle's solution line with a cursor. Even
//! indices (0, 2, 4, ...) belong to the solver, odd indices are the scripted
//! opponent replies. The alternation comes from the line itself, never from
//! whose turn the board says it is.
//!
//! ```text
//! InProgress --(match, more moves)--> InProgress (reply pending)
//! InProgress --(match, last move)---> Solved
//! InProgress --(mismatch)-----------> FailedAwaitingRetry
//! FailedAwaitingRetry --(retry)-----> InProgress   (cursor kept)
//! any --(reset)---------------------> InProgress   (cursor = 0)
//! ```
//!
//! The session never touches a board. Legality and board updates belong to
//! the caller's rules oracle; this type only compares notation strings.

use std::sync::Arc;

use serde::Serialize;

use crate::error::PuzzleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    InProgress,
    FailedAwaitingRetry,
    Solved,
}

/// Verdict on a single solver move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOutcome {
    Rejected,
    AcceptedAwaitingOpponentReply,
    AcceptedPuzzleComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub cursor: usize,
    pub total: usize,
    pub percentage: u8,
}

#[derive(Debug, Clone)]
pub struct SolverSession {
    solution: Arc<[String]>,
    cursor: usize,
    outcome: Outcome,
    reply_pending: bool,
}

impl SolverSession {
    /// Start tracking a solution line. An empty line is rejected up front.
    pub fn new(solution: impl Into<Arc<[String]>>) -> Result<Self, PuzzleError> {
        let solution = solution.into();
        if solution.is_empty() {
            return Err(PuzzleError::MalformedPuzzle(
                "solution sequence is empty".to_string(),
            ));
        }
        Ok(Self {
            solution,
            cursor: 0,
            outcome: Outcome::InProgress,
            reply_pending: false,
        })
    }

    /// Compare the solver's move (canonical notation, already legal on the
    /// board) against the expected move at the cursor.
    pub fn attempt_move(&mut self, proposed: &str) -> Result<MoveOutcome, PuzzleError> {
        if self.outcome != Outcome::InProgress || self.cursor >= self.solution.len() {
            return Err(PuzzleError::PuzzleAlreadyResolved);
        }
        if self.reply_pending {
            return Err(PuzzleError::AwaitingOpponentReply);
        }

        if proposed != self.solution[self.cursor] {
            self.outcome = Outcome::FailedAwaitingRetry;
            return Ok(MoveOutcome::Rejected);
        }

        self.cursor += 1;
        if self.cursor == self.solution.len() {
            self.outcome = Outcome::Solved;
            Ok(MoveOutcome::AcceptedPuzzleComplete)
        } else {
            self.reply_pending = true;
            Ok(MoveOutcome::AcceptedAwaitingOpponentReply)
        }
    }

    /// The scripted reply to play next, if the last solver move asked for one.
    pub fn next_opponent_reply(&self) -> Option<&str> {
        if self.reply_pending {
            self.solution.get(self.cursor).map(String::as_str)
        } else {
            None
        }
    }

    /// Record that the caller has played the scripted reply on its board.
    pub fn confirm_opponent_reply_applied(&mut self) -> Result<(), PuzzleError> {
        if !self.reply_pending {
            return Err(PuzzleError::NoReplyPending);
        }
        self.reply_pending = false;
        self.cursor += 1;
        if self.cursor == self.solution.len() {
            self.outcome = Outcome::Solved;
        }
        Ok(())
    }

    /// Acknowledge a rejected move. The same expected move stays pending.
    pub fn retry(&mut self) -> Result<(), PuzzleError> {
        match self.outcome {
            Outcome::Solved => Err(PuzzleError::PuzzleAlreadyResolved),
            Outcome::FailedAwaitingRetry | Outcome::InProgress => {
                self.outcome = Outcome::InProgress;
                Ok(())
            }
        }
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
        self.outcome = Outcome::InProgress;
        self.reply_pending = false;
    }

    pub fn progress(&self) -> Progress {
        let total = self.solution.len();
        let percentage = if total == 0 {
            0
        } else {
            // Round half up, clamp to 100.
            ((200 * self.cursor + total) / (2 * total)).min(100) as u8
        };
        Progress {
            cursor: self.cursor,
            total,
            percentage,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn reply_pending(&self) -> bool {
        self.reply_pending
    }

    pub fn is_solver_turn(&self) -> bool {
        self.cursor % 2 == 0
    }

    /// Move expected at the cursor, from either side.
    pub fn expected_move(&self) -> Option<&str> {
        self.solution.get(self.cursor).map(String::as_str)
    }

    pub fn solution(&self) -> &[String] {
        &self.solution
    }
}
