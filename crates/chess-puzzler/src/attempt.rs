//! One solver's attempt at one puzzle: a `SolverSession` driven against a
//! rules oracle and a caller-owned board history.
//!
//! Everything here is synchronous. Animation delays (showing a wrong move
//! before it snaps back, pausing before the opponent reply) are left to the
//! caller, which decides when to call `retry` and `play_opponent_reply`.

use chess_core::{BoardHistory, BoardStatus, MoveRequest, RulesOracle};
use serde::Serialize;

use crate::error::PuzzleError;
use crate::puzzle::Puzzle;
use crate::session::{MoveOutcome, Outcome, Progress, SolverSession};

/// What happened to a solver move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayResult {
    pub outcome: MoveOutcome,
    /// Canonical notation of the move as played.
    pub played: String,
    /// Scripted reply the caller should play next, if any.
    pub opponent_reply: Option<String>,
}

pub struct PuzzleAttempt<O: RulesOracle> {
    oracle: O,
    session: SolverSession,
    board: BoardHistory<O::Position>,
}

impl<O: RulesOracle> PuzzleAttempt<O> {
    pub fn new(oracle: O, puzzle: &Puzzle) -> Result<Self, PuzzleError> {
        let session = SolverSession::new(puzzle.solution.clone())?;
        let start = oracle.load(&puzzle.starting_position)?;
        Ok(Self {
            oracle,
            session,
            board: BoardHistory::new(start),
        })
    }

    /// Play a solver move. Illegal moves leave everything untouched; a legal
    /// but wrong move stays on the board until `retry`.
    pub fn play(&mut self, request: MoveRequest) -> Result<PlayResult, PuzzleError> {
        if self.session.outcome() != Outcome::InProgress {
            return Err(PuzzleError::PuzzleAlreadyResolved);
        }
        if self.session.reply_pending() {
            return Err(PuzzleError::AwaitingOpponentReply);
        }

        let applied = self.oracle.apply_move(self.board.current(), request)?;
        let outcome = self.session.attempt_move(&applied.notation)?;
        self.board.push(applied.position);

        tracing::debug!(played = %applied.notation, ?outcome, "solver move");

        Ok(PlayResult {
            outcome,
            played: applied.notation,
            opponent_reply: self.session.next_opponent_reply().map(str::to_string),
        })
    }

    /// Play the pending scripted reply and return its notation.
    pub fn play_opponent_reply(&mut self) -> Result<String, PuzzleError> {
        let reply = self
            .session
            .next_opponent_reply()
            .ok_or(PuzzleError::NoReplyPending)?
            .to_string();

        let applied = self.oracle.apply_notation(self.board.current(), &reply)?;
        self.session.confirm_opponent_reply_applied()?;
        self.board.push(applied.position);
        Ok(applied.notation)
    }

    /// Take back a rejected move and let the solver try again.
    pub fn retry(&mut self) -> Result<(), PuzzleError> {
        if self.session.outcome() == Outcome::FailedAwaitingRetry {
            self.board.undo()?;
        }
        self.session.retry()
    }

    pub fn reset(&mut self) {
        self.board.rewind();
        self.session.reset();
    }

    pub fn fen(&self) -> String {
        self.oracle.fen(self.board.current())
    }

    pub fn status(&self) -> BoardStatus {
        self.oracle.status(self.board.current())
    }

    pub fn progress(&self) -> Progress {
        self.session.progress()
    }

    pub fn outcome(&self) -> Outcome {
        self.session.outcome()
    }

    pub fn session(&self) -> &SolverSession {
        &self.session
    }

    /// Moves on the board since the puzzle position, including a rejected one.
    pub fn plies_played(&self) -> usize {
        self.board.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{ShakmatyOracle, Side};

    fn back_rank_line() -> Puzzle {
        Puzzle {
            id: "backrank".to_string(),
            starting_position: "2r3k1/5ppp/8/8/8/q7/3Q1PPP/2R3K1 b - - 0 1".to_string(),
            solution: ["c8c1", "d2c1", "a3e3"].iter().map(|m| m.to_string()).collect(),
            solver_side: Side::Black,
            rating: None,
            themes: vec![],
        }
    }

    fn mv(uci: &str) -> MoveRequest {
        MoveRequest::from_uci(uci).unwrap()
    }

    #[test]
    fn test_full_line() {
        let mut attempt = PuzzleAttempt::new(ShakmatyOracle, &back_rank_line()).unwrap();

        let result = attempt.play(mv("c8c1")).unwrap();
        assert_eq!(result.outcome, MoveOutcome::AcceptedAwaitingOpponentReply);
        assert_eq!(result.opponent_reply.as_deref(), Some("d2c1"));
        assert!(attempt.status().in_check);

        assert_eq!(attempt.play_opponent_reply().unwrap(), "d2c1");
        assert_eq!(attempt.progress().cursor, 2);

        let result = attempt.play(mv("a3e3")).unwrap();
        assert_eq!(result.outcome, MoveOutcome::AcceptedPuzzleComplete);
        assert_eq!(result.opponent_reply, None);
        assert_eq!(attempt.outcome(), Outcome::Solved);
        assert_eq!(attempt.plies_played(), 3);
    }

    #[test]
    fn test_illegal_move_changes_nothing() {
        let mut attempt = PuzzleAttempt::new(ShakmatyOracle, &back_rank_line()).unwrap();
        let before = attempt.fen();

        let err = attempt.play(mv("g8g7")).unwrap_err();
        assert!(matches!(err, PuzzleError::Oracle(_)));
        assert_eq!(attempt.fen(), before);
        assert_eq!(attempt.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_wrong_move_stays_until_retry() {
        let mut attempt = PuzzleAttempt::new(ShakmatyOracle, &back_rank_line()).unwrap();
        let before = attempt.fen();

        let result = attempt.play(mv("a3a2")).unwrap();
        assert_eq!(result.outcome, MoveOutcome::Rejected);
        assert_eq!(attempt.outcome(), Outcome::FailedAwaitingRetry);
        assert_ne!(attempt.fen(), before);
        assert_eq!(attempt.play(mv("c8c1")), Err(PuzzleError::PuzzleAlreadyResolved));

        attempt.retry().unwrap();
        assert_eq!(attempt.fen(), before);
        assert_eq!(attempt.outcome(), Outcome::InProgress);
        assert_eq!(
            attempt.play(mv("c8c1")).unwrap().outcome,
            MoveOutcome::AcceptedAwaitingOpponentReply
        );
    }

    #[test]
    fn test_reply_out_of_sequence() {
        let mut attempt = PuzzleAttempt::new(ShakmatyOracle, &back_rank_line()).unwrap();
        assert_eq!(attempt.play_opponent_reply(), Err(PuzzleError::NoReplyPending));

        attempt.play(mv("c8c1")).unwrap();
        assert_eq!(attempt.play(mv("g8f8")), Err(PuzzleError::AwaitingOpponentReply));
    }

    #[test]
    fn test_reset_rewinds_board() {
        let puzzle = back_rank_line();
        let mut attempt = PuzzleAttempt::new(ShakmatyOracle, &puzzle).unwrap();
        attempt.play(mv("c8c1")).unwrap();
        attempt.play_opponent_reply().unwrap();

        attempt.reset();
        assert_eq!(attempt.fen(), puzzle.starting_position);
        assert_eq!(attempt.progress().cursor, 0);
        assert_eq!(attempt.plies_played(), 0);
    }
}
