//! Puzzle error types

use chess_core::OracleError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Puzzle is already resolved")]
    PuzzleAlreadyResolved,

    #[error("No opponent reply is pending")]
    NoReplyPending,

    #[error("Waiting for the opponent reply to be applied")]
    AwaitingOpponentReply,

    #[error("Malformed puzzle: {0}")]
    MalformedPuzzle(String),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}
