use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Invalid move notation: {0}")]
    InvalidNotation(String),

    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("Nothing to undo")]
    NothingToUndo,
}
