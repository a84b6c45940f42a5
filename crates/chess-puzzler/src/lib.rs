//! Chess puzzle solving: the puzzle model, the solution tracker and the
//! glue that drives a tracker against a rules oracle.

pub mod attempt;
pub mod error;
pub mod puzzle;
pub mod session;
pub mod source;

pub use chess_core;

pub use attempt::{PlayResult, PuzzleAttempt};
pub use error::PuzzleError;
pub use puzzle::{Puzzle, PuzzleDefinition, SolutionConvention};
pub use session::{MoveOutcome, Outcome, Progress, SolverSession};
pub use source::{PuzzleRequest, PuzzleSource, SourceError};
