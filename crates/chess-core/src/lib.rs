//! Chess rules plumbing for the puzzle gate.
//!
//! Everything rules-related is delegated to shakmaty. This crate only adapts
//! it to the shape the puzzle tracker needs: canonical UCI notation, a
//! caller-owned position history, and a `RulesOracle` trait.

pub mod error;
pub mod history;
pub mod notation;
pub mod oracle;
pub mod pgn;

pub use error::OracleError;
pub use history::BoardHistory;
pub use notation::MoveRequest;
pub use oracle::{AppliedMove, BoardStatus, RulesOracle, ShakmatyOracle, Side};

pub const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
