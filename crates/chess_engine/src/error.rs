//! Error types for chess engine
//!
//! Covers the input side of the engine: positions that cannot be parsed or
//! are not legal, and request vocabulary (side, difficulty) that does not map
//! onto a known value.

use thiserror::Error;

/// Errors that can occur in the chess engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// FEN text could not be parsed
    #[error("Invalid FEN: {fen}")]
    InvalidFen { fen: String },

    /// FEN parsed but does not describe a legal position
    #[error("Illegal position: {fen}")]
    IllegalPosition { fen: String },

    /// Side string was neither `white` nor `black`
    #[error("Unknown side: {value} (expected white or black)")]
    UnknownSide { value: String },

    /// Difficulty string was not one of the known tiers
    #[error("Unknown difficulty: {value} (expected easy, medium or hard)")]
    UnknownDifficulty { value: String },
}

/// Result type alias for chess engine operations
pub type EngineResult<T> = Result<T, EngineError>;
