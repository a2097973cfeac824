//! Error types for the move service
//!
//! Only [`ResolveError`] ever crosses the service boundary. Advisor failures
//! are logged and swallowed by the orchestrator; configuration errors stop
//! the process at start-up.

use chess_engine::{EngineError, Side};
use thiserror::Error;

/// Errors surfaced by move resolution
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Malformed request input (FEN, side or difficulty)
    #[error(transparent)]
    InvalidInput(#[from] EngineError),

    /// The requested side is not the side to move
    #[error("Not your turn: {side} requested but {to_move} is to move")]
    NotYourTurn { side: Side, to_move: Side },

    /// The position has no legal moves; the game is over
    #[error("No legal moves available")]
    NoLegalMoves,

    /// Anything else; recovered internally whenever a legal move exists
    #[error("Move resolution failed: {message}")]
    Internal { message: String },
}

/// Result type alias for move resolution
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors talking to the remote move advisor
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Advisor transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Advisor API error: status {status}")]
    Status { status: u16 },

    #[error("Advisor response malformed: {message}")]
    Malformed { message: String },
}

pub type AdvisorResult<T> = Result<T, AdvisorError>;

/// Errors reading service configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
