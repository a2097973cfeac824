//! # Chess Engine
//!
//! Move selection for the chess move service: a `shakmaty`-backed rules
//! adapter, a material and mobility evaluator, move ordering, a shallow
//! alpha-beta search with difficulty-dependent noise, and a tiny opening book.
//!
//! The engine is synchronous and allocation-light; the service layer decides
//! when to call it and on which thread.

pub mod api;
pub mod book;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod search;
pub mod types;

pub use api::{legal_candidates, parse_position, position_key};
pub use book::OpeningBook;
pub use error::{EngineError, EngineResult};
pub use evaluation::evaluate_position;
pub use search::{best_move, search_move};
pub use types::{Candidate, Difficulty, GamePhase, Side};

/// Re-export of the rules library so dependants use the same version
pub use shakmaty;
