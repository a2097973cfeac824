//! Position evaluation
//!
//! Scores positions from one side's point of view using:
//! - Terminal detection (checkmate, stalemate, draws by rule)
//! - Material count (piece values)
//! - Mobility (number of legal moves of the side to move)
//!
//! There are no piece-square tables.
//!
//! ## Module Organization
//!
//! - `material` - Material balance evaluation
//! - `position` - Full position evaluation (terminal + material + mobility)

mod material;
mod position;

pub use material::{evaluate_material, piece_value};
pub use position::evaluate_position;
