//! Engine constants
//!
//! Piece values, score bounds and the tuning knobs shared by evaluation,
//! move ordering and the bounded search.

use shakmaty::Square;

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 20000;

/// Score of a checkmated position, signed towards the winner
pub const MATE_SCORE: i32 = 20000;

/// Bound used for the alpha-beta window; larger than any reachable score
pub const SCORE_INF: i32 = 1_000_000;

/// Centipawns per legal move of the side to move
pub const MOBILITY_WEIGHT: i32 = 5;

/// Fifty-move rule, counted in half-moves
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

// Move ordering bonuses
pub const ORDER_CAPTURE_BONUS: i32 = 100;
pub const ORDER_CHECK_BONUS: i32 = 80;
pub const ORDER_CENTER_BONUS: i32 = 30;

pub const CENTER_SQUARES: [Square; 4] = [Square::D4, Square::E4, Square::D5, Square::E5];

/// Quiet moves kept alongside tactical moves in the hard candidate pool
pub const TACTICAL_POOL_QUIET_MOVES: usize = 8;

/// Candidate pool size when no tactical bias applies
pub const DEFAULT_POOL_SIZE: usize = 12;

/// Opening book is only consulted up to this full-move number
pub const BOOK_MAX_FULLMOVE: u32 = 3;
