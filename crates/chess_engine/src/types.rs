//! # Engine Vocabulary Types
//!
//! The small set of values every layer of the move service speaks:
//!
//! - [`Side`]: which colour a request is for. Parsed from the `"white"` /
//!   `"black"` strings used on the wire and convertible to and from
//!   [`shakmaty::Color`].
//! - [`Difficulty`]: the tier bundle. One value decides the search depth, the
//!   amount of noise mixed into root scores, and whether the remote advisor
//!   may be asked at all.
//! - [`GamePhase`]: a coarse label derived from the full-move number, used to
//!   steer the remote advisor's prompt.
//! - [`Candidate`]: a legal move together with every notation the service
//!   needs (SAN for clients and the book, UCI for matching advisor answers)
//!   and the tactical flags the search and move ordering look at.
//!
//! ## Difficulty Table
//!
//! | Difficulty | Depth | Noise range | Remote advisor |
//! |------------|-------|-------------|----------------|
//! | Easy       | 2     | 100 (±50)   | no             |
//! | Medium     | 3     | 50 (±25)    | no             |
//! | Hard       | 4     | 20 (±10)    | yes            |

use std::fmt;
use std::str::FromStr;

use shakmaty::{Color, Move};

use crate::error::EngineError;

/// The side a move is requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }

    pub fn from_color(color: Color) -> Self {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Side::White),
            "black" | "b" => Ok(Side::Black),
            _ => Err(EngineError::UnknownSide {
                value: s.to_string(),
            }),
        }
    }
}

/// AI difficulty tiers
///
/// Requests that omit a difficulty play at [`Difficulty::Hard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    /// Depth 2, wide noise. Misses anything deeper than a one-move reply.
    Easy,

    /// Depth 3, moderate noise.
    Medium,

    /// Depth 4, narrow noise, tactically biased candidate pool, and the only
    /// tier allowed to consult the remote advisor.
    #[default]
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Search depth in plies, counting the root move itself
    pub fn search_depth(self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
        }
    }

    /// Full width of the uniform noise interval added to root scores
    ///
    /// The noise is drawn as `(r - 0.5) * range` with `r` uniform in `[0, 1)`,
    /// so the half-width is `range / 2`.
    pub fn noise_range(self) -> f64 {
        match self {
            Difficulty::Easy => 100.0,
            Difficulty::Medium => 50.0,
            Difficulty::Hard => 20.0,
        }
    }

    pub fn allows_remote_advisor(self) -> bool {
        matches!(self, Difficulty::Hard)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(EngineError::UnknownDifficulty {
                value: s.to_string(),
            }),
        }
    }
}

/// Coarse game phase used to steer the remote advisor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Opening,
    Middlegame,
    Endgame,
}

impl GamePhase {
    pub fn from_fullmoves(fullmoves: u32) -> Self {
        if fullmoves < 10 {
            GamePhase::Opening
        } else if fullmoves < 25 {
            GamePhase::Middlegame
        } else {
            GamePhase::Endgame
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GamePhase::Opening => "opening",
            GamePhase::Middlegame => "middlegame",
            GamePhase::Endgame => "endgame",
        }
    }

    pub fn guidance(self) -> &'static str {
        match self {
            GamePhase::Opening => "Control center, develop pieces, castle early",
            GamePhase::Middlegame => "Attack weaknesses, create threats, maintain king safety",
            GamePhase::Endgame => "Activate king, push passed pawns, calculate precisely",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A legal move with its notations and tactical flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub mv: Move,
    /// Standard algebraic notation including the `+` / `#` suffix
    pub san: String,
    /// Long algebraic (UCI) form, e.g. `e2e4`, `e7e8q`, `e1g1`
    pub uci: String,
    pub captured: bool,
    pub check: bool,
    pub mate: bool,
}

impl Candidate {
    /// Origin and destination squares concatenated, without promotion
    pub fn from_to(&self) -> &str {
        self.uci.get(..4).unwrap_or(&self.uci)
    }

    /// SAN without the check or mate suffix
    pub fn bare_san(&self) -> &str {
        self.san.trim_end_matches(['+', '#'])
    }
}
