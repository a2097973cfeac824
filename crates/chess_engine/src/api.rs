//! Public API for the chess engine
//!
//! Thin adapter over `shakmaty`: parsing and canonicalising FEN, listing legal
//! moves in a fixed order with their notations, and applying a move.
//!
//! Legal moves are always returned in board-scan order (origin square a1..h8,
//! then destination square, then promotion piece). Candidate pools in the
//! search truncate this list, so the order has to be stable across rules
//! library versions.

use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Move, Position};

use crate::constants::FIFTY_MOVE_HALFMOVES;
use crate::error::{EngineError, EngineResult};
use crate::types::Candidate;

/// Parse a FEN string into a position
pub fn parse_position(fen: &str) -> EngineResult<Chess> {
    let setup: Fen = fen.trim().parse().map_err(|_| EngineError::InvalidFen {
        fen: fen.to_string(),
    })?;

    setup
        .into_position::<Chess>(CastlingMode::Standard)
        .map_err(|_| EngineError::IllegalPosition {
            fen: fen.to_string(),
        })
}

/// Canonical FEN of a position
///
/// The en-passant square is only written when a capture is actually
/// possible, so two spellings of the same position share one key.
pub fn position_key(pos: &Chess) -> String {
    Fen::from_position(pos.clone(), EnPassantMode::Legal).to_string()
}

/// Canonicalise a FEN string
pub fn canonical_fen(fen: &str) -> EngineResult<String> {
    parse_position(fen).map(|pos| position_key(&pos))
}

/// All legal moves of the side to move, in board-scan order
pub fn legal_candidates(pos: &Chess) -> Vec<Candidate> {
    let mut moves: Vec<Move> = pos.legal_moves().into_iter().collect();
    moves.sort_by_key(scan_key);
    moves.into_iter().map(|mv| describe_move(pos, mv)).collect()
}

fn scan_key(mv: &Move) -> (u32, u32, Option<char>) {
    (
        mv.from().map_or(0, u32::from),
        u32::from(mv.to()),
        mv.promotion().map(|role| role.char()),
    )
}

/// Build a [`Candidate`] for a legal move of `pos`
pub fn describe_move(pos: &Chess, mv: Move) -> Candidate {
    let san = San::from_move(pos, &mv).to_string();

    let mut after = pos.clone();
    after.play_unchecked(&mv);
    let mate = after.is_checkmate();
    let check = mate || after.is_check();

    let suffix = if mate {
        "#"
    } else if check {
        "+"
    } else {
        ""
    };

    Candidate {
        san: format!("{san}{suffix}"),
        uci: mv.to_uci(CastlingMode::Standard).to_string(),
        captured: mv.is_capture(),
        check,
        mate,
        mv,
    }
}

/// Position after playing `candidate`
pub fn apply(pos: &Chess, candidate: &Candidate) -> Chess {
    let mut next = pos.clone();
    next.play_unchecked(&candidate.mv);
    next
}

/// Find a legal move by its SAN, with or without the check suffix
pub fn find_by_san<'a>(candidates: &'a [Candidate], san: &str) -> Option<&'a Candidate> {
    let wanted = san.trim().trim_end_matches(['+', '#']);
    candidates.iter().find(|c| c.bare_san() == wanted)
}

/// Full-move number of the position
pub fn fullmoves(pos: &Chess) -> u32 {
    pos.fullmoves().get()
}

/// Draw by rule, independent of whether moves remain
///
/// Stalemate is detected by the caller from an empty move list. Repetition
/// cannot be judged from a single position and is not considered.
pub fn is_drawn_by_rule(pos: &Chess) -> bool {
    pos.is_insufficient_material() || pos.halfmoves() >= FIFTY_MOVE_HALFMOVES
}
