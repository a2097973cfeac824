//! Opening book
//!
//! A small fixed table from canonical FEN to candidate SAN moves. Lookups
//! only happen in the first few full moves of a game; a hit picks one of the
//! listed moves uniformly at random.

use std::collections::HashMap;

use rand::seq::IndexedRandom;
use rand::Rng;
use shakmaty::Chess;
use tracing::{debug, warn};

use crate::api::{canonical_fen, find_by_san, fullmoves, legal_candidates, position_key};
use crate::constants::BOOK_MAX_FULLMOVE;
use crate::error::EngineResult;
use crate::types::Candidate;

const STANDARD_LINES: [(&str, &[&str]); 3] = [
    (
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &["e4", "d4", "Nf3", "c4", "g3"],
    ),
    (
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        &["e5", "c5", "e6", "c6"],
    ),
    (
        "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq d3 0 1",
        &["d5", "Nf6", "e6", "g6"],
    ),
];

#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    by_position: HashMap<String, Vec<String>>,
}

impl OpeningBook {
    /// The built-in book: the initial position and the replies to 1.e4 and 1.d4
    pub fn standard() -> Self {
        let mut book = Self::default();
        for (fen, moves) in STANDARD_LINES {
            if let Err(e) = book.insert(fen, moves.iter().copied()) {
                warn!("[BOOK] Skipping built-in line: {}", e);
            }
        }
        book
    }

    /// Add a position with its candidate moves in SAN
    pub fn insert<'a>(
        &mut self,
        fen: &str,
        moves: impl IntoIterator<Item = &'a str>,
    ) -> EngineResult<()> {
        let key = canonical_fen(fen)?;
        let entry = self.by_position.entry(key).or_default();
        entry.extend(moves.into_iter().map(str::to_string));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.by_position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_position.is_empty()
    }

    /// Whether the book is consulted at all for this position
    pub fn in_scope(pos: &Chess) -> bool {
        fullmoves(pos) <= BOOK_MAX_FULLMOVE
    }

    /// Pick a book move for `pos`
    ///
    /// Returns `None` past the opening window, when the position is not in the
    /// book, or when the chosen book move is not legal here.
    pub fn lookup<R: Rng + ?Sized>(&self, pos: &Chess, rng: &mut R) -> Option<Candidate> {
        if !Self::in_scope(pos) {
            return None;
        }

        let moves = self.by_position.get(&position_key(pos))?;
        let san = moves.choose(rng)?;

        let legal = legal_candidates(pos);
        match find_by_san(&legal, san) {
            Some(candidate) => {
                debug!("[BOOK] Hit: {}", candidate.san);
                Some(candidate.clone())
            }
            None => {
                warn!("[BOOK] Book move {} is not legal here", san);
                None
            }
        }
    }
}
