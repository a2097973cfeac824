//! Bounded minimax search
//!
//! This module picks a move with a shallow, latency-bounded search:
//! - Forced moves and immediate mates short-circuit the search entirely
//! - The root candidate pool is cut down by difficulty before searching
//! - Each root candidate is scored with alpha-beta minimax
//! - Uniform noise is added to each root score before comparison, so repeated
//!   calls on the same position do not always play the same move
//!
//! Randomness comes from the caller's RNG; seed it to make the search
//! reproducible.
//!
//! ## Module Organization
//!
//! - `alphabeta` - Core alpha-beta search algorithm
//! - `ordering` - Move ordering heuristics

mod alphabeta;
mod ordering;

pub use ordering::{move_order_score, order_moves};

use rand::Rng;
use shakmaty::Chess;
use tracing::debug;

use crate::api::{apply, legal_candidates};
use crate::constants::*;
use crate::types::{Candidate, Difficulty, Side};
use alphabeta::alphabeta;

/// Restrict the root moves searched for a difficulty
///
/// For [`Difficulty::Hard`] with any checking or capturing move available the
/// pool is every check, then every capture, then the first
/// [`TACTICAL_POOL_QUIET_MOVES`] of the remaining moves. Otherwise the pool is
/// the first [`DEFAULT_POOL_SIZE`] legal moves. Order within each group
/// follows `moves`.
pub fn candidate_pool(moves: &[Candidate], difficulty: Difficulty) -> Vec<&Candidate> {
    let is_tactical = |c: &Candidate| c.check || c.captured;

    if difficulty == Difficulty::Hard && moves.iter().any(is_tactical) {
        let checks = moves.iter().filter(|c| c.check);
        let captures = moves.iter().filter(|c| c.captured && !c.check);
        let quiet = moves
            .iter()
            .filter(|c| !is_tactical(c))
            .take(TACTICAL_POOL_QUIET_MOVES);
        checks.chain(captures).chain(quiet).collect()
    } else {
        moves.iter().take(DEFAULT_POOL_SIZE).collect()
    }
}

/// Exact minimax score of playing `candidate` from `pos`
///
/// `depth` counts the candidate itself, so the recursive search below it
/// runs `depth - 1` plies with the opponent to move.
pub fn score_candidate(pos: &Chess, candidate: &Candidate, depth: u32, side: Side) -> i32 {
    let child = apply(pos, candidate);
    alphabeta(
        &child,
        depth.saturating_sub(1),
        -SCORE_INF,
        SCORE_INF,
        false,
        side,
    )
}

fn noise<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> f64 {
    (rng.random::<f64>() - 0.5) * difficulty.noise_range()
}

/// Best move for `side` searching `depth` plies
///
/// Returns `None` only when there are no legal moves.
pub fn best_move<R: Rng + ?Sized>(
    pos: &Chess,
    depth: u32,
    difficulty: Difficulty,
    side: Side,
    rng: &mut R,
) -> Option<Candidate> {
    let moves = legal_candidates(pos);

    match moves.len() {
        0 => return None,
        1 => return moves.into_iter().next(),
        _ => {}
    }

    if let Some(mate) = moves.iter().find(|c| c.mate) {
        debug!("[SEARCH] Immediate mate: {}", mate.san);
        return Some(mate.clone());
    }

    let pool = candidate_pool(&moves, difficulty);

    let mut best = &moves[0];
    let mut best_value = f64::NEG_INFINITY;

    for candidate in pool {
        let value = score_candidate(pos, candidate, depth, side);
        let adjusted = f64::from(value) + noise(difficulty, rng);

        if adjusted > best_value {
            best_value = adjusted;
            best = candidate;
        }
    }

    debug!(
        "[SEARCH] Selected: {} (Score: {:.0}, depth {}, {})",
        best.san, best_value, depth, difficulty
    );
    Some(best.clone())
}

/// Best move at the depth the difficulty calls for
pub fn search_move<R: Rng + ?Sized>(
    pos: &Chess,
    difficulty: Difficulty,
    side: Side,
    rng: &mut R,
) -> Option<Candidate> {
    best_move(pos, difficulty.search_depth(), difficulty, side, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{find_by_san, parse_position};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // White: Rxe8+ Rxe8 Qxe8# is the only way through; no mate in one
    const MATE_IN_TWO: &str = "1r2r1k1/5ppp/8/8/8/8/4RPPP/4Q1K1 w - - 0 1";

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_single_legal_move_is_returned() {
        let pos = parse_position("k7/2K5/8/8/8/8/8/1R6 b - - 0 1").unwrap();
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let mv = search_move(&pos, difficulty, Side::Black, &mut rng()).unwrap();
            assert_eq!(mv.san, "Ka7");
        }
    }

    #[test]
    fn test_no_legal_moves_returns_none() {
        let pos = parse_position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(search_move(&pos, Difficulty::Hard, Side::Black, &mut rng()).is_none());
    }

    #[test]
    fn test_immediate_mate_is_preferred() {
        let pos = parse_position("6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1").unwrap();
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let mv = search_move(&pos, difficulty, Side::White, &mut rng()).unwrap();
            assert_eq!(mv.san, "Re8#");
        }
    }

    #[test]
    fn test_immediate_mate_beats_material() {
        // bxc3 wins the queen; Re8# ends the game
        let pos = parse_position("6k1/5ppp/8/8/8/2q5/1P3PPP/4R1K1 w - - 0 1").unwrap();
        let mv = search_move(&pos, Difficulty::Easy, Side::White, &mut rng()).unwrap();
        assert_eq!(mv.san, "Re8#");
    }

    #[test]
    fn test_hard_pool_is_tactical() {
        let pos = parse_position(MATE_IN_TWO).unwrap();
        let moves = legal_candidates(&pos);
        let pool = candidate_pool(&moves, Difficulty::Hard);

        let tactical = moves.iter().filter(|c| c.check || c.captured).count();
        assert!(tactical > 0);
        assert_eq!(pool.len(), tactical + TACTICAL_POOL_QUIET_MOVES);
        assert!(pool[0].check);
        assert!(pool.iter().any(|c| c.san == "Rxe8+"));

        // No duplicates even though Rxe8+ is both a check and a capture
        let mut sans: Vec<_> = pool.iter().map(|c| c.san.as_str()).collect();
        sans.sort();
        sans.dedup();
        assert_eq!(sans.len(), pool.len());
    }

    #[test]
    fn test_default_pool_is_first_twelve() {
        let pos =
            parse_position("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        let moves = legal_candidates(&pos);

        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let pool = candidate_pool(&moves, difficulty);
            assert_eq!(pool.len(), DEFAULT_POOL_SIZE);
            assert_eq!(pool[0].uci, moves[0].uci);
            assert_eq!(pool[11].uci, moves[11].uci);
        }
    }

    #[test]
    fn test_depth_decides_whether_mate_in_two_is_seen() {
        let pos = parse_position(MATE_IN_TWO).unwrap();
        let moves = legal_candidates(&pos);
        let key = find_by_san(&moves, "Rxe8").unwrap();

        let shallow = score_candidate(&pos, key, Difficulty::Easy.search_depth(), Side::White);
        let deep = score_candidate(&pos, key, Difficulty::Hard.search_depth(), Side::White);

        assert!(shallow < MATE_SCORE / 2, "depth 2 should not see the mate");
        assert_eq!(deep, MATE_SCORE, "depth 4 should see the forced mate");
    }

    #[test]
    fn test_easy_does_not_reliably_find_mate_in_two() {
        let pos = parse_position(MATE_IN_TWO).unwrap();
        let seeds = 0..30u64;
        let found = seeds
            .clone()
            .filter(|&seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                let mv = search_move(&pos, Difficulty::Easy, Side::White, &mut rng).unwrap();
                mv.san == "Rxe8+"
            })
            .count();

        assert!(
            found < seeds.count() / 2,
            "easy found the mate line in {found} of 30 seeds"
        );
    }

    #[test]
    fn test_hard_finds_mate_in_two() {
        let pos = parse_position(MATE_IN_TWO).unwrap();
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mv = search_move(&pos, Difficulty::Hard, Side::White, &mut rng).unwrap();
            let score = score_candidate(&pos, &mv, 4, Side::White);
            assert_eq!(score, MATE_SCORE, "seed {seed} picked {}", mv.san);
        }
    }

    #[test]
    fn test_search_is_reproducible_with_seed() {
        let pos = parse_position(
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
        )
        .unwrap();
        let a = search_move(&pos, Difficulty::Medium, Side::White, &mut rng()).unwrap();
        let b = search_move(&pos, Difficulty::Medium, Side::White, &mut rng()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_black_side_search_returns_legal_move() {
        let pos = parse_position(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
        )
        .unwrap();
        let legal = legal_candidates(&pos);
        let mv = search_move(&pos, Difficulty::Easy, Side::Black, &mut rng()).unwrap();
        assert!(legal.contains(&mv));
    }
}
