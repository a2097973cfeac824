//! Move ordering for alpha-beta pruning
//!
//! Orders moves so that the most forcing ones are tried first (captures,
//! checks, moves into the center), which makes cutoffs happen earlier.

use crate::constants::*;
use crate::types::Candidate;

/// Heuristic ordering score of a single move
pub fn move_order_score(candidate: &Candidate) -> i32 {
    let mut score = 0;

    if candidate.captured || candidate.san.contains('x') {
        score += ORDER_CAPTURE_BONUS;
    }

    if candidate.check {
        score += ORDER_CHECK_BONUS;
    }

    if CENTER_SQUARES.contains(&candidate.mv.to()) {
        score += ORDER_CENTER_BONUS;
    }

    score
}

/// Order moves for better alpha-beta pruning
///
/// Sorts by descending score. The sort is stable, so moves with equal scores
/// keep their board-scan order.
pub fn order_moves(moves: &mut [Candidate]) {
    moves.sort_by_key(|mv| std::cmp::Reverse(move_order_score(mv)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{find_by_san, legal_candidates, parse_position};

    #[test]
    fn test_order_moves_prioritizes_captures() {
        // 1.e4 d5: exd5 must come first
        let pos =
            parse_position("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2").unwrap();
        let mut moves = legal_candidates(&pos);
        order_moves(&mut moves);

        assert_eq!(moves[0].san, "exd5", "Capture should be ordered first");
        assert!(move_order_score(&moves[0]) > move_order_score(&moves[1]));
    }

    #[test]
    fn test_center_capture_outranks_plain_capture() {
        let pos =
            parse_position("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2").unwrap();
        let moves = legal_candidates(&pos);
        let exd5 = find_by_san(&moves, "exd5").unwrap();
        assert_eq!(
            move_order_score(exd5),
            ORDER_CAPTURE_BONUS + ORDER_CENTER_BONUS
        );
    }

    #[test]
    fn test_order_moves_check_bonus() {
        let pos = parse_position("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let mut moves = legal_candidates(&pos);
        order_moves(&mut moves);

        assert!(moves[0].san.ends_with('+'), "Check should be ordered first");
        assert_eq!(move_order_score(&moves[0]), ORDER_CHECK_BONUS);
    }

    #[test]
    fn test_mating_move_gets_check_bonus() {
        let pos = parse_position("6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1").unwrap();
        let mut moves = legal_candidates(&pos);
        order_moves(&mut moves);

        assert_eq!(moves[0].san, "Re8#");
        assert_eq!(move_order_score(&moves[0]), ORDER_CHECK_BONUS);
    }

    #[test]
    fn test_order_moves_center_control() {
        let pos =
            parse_position("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        let mut moves = legal_candidates(&pos);
        order_moves(&mut moves);

        // d4 and e4 are the only center moves; d4 is scanned before e4
        assert_eq!(moves[0].san, "d4");
        assert_eq!(moves[1].san, "e4");
    }

    #[test]
    fn test_order_is_stable_for_ties() {
        let pos =
            parse_position("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        let original = legal_candidates(&pos);
        let mut moves = original.clone();
        order_moves(&mut moves);

        assert_eq!(moves.len(), original.len());
        let quiet: Vec<_> = original
            .iter()
            .filter(|c| move_order_score(c) == 0)
            .map(|c| c.san.clone())
            .collect();
        let ordered_quiet: Vec<_> = moves[2..].iter().map(|c| c.san.clone()).collect();
        assert_eq!(quiet, ordered_quiet);
    }
}
