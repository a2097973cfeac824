//! Alpha-beta minimax
//!
//! Plain recursive minimax with alpha-beta pruning. Depth never exceeds a
//! handful of plies, so the call stack stays shallow. Scores are always
//! taken from the searching side's perspective; `maximizing` tells whether
//! that side is to move at this node.

use shakmaty::Chess;

use super::ordering::order_moves;
use crate::api::{apply, is_drawn_by_rule, legal_candidates};
use crate::evaluation::evaluate_position;
use crate::types::Side;

pub(crate) fn alphabeta(
    pos: &Chess,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    side: Side,
) -> i32 {
    if depth == 0 || is_drawn_by_rule(pos) {
        return evaluate_position(pos, side);
    }

    let mut moves = legal_candidates(pos);
    if moves.is_empty() {
        return evaluate_position(pos, side);
    }
    order_moves(&mut moves);

    if maximizing {
        let mut best = i32::MIN;
        for mv in &moves {
            let score = alphabeta(&apply(pos, mv), depth - 1, alpha, beta, false, side);
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = i32::MAX;
        for mv in &moves {
            let score = alphabeta(&apply(pos, mv), depth - 1, alpha, beta, true, side);
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}
