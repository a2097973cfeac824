//! Full position evaluation
//!
//! Terminal states first, then material plus mobility. The material and
//! mobility sum is white-oriented and flipped at the end for black.

use shakmaty::{Chess, Color, Position};

use super::material::evaluate_material;
use crate::api::is_drawn_by_rule;
use crate::constants::*;
use crate::types::Side;

/// Evaluate a position; positive favours `perspective`
///
/// - Checkmate scores [`MATE_SCORE`] against the side to move.
/// - Stalemate, insufficient material and the fifty-move rule score exactly
///   zero, whatever the material on the board.
/// - Otherwise material balance plus [`MOBILITY_WEIGHT`] per legal move of the
///   side to move (added for white to move, subtracted for black).
pub fn evaluate_position(pos: &Chess, perspective: Side) -> i32 {
    let legal = pos.legal_moves();
    let white_to_move = pos.turn() == Color::White;

    let white_score = if legal.is_empty() {
        if pos.is_check() {
            if white_to_move {
                -MATE_SCORE
            } else {
                MATE_SCORE
            }
        } else {
            0
        }
    } else if is_drawn_by_rule(pos) {
        0
    } else {
        let mobility = legal.len() as i32 * MOBILITY_WEIGHT;
        let material = evaluate_material(pos.board());
        if white_to_move {
            material + mobility
        } else {
            material - mobility
        }
    };

    match perspective {
        Side::White => white_score,
        Side::Black => -white_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::parse_position;

    fn eval(fen: &str, perspective: Side) -> i32 {
        evaluate_position(&parse_position(fen).unwrap(), perspective)
    }

    #[test]
    fn test_black_checkmated_favours_white() {
        let fen = "4R1k1/5ppp/8/8/8/8/5PPP/6K1 b - - 1 1";
        assert_eq!(eval(fen, Side::White), MATE_SCORE);
        assert_eq!(eval(fen, Side::Black), -MATE_SCORE);
    }

    #[test]
    fn test_white_checkmated_favours_black() {
        // Fool's mate
        let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
        assert_eq!(eval(fen, Side::White), -MATE_SCORE);
        assert_eq!(eval(fen, Side::Black), MATE_SCORE);
    }

    #[test]
    fn test_stalemate_is_zero_despite_material() {
        let fen = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1";
        assert_eq!(eval(fen, Side::White), 0);
        assert_eq!(eval(fen, Side::Black), 0);
    }

    #[test]
    fn test_fifty_move_rule_is_zero() {
        let fen = "4k3/8/8/8/8/8/8/R3K3 w - - 100 80";
        assert_eq!(eval(fen, Side::White), 0);
    }

    #[test]
    fn test_starting_position_counts_mobility() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        // Equal material, 20 legal moves for white to move
        assert_eq!(eval(fen, Side::White), 20 * MOBILITY_WEIGHT);
        assert_eq!(eval(fen, Side::Black), -20 * MOBILITY_WEIGHT);
    }

    #[test]
    fn test_mobility_is_subtracted_when_black_to_move() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
        assert_eq!(eval(fen, Side::White), -20 * MOBILITY_WEIGHT);
    }
}
