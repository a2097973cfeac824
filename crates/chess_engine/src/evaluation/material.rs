//! Material evaluation
//!
//! Evaluates the material balance of a position by counting piece values.

use shakmaty::{Board, Color, Role};

use crate::constants::*;

/// Value of a piece in centipawns
pub fn piece_value(role: Role) -> i32 {
    match role {
        Role::Pawn => PAWN_VALUE,
        Role::Knight => KNIGHT_VALUE,
        Role::Bishop => BISHOP_VALUE,
        Role::Rook => ROOK_VALUE,
        Role::Queen => QUEEN_VALUE,
        Role::King => KING_VALUE,
    }
}

/// Evaluate material balance, positive when white is ahead
pub fn evaluate_material(board: &Board) -> i32 {
    let mut score = 0i32;

    for role in Role::ALL {
        let white = (board.by_color(Color::White) & board.by_role(role)).count() as i32;
        let black = (board.by_color(Color::Black) & board.by_role(role)).count() as i32;
        score += (white - black) * piece_value(role);
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::parse_position;
    use shakmaty::Position;

    fn material(fen: &str) -> i32 {
        evaluate_material(parse_position(fen).unwrap().board())
    }

    #[test]
    fn test_starting_position_material_balance() {
        let score = material("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(score, 0, "Starting position should have 0 material balance");
    }

    #[test]
    fn test_white_up_queen() {
        let score = material("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(score, QUEEN_VALUE, "Score should be exactly the queen value");
    }

    #[test]
    fn test_black_up_pawn() {
        let score = material("rnbqkbnr/pppppppp/8/8/8/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(
            score, -PAWN_VALUE,
            "Score should be exactly negative pawn value"
        );
    }

    #[test]
    fn test_bare_kings_material() {
        let score = material("8/8/4k3/8/8/3K4/8/8 w - - 0 1");
        assert_eq!(score, 0, "Kings cancel out");
    }
}
