use crate::types::{LegalMove, Position};

pub const CORNER_BONUS: i32 = 15;
pub const EDGE_BONUS: i32 = 2;

/// One-ply score: captured discs plus a fixed positional bonus.
///
/// Squares next to a corner get no penalty even though they tend to give the
/// corner away.
pub fn score_move(mv: &LegalMove) -> i32 {
    i32::from(mv.flip_count) + positional_bonus(&mv.position)
}

fn positional_bonus(position: &Position) -> i32 {
    if position.is_corner() {
        CORNER_BONUS
    } else if position.is_edge() {
        EDGE_BONUS
    } else {
        0
    }
}

/// Highest scoring move; the first one seen wins ties.
///
/// `moves` is expected in row-major order, as `Board::legal_moves` returns it.
pub fn best_move(moves: &[LegalMove]) -> Option<Position> {
    let mut best: Option<(i32, Position)> = None;
    for mv in moves {
        let score = score_move(mv);
        if best.is_none_or(|(best_score, _)| score > best_score) {
            best = Some((score, mv.position));
        }
    }
    best.map(|(_, position)| position)
}
