use cozy_chess::{Color, Piece};
use crate::board::cozy::Position;

const PAWN: i32 = 1;
const KNIGHT: i32 = 3;
const BISHOP: i32 = 3;
const ROOK: i32 = 5;
const QUEEN: i32 = 9;

// Kings carry no material value; losing one is handled as checkmate.
pub const PIECE_VALUES: [(Piece, i32); 5] = [
    (Piece::Pawn, PAWN),
    (Piece::Knight, KNIGHT),
    (Piece::Bishop, BISHOP),
    (Piece::Rook, ROOK),
    (Piece::Queen, QUEEN),
];

pub fn opponent(color: Color) -> Color {
    if color == Color::White { Color::Black } else { Color::White }
}

pub fn material(pos: &Position, color: Color) -> i32 {
    PIECE_VALUES
        .iter()
        .map(|&(piece, value)| value * pos.piece_count(piece, color) as i32)
        .sum()
}

/// Static scoring of a position.
///
/// `perspective` is `+1` or `-1` and multiplies the raw score, which is
/// always computed as (side to move) minus (the other side). `reference`
/// is the root of the current search tree.
pub trait Evaluator: Send + Sync {
    fn name(&self) -> &str;
    fn evaluate(&self, pos: &Position, reference: &Position, perspective: i32) -> i32;
}

// Magnitude 1 only: a large enough material swing still outranks a mate.
fn mated_score(perspective: i32) -> i32 { -perspective }

/// Absolute material difference between the side to move and its opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialBalance;

impl Evaluator for MaterialBalance {
    fn name(&self) -> &str { "balance" }

    fn evaluate(&self, pos: &Position, _reference: &Position, perspective: i32) -> i32 {
        if pos.is_checkmate() { return mated_score(perspective); }
        let us = pos.side_to_move();
        perspective * (material(pos, us) - material(pos, opponent(us)))
    }
}

/// Material change since the reference position: what the side to move has
/// lost or won relative to what its opponent has lost or won.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialDifferential;

impl Evaluator for MaterialDifferential {
    fn name(&self) -> &str { "diff" }

    fn evaluate(&self, pos: &Position, reference: &Position, perspective: i32) -> i32 {
        if pos.is_checkmate() { return mated_score(perspective); }
        let us = pos.side_to_move();
        let ours = material(pos, us) - material(reference, us);
        let theirs = material(pos, opponent(us)) - material(reference, opponent(us));
        perspective * (ours - theirs)
    }
}
