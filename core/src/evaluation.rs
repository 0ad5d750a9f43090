use crate::board::Board;
use crate::types::Alliance;

const CHECK_BONUS: i32 = 50;
const CHECKMATE_BONUS: i32 = 10000;
const DEPTH_BONUS: i32 = 100;
const CASTLE_BONUS: i32 = 300;
const MOBILITY_MULTIPLIER: i32 = 2;

/// Static scoring of a board. Positive scores favor White.
pub trait BoardEvaluator {
    /// Scores the board. `depth` is the remaining search depth; it scales
    /// the checkmate bonus so that mates found sooner score higher.
    fn evaluate(&self, board: &Board, depth: u8) -> i32;
}

/// The standard evaluation: material, mobility, check and checkmate
/// bonuses, and a castle bonus, scored for White minus Black.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardBoardEvaluator;

impl BoardEvaluator for StandardBoardEvaluator {
    fn evaluate(&self, board: &Board, depth: u8) -> i32 {
        score(board, Alliance::White, depth) - score(board, Alliance::Black, depth)
    }
}

fn score(board: &Board, alliance: Alliance, depth: u8) -> i32 {
    material(board, alliance)
        + mobility(board, alliance)
        + check(board, alliance)
        + checkmate(board, alliance, depth)
        + castled(board, alliance)
}

/// Sums the material value of every active piece of the alliance.
fn material(board: &Board, alliance: Alliance) -> i32 {
    board
        .pieces(alliance)
        .iter()
        .map(|piece| piece.piece_type.value())
        .sum()
}

/// Counts how many legal moves the player has.
fn mobility(board: &Board, alliance: Alliance) -> i32 {
    board.player(alliance).legal_moves().len() as i32 * MOBILITY_MULTIPLIER
}

/// Bonus for having the opponent in check.
fn check(board: &Board, alliance: Alliance) -> i32 {
    if board.player(alliance.opponent()).is_in_check() {
        CHECK_BONUS
    } else {
        0
    }
}

/// A large bonus for having the opponent checkmated, scaled by remaining
/// depth to prefer faster mates. The check test gates the expensive
/// checkmate simulation.
fn checkmate(board: &Board, alliance: Alliance, depth: u8) -> i32 {
    let opponent = board.player(alliance.opponent());
    if !opponent.is_in_check() {
        return 0;
    }
    if opponent.is_in_checkmate(board) {
        CHECKMATE_BONUS + DEPTH_BONUS * depth as i32
    } else {
        0
    }
}

/// Encourages castling early.
fn castled(board: &Board, alliance: Alliance) -> i32 {
    if board.player(alliance).is_castled() {
        CASTLE_BONUS
    } else {
        0
    }
}
