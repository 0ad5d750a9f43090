use crate::board::Position;
use crate::moves::Move;
use crate::types::{Alliance, PieceType, Square};

/// A chess piece: an immutable value identified by type, alliance, square
/// and whether it has moved yet. Moving a piece produces a new value via
/// [`moved_to`]; the original is never mutated, which is what lets board
/// snapshots be shared freely across search branches.
///
/// [`moved_to`]: Piece::moved_to
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub alliance: Alliance,
    pub square: Square,
    pub first_move: bool,
}

// Knight L-offsets and the surrounding-square offsets shared by king and
// queen. Sliders reuse subsets of the queen table.
const KNIGHT_OFFSETS: [i8; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];
const BISHOP_OFFSETS: [i8; 4] = [-9, -7, 7, 9];
const ROOK_OFFSETS: [i8; 4] = [-8, -1, 1, 8];
const QUEEN_OFFSETS: [i8; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];
const KING_OFFSETS: [i8; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];
const PAWN_OFFSETS: [i8; 4] = [8, 16, 7, 9];

/// Returns true if stepping by `offset` from `square` would wrap around a
/// board edge. Covers every single-square offset used by sliders and the
/// king; offsets a given piece never uses simply never trigger.
const fn crosses_edge(square: Square, offset: i8) -> bool {
    match square.column() {
        0 => matches!(offset, -9 | -1 | 7),
        7 => matches!(offset, -7 | 1 | 9),
        _ => false,
    }
}

/// Knight wraparound exclusions, per column.
const fn knight_crosses_edge(square: Square, offset: i8) -> bool {
    match square.column() {
        0 => matches!(offset, -17 | -10 | 6 | 15),
        1 => matches!(offset, -10 | 6),
        6 => matches!(offset, -6 | 10),
        7 => matches!(offset, -15 | -6 | 10 | 17),
        _ => false,
    }
}

impl Piece {
    /// Creates a piece that has not moved yet.
    pub const fn new(piece_type: PieceType, alliance: Alliance, square: Square) -> Self {
        Self {
            piece_type,
            alliance,
            square,
            first_move: true,
        }
    }

    /// Returns this piece relocated to the destination square with its
    /// first-move flag cleared.
    pub const fn moved_to(self, square: Square) -> Self {
        Self {
            square,
            first_move: false,
            ..self
        }
    }

    /// Returns the piece letter, uppercase for White and lowercase for Black.
    pub fn to_char(self) -> char {
        match self.alliance {
            Alliance::White => self.piece_type.to_char(),
            Alliance::Black => self.piece_type.to_char().to_ascii_lowercase(),
        }
    }

    /// Generates every piece-geometry-valid move for this piece on the given
    /// position. Self-check filtering happens one level up, at the player.
    pub fn legal_moves(&self, position: &Position) -> Vec<Move> {
        match self.piece_type {
            PieceType::Pawn => self.pawn_moves(position),
            PieceType::Knight => self.step_moves(position, &KNIGHT_OFFSETS, knight_crosses_edge),
            PieceType::Bishop => self.sliding_moves(position, &BISHOP_OFFSETS),
            PieceType::Rook => self.sliding_moves(position, &ROOK_OFFSETS),
            PieceType::Queen => self.sliding_moves(position, &QUEEN_OFFSETS),
            PieceType::King => self.step_moves(position, &KING_OFFSETS, crosses_edge),
        }
    }

    /// Walks each offset repeatedly until the board edge, a capture, or a
    /// friendly blocker ends the ray.
    fn sliding_moves(&self, position: &Position, offsets: &[i8]) -> Vec<Move> {
        let mut moves = Vec::new();
        for &offset in offsets {
            let mut current = self.square;
            loop {
                if crosses_edge(current, offset) {
                    break;
                }
                let Some(destination) = current.offset(offset) else {
                    break;
                };
                match position.piece_at(destination) {
                    None => {
                        moves.push(Move::Major {
                            piece: *self,
                            to: destination,
                        });
                        current = destination;
                    }
                    Some(target) => {
                        if target.alliance != self.alliance {
                            moves.push(Move::Attack {
                                piece: *self,
                                to: destination,
                                captured: target,
                            });
                        }
                        break;
                    }
                }
            }
        }
        moves
    }

    /// Single-step generation for the knight and the king.
    fn step_moves(
        &self,
        position: &Position,
        offsets: &[i8],
        excluded: fn(Square, i8) -> bool,
    ) -> Vec<Move> {
        let mut moves = Vec::new();
        for &offset in offsets {
            if excluded(self.square, offset) {
                continue;
            }
            let Some(destination) = self.square.offset(offset) else {
                continue;
            };
            match position.piece_at(destination) {
                None => moves.push(Move::Major {
                    piece: *self,
                    to: destination,
                }),
                Some(target) => {
                    if target.alliance != self.alliance {
                        moves.push(Move::Attack {
                            piece: *self,
                            to: destination,
                            captured: target,
                        });
                    }
                }
            }
        }
        moves
    }

    fn pawn_moves(&self, position: &Position) -> Vec<Move> {
        let mut moves = Vec::new();
        let direction = self.alliance.direction();

        for &candidate in &PAWN_OFFSETS {
            let Some(destination) = self.square.offset(direction * candidate) else {
                continue;
            };

            match candidate {
                // Single push, onto an empty square only.
                8 => {
                    if position.piece_at(destination).is_none() {
                        moves.push(self.wrap_promotion(Move::PawnPush {
                            piece: *self,
                            to: destination,
                        }));
                    }
                }
                // Double push, only from the starting row with both the
                // intermediate and destination squares empty.
                16 => {
                    if self.first_move && self.square.row() == self.alliance.pawn_row() {
                        let Some(behind) = self.square.offset(direction * 8) else {
                            continue;
                        };
                        if position.piece_at(behind).is_none()
                            && position.piece_at(destination).is_none()
                        {
                            moves.push(Move::PawnJump {
                                piece: *self,
                                to: destination,
                            });
                        }
                    }
                }
                // Diagonal captures and en passant. The edge exclusions are
                // mirrored per alliance because the offsets are scaled by
                // the movement direction.
                _ => {
                    let column = self.square.column();
                    let white = self.alliance.is_white();
                    let wraps = if candidate == 7 {
                        (column == 7 && white) || (column == 0 && !white)
                    } else {
                        (column == 0 && white) || (column == 7 && !white)
                    };
                    if wraps {
                        continue;
                    }
                    self.diagonal_moves(position, destination, candidate, &mut moves);
                }
            }
        }
        moves
    }

    fn diagonal_moves(
        &self,
        position: &Position,
        destination: Square,
        candidate: i8,
        moves: &mut Vec<Move>,
    ) {
        if let Some(target) = position.piece_at(destination) {
            if target.alliance != self.alliance {
                moves.push(self.wrap_promotion(Move::PawnAttack {
                    piece: *self,
                    to: destination,
                    captured: target,
                }));
            }
        } else if let Some(en_passant_pawn) = position.en_passant_pawn() {
            // The capturable pawn sits beside this one, directly behind the
            // diagonal target from the mover's point of view.
            let neighbor_delta = if candidate == 7 {
                self.alliance.opposite_direction()
            } else {
                -self.alliance.opposite_direction()
            };
            let Some(neighbor) = self.square.offset(neighbor_delta) else {
                return;
            };
            if en_passant_pawn.square == neighbor && en_passant_pawn.alliance != self.alliance {
                moves.push(Move::EnPassant {
                    piece: *self,
                    to: destination,
                    captured: en_passant_pawn,
                });
            }
        }
    }

    fn wrap_promotion(&self, mv: Move) -> Move {
        if self.alliance.is_promotion_square(mv.destination()) {
            Move::Promotion {
                inner: Box::new(mv),
            }
        } else {
            mv
        }
    }
}
