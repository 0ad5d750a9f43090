use std::fmt;

use crate::board::{Board, Builder};
use crate::pieces::Piece;
use crate::types::{Alliance, MoveStatus, PieceType, Square};

/// A state transition between two boards. Every variant carries the moving
/// piece by value (as it was before the move) and the destination square;
/// capture variants also carry the captured piece.
///
/// Moves do not own the board they were generated on. [`execute`] is pure:
/// it takes the source board by reference and returns a brand-new board,
/// leaving the input untouched.
///
/// [`execute`]: Move::execute
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Move {
    /// A non-pawn move onto an empty square.
    Major { piece: Piece, to: Square },
    /// A non-pawn capture.
    Attack {
        piece: Piece,
        to: Square,
        captured: Piece,
    },
    /// A pawn single push.
    PawnPush { piece: Piece, to: Square },
    /// A pawn double push. Executing it records the jumped pawn as the
    /// resulting board's en-passant pawn.
    PawnJump { piece: Piece, to: Square },
    /// A pawn diagonal capture.
    PawnAttack {
        piece: Piece,
        to: Square,
        captured: Piece,
    },
    /// An en-passant capture. The captured pawn does not sit on the
    /// destination square.
    EnPassant {
        piece: Piece,
        to: Square,
        captured: Piece,
    },
    /// Wraps a pawn push or capture that lands on the promotion row.
    /// Executing it replaces the pawn with a queen of the same alliance.
    Promotion { inner: Box<Move> },
    /// Castling toward the h-file rook.
    KingsideCastle {
        king: Piece,
        to: Square,
        rook: Piece,
        rook_to: Square,
    },
    /// Castling toward the a-file rook.
    QueensideCastle {
        king: Piece,
        to: Square,
        rook: Piece,
        rook_to: Square,
    },
}

impl Move {
    /// Returns the piece being moved, as it was before the move.
    pub fn moved_piece(&self) -> Piece {
        match self {
            Move::Major { piece, .. }
            | Move::Attack { piece, .. }
            | Move::PawnPush { piece, .. }
            | Move::PawnJump { piece, .. }
            | Move::PawnAttack { piece, .. }
            | Move::EnPassant { piece, .. } => *piece,
            Move::Promotion { inner } => inner.moved_piece(),
            Move::KingsideCastle { king, .. } | Move::QueensideCastle { king, .. } => *king,
        }
    }

    /// Returns the square the moved piece starts on.
    pub fn source(&self) -> Square {
        self.moved_piece().square
    }

    /// Returns the square the moved piece lands on.
    pub fn destination(&self) -> Square {
        match self {
            Move::Major { to, .. }
            | Move::Attack { to, .. }
            | Move::PawnPush { to, .. }
            | Move::PawnJump { to, .. }
            | Move::PawnAttack { to, .. }
            | Move::EnPassant { to, .. }
            | Move::KingsideCastle { to, .. }
            | Move::QueensideCastle { to, .. } => *to,
            Move::Promotion { inner } => inner.destination(),
        }
    }

    /// Returns true if this move captures a piece.
    pub fn is_attack(&self) -> bool {
        self.captured_piece().is_some()
    }

    /// Returns the captured piece, if any.
    pub fn captured_piece(&self) -> Option<Piece> {
        match self {
            Move::Attack { captured, .. }
            | Move::PawnAttack { captured, .. }
            | Move::EnPassant { captured, .. } => Some(*captured),
            Move::Promotion { inner } => inner.captured_piece(),
            _ => None,
        }
    }

    /// Produces the board that results from playing this move. Copy-on-write:
    /// every surviving piece is re-placed on a fresh builder and the source
    /// board is left untouched, so prior snapshots stay valid.
    pub fn execute(&self, board: &Board) -> Board {
        match self {
            Move::Promotion { inner } => {
                let pawn = inner.moved_piece();
                let mut builder = Builder::new(pawn.alliance.opponent());
                carry_castled_flags(&mut builder, board);
                for other in board.pieces(pawn.alliance) {
                    if *other != pawn {
                        builder.set_piece(*other);
                    }
                }
                for other in board.pieces(pawn.alliance.opponent()) {
                    builder.set_piece(*other);
                }
                // Placing the queen last overwrites any captured piece on
                // the promotion square.
                builder.set_piece(Piece {
                    piece_type: PieceType::Queen,
                    alliance: pawn.alliance,
                    square: inner.destination(),
                    first_move: false,
                });
                builder.build()
            }
            Move::KingsideCastle {
                king,
                to,
                rook,
                rook_to,
            }
            | Move::QueensideCastle {
                king,
                to,
                rook,
                rook_to,
            } => {
                let mut builder = Builder::new(king.alliance.opponent());
                carry_castled_flags(&mut builder, board);
                for other in board.pieces(king.alliance) {
                    if *other != *king && *other != *rook {
                        builder.set_piece(*other);
                    }
                }
                for other in board.pieces(king.alliance.opponent()) {
                    builder.set_piece(*other);
                }
                builder.set_piece(king.moved_to(*to));
                builder.set_piece(rook.moved_to(*rook_to));
                builder.set_castled(king.alliance);
                builder.build()
            }
            _ => {
                let piece = self.moved_piece();
                let mut builder = Builder::new(piece.alliance.opponent());
                carry_castled_flags(&mut builder, board);
                for other in board.pieces(piece.alliance) {
                    if *other != piece {
                        builder.set_piece(*other);
                    }
                }
                // The en-passant victim is not on the destination square,
                // so it has to be skipped explicitly; an ordinary capture
                // is overwritten by the final placement below.
                let skipped = match self {
                    Move::EnPassant { captured, .. } => Some(*captured),
                    _ => None,
                };
                for other in board.pieces(piece.alliance.opponent()) {
                    if Some(*other) != skipped {
                        builder.set_piece(*other);
                    }
                }
                let moved = piece.moved_to(self.destination());
                builder.set_piece(moved);
                if let Move::PawnJump { .. } = self {
                    builder.set_en_passant_pawn(moved);
                }
                builder.build()
            }
        }
    }
}

fn carry_castled_flags(builder: &mut Builder, board: &Board) {
    if board.has_castled(Alliance::White) {
        builder.set_castled(Alliance::White);
    }
    if board.has_castled(Alliance::Black) {
        builder.set_castled(Alliance::Black);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::KingsideCastle { .. } => write!(f, "O-O"),
            Move::QueensideCastle { .. } => write!(f, "O-O-O"),
            Move::Promotion { inner } => {
                write!(f, "{}{}q", inner.source(), inner.destination())
            }
            _ => write!(f, "{}{}", self.source(), self.destination()),
        }
    }
}

/// The result of attempting a move: the resulting board, the move that was
/// attempted, and its status. On a non-[`Done`](MoveStatus::Done) status the
/// board is the unchanged pre-move board.
#[derive(Clone, Debug)]
pub struct MoveTransition {
    pub board: Board,
    pub attempted_move: Move,
    pub status: MoveStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn find_move(board: &Board, from: &str, to: &str) -> Move {
        board
            .current_player()
            .legal_moves()
            .iter()
            .find(|m| m.source() == sq(from) && m.destination() == sq(to))
            .cloned()
            .unwrap_or_else(|| panic!("no move {}{} on this board", from, to))
    }

    #[test]
    fn test_execute_moves_piece_and_clears_source() {
        let board = Board::starting_position();
        let mv = find_move(&board, "g1", "f3");
        let next = mv.execute(&board);

        assert!(next.piece_at(sq("g1")).is_none());
        let knight = next.piece_at(sq("f3")).expect("knight on f3");
        assert_eq!(knight.piece_type, PieceType::Knight);
        assert!(!knight.first_move);

        // The source board is untouched.
        assert!(board.piece_at(sq("g1")).is_some());
        assert!(board.piece_at(sq("f3")).is_none());
    }

    #[test]
    fn test_pawn_jump_records_en_passant_pawn() {
        let board = Board::starting_position();
        let mv = find_move(&board, "e2", "e4");
        let next = mv.execute(&board);

        let jumper = next.en_passant_pawn().expect("en-passant pawn recorded");
        assert_eq!(jumper.square, sq("e4"));
        assert!(board.en_passant_pawn().is_none());
    }

    #[test]
    fn test_execute_switches_mover() {
        let board = Board::starting_position();
        assert_eq!(board.current_player().alliance(), Alliance::White);
        let next = find_move(&board, "b1", "c3").execute(&board);
        assert_eq!(next.current_player().alliance(), Alliance::Black);
    }

    #[test]
    fn test_move_display() {
        let board = Board::starting_position();
        assert_eq!(format!("{}", find_move(&board, "e2", "e4")), "e2e4");

        let king = Piece::new(PieceType::King, Alliance::White, sq("e1"));
        let rook = Piece::new(PieceType::Rook, Alliance::White, sq("h1"));
        let castle = Move::KingsideCastle {
            king,
            to: sq("g1"),
            rook,
            rook_to: sq("f1"),
        };
        assert_eq!(format!("{}", castle), "O-O");

        let pawn = Piece {
            piece_type: PieceType::Pawn,
            alliance: Alliance::White,
            square: sq("e7"),
            first_move: false,
        };
        let promotion = Move::Promotion {
            inner: Box::new(Move::PawnPush {
                piece: pawn,
                to: sq("e8"),
            }),
        };
        assert_eq!(format!("{}", promotion), "e7e8q");
    }

    #[test]
    fn test_structural_equality() {
        let board = Board::starting_position();
        let a = find_move(&board, "e2", "e4");
        let b = find_move(&board, "e2", "e4");
        let c = find_move(&board, "d2", "d4");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
