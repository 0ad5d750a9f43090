use std::fmt;

/// Represents one of the two sides in chess.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Alliance {
    White,
    Black,
}

impl Alliance {
    /// Returns the opposing alliance.
    pub const fn opponent(self) -> Self {
        match self {
            Alliance::White => Alliance::Black,
            Alliance::Black => Alliance::White,
        }
    }

    /// Returns the direction pawns of this alliance move along the board
    /// index. Row 0 is the top of the board, so White moves toward lower
    /// indices and Black toward higher ones.
    pub const fn direction(self) -> i8 {
        match self {
            Alliance::White => -1,
            Alliance::Black => 1,
        }
    }

    /// Returns the direction the opposing pawns move. Used for en passant
    /// neighbor arithmetic.
    pub const fn opposite_direction(self) -> i8 {
        match self {
            Alliance::White => 1,
            Alliance::Black => -1,
        }
    }

    /// Returns the row pawns of this alliance start on.
    pub const fn pawn_row(self) -> u8 {
        match self {
            Alliance::White => 6,
            Alliance::Black => 1,
        }
    }

    /// Returns true if a pawn of this alliance promotes on the given square.
    pub const fn is_promotion_square(self, square: Square) -> bool {
        match self {
            Alliance::White => square.row() == 0,
            Alliance::Black => square.row() == 7,
        }
    }

    /// Returns true for the White alliance.
    pub const fn is_white(self) -> bool {
        matches!(self, Alliance::White)
    }
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alliance::White => write!(f, "White"),
            Alliance::Black => write!(f, "Black"),
        }
    }
}

/// The six types of chess pieces.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Returns the material value of this piece type for evaluation.
    pub const fn value(self) -> i32 {
        match self {
            PieceType::Pawn => 100,
            PieceType::Knight => 300,
            PieceType::Bishop => 300,
            PieceType::Rook => 500,
            PieceType::Queen => 900,
            PieceType::King => 1000,
        }
    }

    /// Returns true if this piece type is the king.
    pub const fn is_king(self) -> bool {
        matches!(self, PieceType::King)
    }

    /// Returns true if this piece type is a rook.
    pub const fn is_rook(self) -> bool {
        matches!(self, PieceType::Rook)
    }

    /// Returns true if this piece type is a pawn.
    pub const fn is_pawn(self) -> bool {
        matches!(self, PieceType::Pawn)
    }

    /// Returns the single-letter representation of the piece type.
    pub const fn to_char(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }
}

/// A square on the chess board, indexed 0-63 in row-major order.
/// Row 0 is the top of the board: Black's back rank in the standard setup.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Square(u8);

impl Square {
    /// Creates a square from index (0-63).
    /// Returns None if index is out of range.
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Returns the square index (0-63).
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the column of this square (0 = a-file, 7 = h-file).
    pub const fn column(self) -> u8 {
        self.0 % 8
    }

    /// Returns the row of this square (0 = top, 7 = bottom).
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// Returns the square at the given offset from this one, if it stays
    /// on the board. Horizontal wraparound is not detected here; callers
    /// exclude wrapping offsets by column before stepping.
    pub const fn offset(self, delta: i8) -> Option<Self> {
        let index = self.0 as i16 + delta as i16;
        if index >= 0 && index < 64 {
            Some(Square(index as u8))
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation ("e4").
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        let column = file as u8 - b'a';
        let row = b'8' - rank as u8;
        Some(Square(row * 8 + column))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.column()) as char;
        let rank = (b'8' - self.row()) as char;
        write!(f, "{}{}", file, rank)
    }
}

/// The outcome of attempting a move through [`Player::make_move`].
///
/// Rule rejections are ordinary values, not errors: an illegal destination
/// or a self-check is a routine outcome of every input attempt.
///
/// [`Player::make_move`]: crate::player::Player::make_move
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MoveStatus {
    /// The move was executed and produced a new board.
    Done,
    /// The move is not in the player's legal-move set.
    IllegalMove,
    /// The move would expose the mover's own king.
    LeavesPlayerInCheck,
}

impl MoveStatus {
    /// Returns true only for a successfully executed move.
    pub const fn is_done(self) -> bool {
        matches!(self, MoveStatus::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alliance_opponent() {
        assert_eq!(Alliance::White.opponent(), Alliance::Black);
        assert_eq!(Alliance::Black.opponent(), Alliance::White);
    }

    #[test]
    fn test_alliance_directions() {
        assert_eq!(Alliance::White.direction(), -1);
        assert_eq!(Alliance::Black.direction(), 1);
        assert_eq!(Alliance::White.opposite_direction(), 1);
        assert_eq!(Alliance::Black.opposite_direction(), -1);
    }

    #[test]
    fn test_promotion_squares() {
        let e8 = Square::from_algebraic("e8").unwrap();
        let e1 = Square::from_algebraic("e1").unwrap();
        assert!(Alliance::White.is_promotion_square(e8));
        assert!(!Alliance::White.is_promotion_square(e1));
        assert!(Alliance::Black.is_promotion_square(e1));
        assert!(!Alliance::Black.is_promotion_square(e8));
    }

    #[test]
    fn test_square_geometry() {
        let a8 = Square::from_index(0).unwrap();
        assert_eq!(a8.column(), 0);
        assert_eq!(a8.row(), 0);
        assert_eq!(format!("{}", a8), "a8");

        let h1 = Square::from_index(63).unwrap();
        assert_eq!(h1.column(), 7);
        assert_eq!(h1.row(), 7);
        assert_eq!(format!("{}", h1), "h1");
    }

    #[test]
    fn test_square_offset_bounds() {
        let a8 = Square::from_index(0).unwrap();
        assert!(a8.offset(-8).is_none());
        assert_eq!(a8.offset(8), Square::from_index(8));

        let h1 = Square::from_index(63).unwrap();
        assert!(h1.offset(8).is_none());
        assert!(h1.offset(1).is_none());
    }

    #[test]
    fn test_square_algebraic_round_trip() {
        for index in 0..64 {
            let square = Square::from_index(index).unwrap();
            let parsed = Square::from_algebraic(&format!("{}", square)).unwrap();
            assert_eq!(parsed, square);
        }
        assert!(Square::from_algebraic("i1").is_none());
        assert!(Square::from_algebraic("a9").is_none());
        assert!(Square::from_algebraic("e44").is_none());
    }

    #[test]
    fn test_move_status_is_done() {
        assert!(MoveStatus::Done.is_done());
        assert!(!MoveStatus::IllegalMove.is_done());
        assert!(!MoveStatus::LeavesPlayerInCheck.is_done());
    }

    #[test]
    fn test_piece_values() {
        assert_eq!(PieceType::Pawn.value(), 100);
        assert_eq!(PieceType::Knight.value(), 300);
        assert_eq!(PieceType::Bishop.value(), 300);
        assert_eq!(PieceType::Rook.value(), 500);
        assert_eq!(PieceType::Queen.value(), 900);
        assert_eq!(PieceType::King.value(), 1000);
        assert!(PieceType::King.is_king());
        assert!(PieceType::Rook.is_rook());
        assert!(!PieceType::Queen.is_king());
    }
}
