use std::fmt;

use crate::moves::Move;
use crate::pieces::Piece;
use crate::player::Player;
use crate::types::{Alliance, PieceType, Square};

/// The raw substrate of a board: piece placements plus the move-generation
/// context (whose turn it is, the en-passant pawn from the last double push,
/// and which sides have castled). Move generation reads only this.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    squares: [Option<Piece>; 64],
    next_to_move: Alliance,
    en_passant_pawn: Option<Piece>,
    white_castled: bool,
    black_castled: bool,
}

impl Position {
    /// Returns the piece on the given square, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index() as usize]
    }

    /// Returns the alliance to move.
    pub fn next_to_move(&self) -> Alliance {
        self.next_to_move
    }

    /// Returns the pawn that double-stepped on the previous move, if any.
    pub fn en_passant_pawn(&self) -> Option<Piece> {
        self.en_passant_pawn
    }

    /// Returns true if the given alliance has castled.
    pub fn has_castled(&self, alliance: Alliance) -> bool {
        match alliance {
            Alliance::White => self.white_castled,
            Alliance::Black => self.black_castled,
        }
    }

    fn pieces(&self, alliance: Alliance) -> Vec<Piece> {
        self.squares
            .iter()
            .flatten()
            .filter(|piece| piece.alliance == alliance)
            .copied()
            .collect()
    }
}

/// Staged construction for a [`Board`]: accumulate piece placements and the
/// move-generation context, then freeze with [`build`](Builder::build).
/// Placement is keyed by each piece's own square, so a later placement
/// overwrites an earlier one; move execution relies on this for captures.
pub struct Builder {
    squares: [Option<Piece>; 64],
    next_to_move: Alliance,
    en_passant_pawn: Option<Piece>,
    white_castled: bool,
    black_castled: bool,
}

impl Builder {
    /// Creates an empty builder with the given side to move.
    pub fn new(next_to_move: Alliance) -> Self {
        Self {
            squares: [None; 64],
            next_to_move,
            en_passant_pawn: None,
            white_castled: false,
            black_castled: false,
        }
    }

    /// Places a piece on its own square, replacing whatever was there.
    pub fn set_piece(&mut self, piece: Piece) {
        self.squares[piece.square.index() as usize] = Some(piece);
    }

    /// Records the pawn eligible for en-passant capture on the next move.
    pub fn set_en_passant_pawn(&mut self, pawn: Piece) {
        self.en_passant_pawn = Some(pawn);
    }

    /// Marks the given alliance as having castled.
    pub fn set_castled(&mut self, alliance: Alliance) {
        match alliance {
            Alliance::White => self.white_castled = true,
            Alliance::Black => self.black_castled = true,
        }
    }

    /// Freezes the accumulated configuration into an immutable board:
    /// partitions the pieces by alliance, generates both sides' raw moves,
    /// and constructs both players, each seeing its own raw moves and the
    /// opponent's.
    ///
    /// # Panics
    ///
    /// Panics if either alliance has no king; that is an invalid board, not
    /// a rule violation.
    pub fn build(self) -> Board {
        let position = Position {
            squares: self.squares,
            next_to_move: self.next_to_move,
            en_passant_pawn: self.en_passant_pawn,
            white_castled: self.white_castled,
            black_castled: self.black_castled,
        };

        let white_pieces = position.pieces(Alliance::White);
        let black_pieces = position.pieces(Alliance::Black);
        let white_raw = raw_moves(&white_pieces, &position);
        let black_raw = raw_moves(&black_pieces, &position);

        let white_player = Player::new(&position, Alliance::White, white_raw.clone(), &black_raw);
        let black_player = Player::new(&position, Alliance::Black, black_raw, &white_raw);

        Board {
            position,
            white_pieces,
            black_pieces,
            white_player,
            black_player,
        }
    }
}

fn raw_moves(pieces: &[Piece], position: &Position) -> Vec<Move> {
    let mut moves = Vec::new();
    for piece in pieces {
        moves.extend(piece.legal_moves(position));
    }
    moves
}

/// An immutable snapshot of a game state. Built only through [`Builder`];
/// every derived collection (piece lists, both players and their legal
/// moves) is computed once at construction and never mutated afterward.
#[derive(Clone, Debug)]
pub struct Board {
    position: Position,
    white_pieces: Vec<Piece>,
    black_pieces: Vec<Piece>,
    white_player: Player,
    black_player: Player,
}

impl Board {
    /// Creates the standard 32-piece starting position, White to move.
    pub fn starting_position() -> Self {
        let mut builder = Builder::new(Alliance::White);

        // Black pieces on the top two rows.
        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];
        for (column, &piece_type) in back_rank.iter().enumerate() {
            let square = Square::from_index(column as u8).unwrap();
            builder.set_piece(Piece::new(piece_type, Alliance::Black, square));
        }
        for index in 8..16 {
            let square = Square::from_index(index).unwrap();
            builder.set_piece(Piece::new(PieceType::Pawn, Alliance::Black, square));
        }

        // White pieces on the bottom two rows.
        for index in 48..56 {
            let square = Square::from_index(index).unwrap();
            builder.set_piece(Piece::new(PieceType::Pawn, Alliance::White, square));
        }
        for (column, &piece_type) in back_rank.iter().enumerate() {
            let square = Square::from_index(56 + column as u8).unwrap();
            builder.set_piece(Piece::new(piece_type, Alliance::White, square));
        }

        builder.build()
    }

    /// Returns the piece on the given square, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position.piece_at(square)
    }

    /// Returns the active pieces of the given alliance.
    pub fn pieces(&self, alliance: Alliance) -> &[Piece] {
        match alliance {
            Alliance::White => &self.white_pieces,
            Alliance::Black => &self.black_pieces,
        }
    }

    /// Returns the player of the given alliance.
    pub fn player(&self, alliance: Alliance) -> &Player {
        match alliance {
            Alliance::White => &self.white_player,
            Alliance::Black => &self.black_player,
        }
    }

    /// Returns the player whose turn it is.
    pub fn current_player(&self) -> &Player {
        self.player(self.position.next_to_move)
    }

    /// Returns the pawn eligible for en-passant capture, if any.
    pub fn en_passant_pawn(&self) -> Option<Piece> {
        self.position.en_passant_pawn()
    }

    /// Returns true if the given alliance has castled.
    pub fn has_castled(&self, alliance: Alliance) -> bool {
        self.position.has_castled(alliance)
    }

    /// Returns the underlying position substrate.
    pub fn position(&self) -> &Position {
        &self.position
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        // Players are fully derived from the position, so comparing the
        // substrate compares the boards.
        self.position == other.position
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            for column in 0..8 {
                let square = Square::from_index(row * 8 + column).unwrap();
                let symbol = self.piece_at(square).map_or('-', Piece::to_char);
                write!(f, "{:>2}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
