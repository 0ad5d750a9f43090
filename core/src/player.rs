use crate::board::{Board, Position};
use crate::moves::{Move, MoveTransition};
use crate::pieces::Piece;
use crate::types::{Alliance, MoveStatus, Square};

/// Returns true if any move in the list lands on the given square.
pub fn is_attacked(square: Square, moves: &[Move]) -> bool {
    moves.iter().any(|mv| mv.destination() == square)
}

/// Returns true if a pawn of the given alliance guards the square. Pawns
/// generate no move onto an empty square diagonally, so their coverage of
/// empty squares is invisible to [`is_attacked`] and has to be read off the
/// board geometry directly.
fn pawn_guards(position: &Position, square: Square, attacker: Alliance) -> bool {
    for delta in [7i8, 9] {
        let Some(origin) = square.offset(-(attacker.direction() * delta)) else {
            continue;
        };
        if origin.column().abs_diff(square.column()) != 1 {
            continue;
        }
        if let Some(piece) = position.piece_at(origin) {
            if piece.alliance == attacker && piece.piece_type.is_pawn() {
                return true;
            }
        }
    }
    false
}

/// Per-side rule enforcement: the legal-move set (piece generation plus
/// castling), check status, move validation, and the mate queries.
///
/// A player holds no reference back to its board; every board-dependent
/// query takes the board as an argument.
#[derive(Clone, Debug)]
pub struct Player {
    alliance: Alliance,
    king: Piece,
    legal_moves: Vec<Move>,
    in_check: bool,
    castled: bool,
}

impl Player {
    /// Builds the player for one alliance during board construction. The
    /// check status is derived from the opponent's raw move list, before
    /// castles are appended, which keeps construction non-recursive.
    pub(crate) fn new(
        position: &Position,
        alliance: Alliance,
        raw_moves: Vec<Move>,
        opponent_raw: &[Move],
    ) -> Self {
        let king = establish_king(position, alliance);
        let in_check = is_attacked(king.square, opponent_raw);

        let mut legal_moves = raw_moves;
        legal_moves.extend(king_castles(position, alliance, king, in_check, opponent_raw));

        Self {
            alliance,
            king,
            legal_moves,
            in_check,
            castled: position.has_castled(alliance),
        }
    }

    pub fn alliance(&self) -> Alliance {
        self.alliance
    }

    pub fn king(&self) -> Piece {
        self.king
    }

    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    /// Returns true if this player's king is attacked.
    pub fn is_in_check(&self) -> bool {
        self.in_check
    }

    /// Returns true if this player has castled.
    pub fn is_castled(&self) -> bool {
        self.castled
    }

    /// Returns true if the move is in this player's legal-move set.
    pub fn is_move_legal(&self, mv: &Move) -> bool {
        self.legal_moves.contains(mv)
    }

    /// Attempts a move. The move must be a member of this player's legal
    /// set, and executing it must not leave the mover's own king attacked;
    /// the exposure check runs the move on a hypothetical board and inspects
    /// the new current player's (the opponent's) fresh legal moves against
    /// the king's square. Rejections return the original board unchanged.
    pub fn make_move(&self, board: &Board, mv: &Move) -> MoveTransition {
        if !self.is_move_legal(mv) {
            return MoveTransition {
                board: board.clone(),
                attempted_move: mv.clone(),
                status: MoveStatus::IllegalMove,
            };
        }

        let next = mv.execute(board);
        let own_king = next.player(self.alliance).king().square;
        if is_attacked(own_king, next.current_player().legal_moves()) {
            return MoveTransition {
                board: board.clone(),
                attempted_move: mv.clone(),
                status: MoveStatus::LeavesPlayerInCheck,
            };
        }

        MoveTransition {
            board: next,
            attempted_move: mv.clone(),
            status: MoveStatus::Done,
        }
    }

    /// Returns true if any legal move survives the self-check simulation.
    /// One board construction per candidate, so this is only called at turn
    /// boundaries, not inside the search's inner loop.
    pub fn has_escape_moves(&self, board: &Board) -> bool {
        self.legal_moves
            .iter()
            .any(|mv| self.make_move(board, mv).status.is_done())
    }

    /// Checkmate: in check with no escape.
    pub fn is_in_checkmate(&self, board: &Board) -> bool {
        self.in_check && !self.has_escape_moves(board)
    }

    /// Stalemate: not in check, but no legal move survives simulation.
    pub fn is_in_stalemate(&self, board: &Board) -> bool {
        !self.in_check && !self.has_escape_moves(board)
    }
}

fn establish_king(position: &Position, alliance: Alliance) -> Piece {
    for index in 0..64 {
        let square = Square::from_index(index).unwrap();
        if let Some(piece) = position.piece_at(square) {
            if piece.piece_type.is_king() && piece.alliance == alliance {
                return piece;
            }
        }
    }
    panic!("invalid board: no {} king found", alliance);
}

/// Generates the castle moves available to a player. Requirements: the king
/// and the rook on the corner square are both unmoved, the squares between
/// them are empty, the player is not in check, and the squares the king
/// crosses are covered by neither an opponent raw move nor an opponent pawn
/// diagonal. The b-square on the queenside only needs to be empty. The simulation in `make_move` covers
/// the king's own destination square.
fn king_castles(
    position: &Position,
    alliance: Alliance,
    king: Piece,
    in_check: bool,
    opponent_raw: &[Move],
) -> Vec<Move> {
    let mut castles = Vec::new();
    if !king.first_move || in_check {
        return castles;
    }

    let (kingside_corner, kingside_transit, kingside_king_to, kingside_rook_to) = match alliance {
        Alliance::White => (63, [61, 62], 62, 61),
        Alliance::Black => (7, [5, 6], 6, 5),
    };
    if let Some(rook) = corner_rook(position, alliance, kingside_corner) {
        let transit_clear = kingside_transit
            .iter()
            .all(|&index| position.piece_at(square(index)).is_none());
        let transit_safe = kingside_transit.iter().all(|&index| {
            !is_attacked(square(index), opponent_raw)
                && !pawn_guards(position, square(index), alliance.opponent())
        });
        if transit_clear && transit_safe {
            castles.push(Move::KingsideCastle {
                king,
                to: square(kingside_king_to),
                rook,
                rook_to: square(kingside_rook_to),
            });
        }
    }

    let (queenside_corner, queenside_clear, queenside_safe, queenside_king_to, queenside_rook_to) =
        match alliance {
            Alliance::White => (56, [57, 58, 59], [58, 59], 58, 59),
            Alliance::Black => (0, [1, 2, 3], [2, 3], 2, 3),
        };
    if let Some(rook) = corner_rook(position, alliance, queenside_corner) {
        let transit_clear = queenside_clear
            .iter()
            .all(|&index| position.piece_at(square(index)).is_none());
        let transit_safe = queenside_safe.iter().all(|&index| {
            !is_attacked(square(index), opponent_raw)
                && !pawn_guards(position, square(index), alliance.opponent())
        });
        if transit_clear && transit_safe {
            castles.push(Move::QueensideCastle {
                king,
                to: square(queenside_king_to),
                rook,
                rook_to: square(queenside_rook_to),
            });
        }
    }

    castles
}

fn corner_rook(position: &Position, alliance: Alliance, corner: u8) -> Option<Piece> {
    position
        .piece_at(square(corner))
        .filter(|piece| {
            piece.piece_type.is_rook() && piece.alliance == alliance && piece.first_move
        })
}

fn square(index: u8) -> Square {
    Square::from_index(index).unwrap()
}
