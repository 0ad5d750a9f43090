//! Cross-module rule scenarios: full games of a few plies, the special
//! moves, and the mate/stalemate queries working together.

use woodpusher_core::{
    Alliance, Board, Builder, Move, MoveStatus, Piece, PieceType, Square,
};

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

fn play(board: &Board, from: &str, to: &str) -> Board {
    let mv = find_move(board, from, to);
    let transition = board.current_player().make_move(board, &mv);
    assert!(
        transition.status.is_done(),
        "move {}{} rejected with {:?}",
        from,
        to,
        transition.status
    );
    transition.board
}

#[test]
fn standard_board_places_all_thirty_two_pieces() {
    let board = Board::starting_position();

    let expected_back_rank = [
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Queen,
        PieceType::King,
        PieceType::Bishop,
        PieceType::Knight,
        PieceType::Rook,
    ];

    for column in 0..8u8 {
        let black_piece = board.piece_at(Square::from_index(column).unwrap()).unwrap();
        assert_eq!(black_piece.piece_type, expected_back_rank[column as usize]);
        assert_eq!(black_piece.alliance, Alliance::Black);

        let white_piece = board
            .piece_at(Square::from_index(56 + column).unwrap())
            .unwrap();
        assert_eq!(white_piece.piece_type, expected_back_rank[column as usize]);
        assert_eq!(white_piece.alliance, Alliance::White);
    }

    for index in 16..48u8 {
        assert!(board.piece_at(Square::from_index(index).unwrap()).is_none());
    }

    assert_eq!(board.current_player().alliance(), Alliance::White);
}

#[test]
fn executing_a_move_updates_exactly_the_two_squares() {
    let board = Board::starting_position();
    let mv = find_move(&board, "d2", "d4");
    let next = mv.execute(&board);

    assert!(next.piece_at(sq("d2")).is_none());
    let pawn = next.piece_at(sq("d4")).unwrap();
    assert_eq!(pawn.piece_type, PieceType::Pawn);
    assert!(!pawn.first_move);

    // Every other square is unchanged.
    for index in 0..64u8 {
        let square = Square::from_index(index).unwrap();
        if square != sq("d2") && square != sq("d4") {
            assert_eq!(board.piece_at(square), next.piece_at(square));
        }
    }
}

#[test]
fn make_move_is_idempotent() {
    let board = Board::starting_position();
    let mv = find_move(&board, "g1", "f3");

    let first = board.current_player().make_move(&board, &mv);
    let second = board.current_player().make_move(&board, &mv);

    assert_eq!(first.status, second.status);
    assert_eq!(first.status, MoveStatus::Done);
    assert_eq!(first.board, second.board);
}

#[test]
fn sliding_moves_stay_on_the_board() {
    let board = Board::starting_position();
    for alliance in [Alliance::White, Alliance::Black] {
        for mv in board.player(alliance).legal_moves() {
            assert!(mv.destination().index() < 64);
        }
    }
}

#[test]
fn adjacent_queen_mate_is_reported_for_the_mated_side_only() {
    // Black king h8, White queen g7 guarded by the king on g6.
    let mut builder = Builder::new(Alliance::Black);
    builder.set_piece(Piece::new(PieceType::King, Alliance::Black, sq("h8")));
    builder.set_piece(Piece::new(PieceType::Queen, Alliance::White, sq("g7")));
    builder.set_piece(Piece::new(PieceType::King, Alliance::White, sq("g6")));
    let board = builder.build();

    assert!(board.player(Alliance::Black).is_in_check());
    assert!(board.player(Alliance::Black).is_in_checkmate(&board));
    assert!(!board.player(Alliance::White).is_in_checkmate(&board));
    assert!(!board.player(Alliance::Black).is_in_stalemate(&board));
}

#[test]
fn cornered_king_with_no_moves_is_stalemate() {
    // The classic Qc7/Kb6 vs Ka8 stalemate.
    let mut builder = Builder::new(Alliance::Black);
    builder.set_piece(Piece::new(PieceType::King, Alliance::Black, sq("a8")));
    builder.set_piece(Piece::new(PieceType::Queen, Alliance::White, sq("c7")));
    builder.set_piece(Piece::new(PieceType::King, Alliance::White, sq("b6")));
    let board = builder.build();

    let black = board.player(Alliance::Black);
    assert!(!black.is_in_check());
    assert!(black.is_in_stalemate(&board));
    assert!(!black.is_in_checkmate(&board));
}

#[test]
fn en_passant_capture_empties_the_captured_square() {
    let mut board = Board::starting_position();
    board = play(&board, "e2", "e4");
    board = play(&board, "a7", "a6");
    board = play(&board, "e4", "e5");
    board = play(&board, "d7", "d5");

    let jumper = board.en_passant_pawn().expect("double push recorded");
    assert_eq!(jumper.square, sq("d5"));

    let capture = find_move(&board, "e5", "d6");
    assert!(matches!(capture, Move::EnPassant { .. }));

    let next = play(&board, "e5", "d6");
    assert!(next.piece_at(sq("d5")).is_none(), "captured pawn removed");
    assert!(next.piece_at(sq("e5")).is_none(), "source emptied");
    let pawn = next.piece_at(sq("d6")).unwrap();
    assert_eq!(pawn.piece_type, PieceType::Pawn);
    assert_eq!(pawn.alliance, Alliance::White);
}

#[test]
fn en_passant_window_closes_after_one_move() {
    let mut board = Board::starting_position();
    board = play(&board, "e2", "e4");
    board = play(&board, "a7", "a6");
    board = play(&board, "e4", "e5");
    board = play(&board, "d7", "d5");

    // The capture is available right now.
    assert!(board
        .current_player()
        .legal_moves()
        .iter()
        .any(|m| matches!(m, Move::EnPassant { .. })));

    // Decline it: the fresh board's en-passant field is empty, and the
    // capture is gone for good.
    board = play(&board, "h2", "h3");
    assert!(board.en_passant_pawn().is_none());
    board = play(&board, "a6", "a5");
    assert!(board
        .player(Alliance::White)
        .legal_moves()
        .iter()
        .all(|m| !matches!(m, Move::EnPassant { .. })));
}

#[test]
fn promotion_replaces_the_pawn_with_a_queen() {
    let mut builder = Builder::new(Alliance::White);
    builder.set_piece(Piece::new(PieceType::King, Alliance::White, sq("e1")));
    builder.set_piece(Piece::new(PieceType::King, Alliance::Black, sq("h6")));
    builder.set_piece(Piece {
        piece_type: PieceType::Pawn,
        alliance: Alliance::White,
        square: sq("b7"),
        first_move: false,
    });
    builder.set_piece(Piece::new(PieceType::Rook, Alliance::Black, sq("a8")));
    let board = builder.build();

    // Capturing promotion onto a8.
    let capture_promotion = find_move(&board, "b7", "a8");
    assert!(matches!(capture_promotion, Move::Promotion { .. }));
    let next = play(&board, "b7", "a8");

    let queen = next.piece_at(sq("a8")).unwrap();
    assert_eq!(queen.piece_type, PieceType::Queen);
    assert_eq!(queen.alliance, Alliance::White);
    assert!(!queen.first_move);
    assert!(next.piece_at(sq("b7")).is_none());
    assert!(next
        .pieces(Alliance::Black)
        .iter()
        .all(|p| !p.piece_type.is_rook()));
}

#[test]
fn castling_lifecycle() {
    // Clear White's kingside from the standard board, castle, and verify
    // the resulting rights and flags.
    let mut board = Board::starting_position();
    board = play(&board, "e2", "e4");
    board = play(&board, "e7", "e5");
    board = play(&board, "g1", "f3");
    board = play(&board, "b8", "c6");
    board = play(&board, "f1", "c4");
    board = play(&board, "g8", "f6");

    let castle = find_move(&board, "e1", "g1");
    assert!(matches!(castle, Move::KingsideCastle { .. }));

    board = play(&board, "e1", "g1");
    assert!(board.has_castled(Alliance::White));
    assert_eq!(
        board.piece_at(sq("g1")).unwrap().piece_type,
        PieceType::King
    );
    assert_eq!(
        board.piece_at(sq("f1")).unwrap().piece_type,
        PieceType::Rook
    );

    // The moved king keeps castling off the table for the rest of the game.
    board = play(&board, "d7", "d6");
    assert!(board
        .player(Alliance::White)
        .legal_moves()
        .iter()
        .all(|m| !matches!(m, Move::KingsideCastle { .. } | Move::QueensideCastle { .. })));
}
