use arbiter::core::piece::{Piece, PieceKind, Side};
use arbiter::core::position::{
    Board, CapturedPieces, CastlingRights, CheckFlags, KingSquares, Move, Position, Status,
};
use arbiter::core::square::Square;
use arbiter::rules::{apply, validate, Rejection, Verdict};

fn custom(pieces: &[(PieceKind, Side, (i32, i32))], to_move: Side) -> Position {
    let mut board = Board::empty();
    let mut kings = KingSquares {
        white: Square::new(-1, -1),
        black: Square::new(-1, -1),
    };
    for &(kind, side, (row, col)) in pieces {
        let sq = Square::new(row, col);
        board.set(sq, Some(Piece::new(kind, side)));
        if kind == PieceKind::King {
            kings.set(side, sq);
        }
    }
    Position {
        board,
        side_to_move: to_move,
        move_count: 0,
        captured: CapturedPieces::default(),
        castling: CastlingRights::none(),
        en_passant: None,
        kings,
        checks: CheckFlags::default(),
        status: Status::Active,
        last_move: None,
        history: Vec::new(),
    }
}

fn mv(from: (i32, i32), to: (i32, i32)) -> Move {
    Move::new(Square::new(from.0, from.1), Square::new(to.0, to.1))
}

/// Apply a sequence of moves, asserting each one is legal first.
fn play(mut pos: Position, moves: &[((i32, i32), (i32, i32))]) -> Position {
    for &(from, to) in moves {
        let m = mv(from, to);
        let side = pos.side_to_move;
        assert!(
            validate::validate_move(&pos, m, side).unwrap().is_legal(),
            "expected {m:?} to be legal for {side:?}"
        );
        pos = apply::apply_move(&pos, m, side).unwrap();
    }
    pos
}

#[test]
fn a_double_step_opens_the_en_passant_window() {
    let pos = play(Position::initial(), &[((6, 4), (4, 4))]);
    assert_eq!(pos.en_passant, Some(Square::new(5, 4)));

    let pos = play(pos, &[((1, 4), (2, 4))]);
    // A single step opens nothing.
    assert_eq!(pos.en_passant, None);
}

#[test]
fn en_passant_captures_the_passed_pawn() {
    // 1. e4 a6  2. e5 d5 leaves the white e-pawn beside the black d-pawn.
    let pos = play(
        Position::initial(),
        &[
            ((6, 4), (4, 4)),
            ((1, 0), (2, 0)),
            ((4, 4), (3, 4)),
            ((1, 3), (3, 3)),
        ],
    );
    assert_eq!(pos.en_passant, Some(Square::new(2, 3)));

    let take = mv((3, 4), (2, 3));
    assert_eq!(
        validate::validate_move(&pos, take, Side::White).unwrap(),
        Verdict::Legal
    );

    let next = apply::apply_move(&pos, take, Side::White).unwrap();
    assert_eq!(
        next.board.get(Square::new(2, 3)),
        Some(Piece::new(PieceKind::Pawn, Side::White))
    );
    // The passed pawn is gone and recorded as captured.
    assert_eq!(next.board.get(Square::new(3, 3)), None);
    assert_eq!(next.captured.black, vec![Piece::new(PieceKind::Pawn, Side::Black)]);
    assert_eq!(next.en_passant, None);
}

#[test]
fn the_en_passant_window_closes_after_one_ply() {
    let pos = play(
        Position::initial(),
        &[
            ((6, 4), (4, 4)),
            ((1, 0), (2, 0)),
            ((4, 4), (3, 4)),
            ((1, 3), (3, 3)),
            // White declines the capture...
            ((7, 6), (5, 5)),
            ((1, 7), (2, 7)),
        ],
    );

    // ...and may not come back for it.
    assert_eq!(
        validate::validate_move(&pos, mv((3, 4), (2, 3)), Side::White).unwrap(),
        Verdict::Illegal(Rejection::IllegalPattern)
    );
}

#[test]
fn kingside_castling_relocates_king_and_rook() {
    let mut pos = custom(
        &[
            (PieceKind::King, Side::White, (7, 4)),
            (PieceKind::Rook, Side::White, (7, 7)),
            (PieceKind::King, Side::Black, (0, 4)),
        ],
        Side::White,
    );
    pos.castling.white_kingside = true;

    let castle = mv((7, 4), (7, 6));
    assert_eq!(
        validate::validate_move(&pos, castle, Side::White).unwrap(),
        Verdict::Legal
    );

    let next = apply::apply_move(&pos, castle, Side::White).unwrap();
    assert_eq!(
        next.board.get(Square::new(7, 6)),
        Some(Piece::new(PieceKind::King, Side::White))
    );
    assert_eq!(
        next.board.get(Square::new(7, 5)),
        Some(Piece::new(PieceKind::Rook, Side::White))
    );
    assert_eq!(next.board.get(Square::new(7, 7)), None);
    assert_eq!(next.board.get(Square::new(7, 4)), None);
    assert_eq!(next.kings.get(Side::White), Square::new(7, 6));
    assert!(!next.castling.white_kingside);
    assert!(!next.castling.white_queenside);
}

#[test]
fn queenside_castling_relocates_king_and_rook() {
    let mut pos = custom(
        &[
            (PieceKind::King, Side::Black, (0, 4)),
            (PieceKind::Rook, Side::Black, (0, 0)),
            (PieceKind::King, Side::White, (7, 4)),
        ],
        Side::Black,
    );
    pos.castling.black_queenside = true;

    let castle = mv((0, 4), (0, 2));
    assert_eq!(
        validate::validate_move(&pos, castle, Side::Black).unwrap(),
        Verdict::Legal
    );

    let next = apply::apply_move(&pos, castle, Side::Black).unwrap();
    assert_eq!(
        next.board.get(Square::new(0, 2)),
        Some(Piece::new(PieceKind::King, Side::Black))
    );
    assert_eq!(
        next.board.get(Square::new(0, 3)),
        Some(Piece::new(PieceKind::Rook, Side::Black))
    );
    assert_eq!(next.board.get(Square::new(0, 0)), None);
}

#[test]
fn castling_needs_rights_a_rook_and_a_clear_path() {
    let base = custom(
        &[
            (PieceKind::King, Side::White, (7, 4)),
            (PieceKind::Rook, Side::White, (7, 7)),
            (PieceKind::King, Side::Black, (0, 4)),
        ],
        Side::White,
    );
    let castle = mv((7, 4), (7, 6));

    // No rights.
    assert_eq!(
        validate::validate_move(&base, castle, Side::White).unwrap(),
        Verdict::Illegal(Rejection::CastlingBarred)
    );

    // Rights but no rook on the corner.
    let mut no_rook = base.clone();
    no_rook.castling.white_kingside = true;
    no_rook.board.set(Square::new(7, 7), None);
    assert_eq!(
        validate::validate_move(&no_rook, castle, Side::White).unwrap(),
        Verdict::Illegal(Rejection::CastlingBarred)
    );

    // Rights and rook, but a knight still on g1.
    let mut blocked = base.clone();
    blocked.castling.white_kingside = true;
    blocked.board.set(
        Square::new(7, 6),
        Some(Piece::new(PieceKind::Knight, Side::White)),
    );
    assert_eq!(
        validate::validate_move(&blocked, castle, Side::White).unwrap(),
        Verdict::Illegal(Rejection::CastlingBarred)
    );
}

#[test]
fn castling_is_barred_in_and_through_check() {
    let mut pos = custom(
        &[
            (PieceKind::King, Side::White, (7, 4)),
            (PieceKind::Rook, Side::White, (7, 7)),
            (PieceKind::Rook, Side::Black, (0, 5)),
            (PieceKind::King, Side::Black, (0, 0)),
        ],
        Side::White,
    );
    pos.castling.white_kingside = true;
    let castle = mv((7, 4), (7, 6));

    // The rook on f8 sweeps the f1 transit square.
    assert_eq!(
        validate::validate_move(&pos, castle, Side::White).unwrap(),
        Verdict::Illegal(Rejection::CastlingBarred)
    );

    // Move the attacker onto the e-file: now the king is in check itself.
    pos.board.set(Square::new(0, 5), None);
    pos.board.set(
        Square::new(0, 4),
        Some(Piece::new(PieceKind::Rook, Side::Black)),
    );
    assert_eq!(
        validate::validate_move(&pos, castle, Side::White).unwrap(),
        Verdict::Illegal(Rejection::CastlingBarred)
    );
}

#[test]
fn moving_rook_or_king_forfeits_the_rights() {
    let mut pos = custom(
        &[
            (PieceKind::King, Side::White, (7, 4)),
            (PieceKind::Rook, Side::White, (7, 0)),
            (PieceKind::Rook, Side::White, (7, 7)),
            (PieceKind::King, Side::Black, (0, 4)),
        ],
        Side::White,
    );
    pos.castling = CastlingRights::initial();

    // Rook leaves h1: only the kingside flag clears.
    let pos = play(pos, &[((7, 7), (5, 7))]);
    assert!(!pos.castling.white_kingside);
    assert!(pos.castling.white_queenside);

    // Black king moves: both black flags clear.
    let pos = play(pos, &[((0, 4), (1, 4))]);
    assert!(!pos.castling.black_kingside);
    assert!(!pos.castling.black_queenside);
}

#[test]
fn promotion_defaults_to_a_queen() {
    let pos = custom(
        &[
            (PieceKind::Pawn, Side::White, (1, 0)),
            (PieceKind::King, Side::White, (7, 4)),
            (PieceKind::King, Side::Black, (0, 7)),
        ],
        Side::White,
    );

    let next = apply::apply_move(&pos, mv((1, 0), (0, 0)), Side::White).unwrap();
    assert_eq!(
        next.board.get(Square::new(0, 0)),
        Some(Piece::new(PieceKind::Queen, Side::White))
    );
}

#[test]
fn promotion_to_a_knight_produces_a_knight() {
    let pos = custom(
        &[
            (PieceKind::Pawn, Side::White, (1, 0)),
            (PieceKind::King, Side::White, (7, 4)),
            (PieceKind::King, Side::Black, (0, 7)),
        ],
        Side::White,
    );

    let promote = Move::promoting(Square::new(1, 0), Square::new(0, 0), PieceKind::Knight);
    assert_eq!(
        validate::validate_move(&pos, promote, Side::White).unwrap(),
        Verdict::Legal
    );

    let next = apply::apply_move(&pos, promote, Side::White).unwrap();
    assert_eq!(
        next.board.get(Square::new(0, 0)),
        Some(Piece::new(PieceKind::Knight, Side::White))
    );
}

#[test]
fn promotion_to_a_king_is_rejected() {
    let pos = custom(
        &[
            (PieceKind::Pawn, Side::White, (1, 0)),
            (PieceKind::King, Side::White, (7, 4)),
            (PieceKind::King, Side::Black, (0, 7)),
        ],
        Side::White,
    );

    let promote = Move::promoting(Square::new(1, 0), Square::new(0, 0), PieceKind::King);
    assert_eq!(
        validate::validate_move(&pos, promote, Side::White).unwrap(),
        Verdict::Illegal(Rejection::IllegalPattern)
    );
}
