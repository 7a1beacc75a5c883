//! The authoritative game-state value and its wire schema.
//!
//! A [`Position`] is a complete snapshot: board placement plus every piece of
//! rule-relevant bookkeeping (castling rights, en-passant window, cached king
//! squares, derived status). The rules layer never mutates one in place; it
//! reads positions, simulates candidate moves on scratch copies of the
//! [`Board`], and produces successors as fresh values.
//!
//! Serde attributes reproduce the field names and encodings of the session
//! layer's state schema, so a round-tripped position is byte-compatible with
//! what the server already stores.

use serde::{Deserialize, Serialize};

use crate::core::piece::{Piece, PieceKind, Side};
use crate::core::square::{Square, BOARD_SIZE};

/// 8×8 piece grid. Row 0 is rank 8 (black's back rank).
///
/// `Copy`: simulation takes a structural snapshot of the grid, never a
/// serialization round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board([[Option<Piece>; 8]; 8]);

impl Board {
    pub fn empty() -> Self {
        Board([[None; 8]; 8])
    }

    /// The piece on `sq`, which must be in bounds.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        debug_assert!(sq.in_bounds());
        self.0[sq.row as usize][sq.col as usize]
    }

    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        debug_assert!(sq.in_bounds());
        self.0[sq.row as usize][sq.col as usize] = piece;
    }

    /// All 64 squares in row-major order.
    pub fn squares() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square::new(row, col)))
    }

    /// Squares holding a piece of `side`, with the piece.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Self::squares().filter_map(move |sq| match self.get(sq) {
            Some(piece) if piece.side == side => Some((sq, piece)),
            _ => None,
        })
    }
}

/// Per-side, per-wing castling eligibility.
///
/// Flags are only ever cleared: once the king or the relevant rook has moved,
/// the wing is forfeited for the rest of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub fn initial() -> Self {
        Self {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    pub fn none() -> Self {
        Self {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    #[inline]
    pub fn allows(&self, side: Side, kingside: bool) -> bool {
        match (side, kingside) {
            (Side::White, true) => self.white_kingside,
            (Side::White, false) => self.white_queenside,
            (Side::Black, true) => self.black_kingside,
            (Side::Black, false) => self.black_queenside,
        }
    }

    pub fn clear(&mut self, side: Side, kingside: bool) {
        match (side, kingside) {
            (Side::White, true) => self.white_kingside = false,
            (Side::White, false) => self.white_queenside = false,
            (Side::Black, true) => self.black_kingside = false,
            (Side::Black, false) => self.black_queenside = false,
        }
    }

    pub fn clear_side(&mut self, side: Side) {
        self.clear(side, true);
        self.clear(side, false);
    }
}

/// Cached king locations, one per side.
///
/// [`crate::rules::apply::apply_move`] keeps these in sync with the board on
/// every king move; [`crate::rules::attacks::king_square`] verifies them
/// before trusting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KingSquares {
    pub white: Square,
    pub black: Square,
}

impl KingSquares {
    #[inline]
    pub fn get(&self, side: Side) -> Square {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }

    pub fn set(&mut self, side: Side, sq: Square) {
        match side {
            Side::White => self.white = sq,
            Side::Black => self.black = sq,
        }
    }
}

/// Derived per-side check booleans, recomputed after every applied move.
/// Display bookkeeping only; no rule reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckFlags {
    pub white: bool,
    pub black: bool,
}

/// Captured pieces, keyed by the captured piece's own side. Append-only,
/// display bookkeeping only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CapturedPieces {
    pub white: Vec<Piece>,
    pub black: Vec<Piece>,
}

impl CapturedPieces {
    pub fn record(&mut self, piece: Piece) {
        match piece.side {
            Side::White => self.white.push(piece),
            Side::Black => self.black.push(piece),
        }
    }
}

/// Game status for the side to move, recomputed after every applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Check,
    Checkmate,
    Stalemate,
}

/// A candidate or applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn promoting(from: Square, to: Square, kind: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(kind),
        }
    }
}

/// A complete, immutable snapshot of a game.
///
/// Invariants the rules layer maintains and relies on:
/// - exactly one king per side is on the board at all times;
/// - `kings` points at those kings (a stale cache is re-derived, a missing
///   king is a [`crate::rules::Fault`]);
/// - `en_passant` survives exactly one ply after a pawn double step;
/// - `castling` flags are only ever cleared;
/// - `status` describes `side_to_move` and is recomputed on every apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub board: Board,
    #[serde(rename = "current_player")]
    pub side_to_move: Side,
    #[serde(rename = "moves_count")]
    pub move_count: u32,
    #[serde(rename = "captured_pieces")]
    pub captured: CapturedPieces,
    #[serde(rename = "castling_rights")]
    pub castling: CastlingRights,
    #[serde(rename = "en_passant_target")]
    pub en_passant: Option<Square>,
    #[serde(rename = "king_positions")]
    pub kings: KingSquares,
    #[serde(rename = "check_status")]
    pub checks: CheckFlags,
    #[serde(rename = "game_status")]
    pub status: Status,
    pub last_move: Option<Move>,
    #[serde(rename = "move_history")]
    pub history: Vec<Move>,
}

impl Position {
    /// The standard starting position, White to move.
    pub fn initial() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Board::empty();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            let col = col as i32;
            board.set(Square::new(0, col), Some(Piece::new(kind, Side::Black)));
            board.set(Square::new(1, col), Some(Piece::new(PieceKind::Pawn, Side::Black)));
            board.set(Square::new(6, col), Some(Piece::new(PieceKind::Pawn, Side::White)));
            board.set(Square::new(7, col), Some(Piece::new(kind, Side::White)));
        }

        Position {
            board,
            side_to_move: Side::White,
            move_count: 0,
            captured: CapturedPieces::default(),
            castling: CastlingRights::initial(),
            en_passant: None,
            kings: KingSquares {
                white: Square::new(7, 4),
                black: Square::new(0, 4),
            },
            checks: CheckFlags::default(),
            status: Status::Active,
            last_move: None,
            history: Vec::new(),
        }
    }
}
