use serde::{Deserialize, Serialize};

/// The two sides. On the wire White is `1` and Black is `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Side {
    White,
    Black,
}

impl Side {
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Row direction this side's pawns advance in (white moves toward row 0).
    #[inline]
    pub fn forward(self) -> i32 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    /// Row this side's pawns start on.
    #[inline]
    pub fn pawn_row(self) -> i32 {
        match self {
            Side::White => 6,
            Side::Black => 1,
        }
    }

    /// Row this side's pawns promote on.
    #[inline]
    pub fn promotion_row(self) -> i32 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }

    /// This side's back rank, where its king and rooks start.
    #[inline]
    pub fn home_row(self) -> i32 {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }
}

impl From<Side> for u8 {
    fn from(side: Side) -> u8 {
        match side {
            Side::White => 1,
            Side::Black => 2,
        }
    }
}

impl TryFrom<u8> for Side {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Side::White),
            2 => Ok(Side::Black),
            other => Err(format!("invalid side: {other}")),
        }
    }
}

/// The six piece kinds, lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

/// A piece on the board. On the wire: `{"type": "pawn", "color": 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    #[serde(rename = "type")]
    pub kind: PieceKind,
    #[serde(rename = "color")]
    pub side: Side,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }
}
