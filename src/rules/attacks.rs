//! Attack detection: can a piece of one side reach a given square?
//!
//! This is geometry only. Pawns "attack" their two diagonal squares even
//! though they may not move diagonally without capturing, and sliding pieces
//! scan their full ray, stopping at the first occupied square. Whether moving
//! to the square would otherwise be legal (turn order, king safety) is the
//! validator's business, not this module's.

use crate::core::piece::{PieceKind, Side};
use crate::core::position::{Board, Position};
use crate::core::square::{Square, Step};

use super::Fault;

/// True iff `target` is attacked by any piece of `by`.
///
/// Scans every piece of the attacking side; there is no shortcut subset. A
/// checker that only probes adjacent squares misses sliders and knights at
/// range and lets king-exposing moves through.
pub fn is_square_attacked(board: &Board, target: Square, by: Side) -> bool {
    for (from, piece) in board.pieces(by) {
        if from == target {
            continue;
        }
        if piece_attacks(board, piece.kind, piece.side, from, target) {
            return true;
        }
    }
    false
}

fn piece_attacks(board: &Board, kind: PieceKind, side: Side, from: Square, target: Square) -> bool {
    let dr = target.row - from.row;
    let dc = target.col - from.col;

    match kind {
        PieceKind::Pawn => dr == side.forward() && dc.abs() == 1,
        PieceKind::Knight => {
            let (ar, ac) = (dr.abs(), dc.abs());
            (ar == 2 && ac == 1) || (ar == 1 && ac == 2)
        }
        PieceKind::King => dr.abs() <= 1 && dc.abs() <= 1,
        PieceKind::Rook => (dr == 0 || dc == 0) && ray_clear(board, from, target),
        PieceKind::Bishop => dr.abs() == dc.abs() && ray_clear(board, from, target),
        PieceKind::Queen => {
            (dr == 0 || dc == 0 || dr.abs() == dc.abs()) && ray_clear(board, from, target)
        }
    }
}

/// True iff every square strictly between `from` and `to` is empty.
///
/// `from` and `to` must be distinct and aligned on a rank, file, or diagonal;
/// the walk steps one square at a time and stops at the first blocker.
pub(crate) fn ray_clear(board: &Board, from: Square, to: Square) -> bool {
    let step = Step::new((to.row - from.row).signum(), (to.col - from.col).signum());

    let mut cur = from + step;
    while cur != to {
        if board.get(cur).is_some() {
            return false;
        }
        cur = cur + step;
    }
    true
}

/// The true board location of `side`'s king.
///
/// The cached square is trusted only after verifying a matching king actually
/// sits there; otherwise this falls back to a board scan, so check detection
/// can never test a stale square.
pub fn king_square(pos: &Position, side: Side) -> Result<Square, Fault> {
    let cached = pos.kings.get(side);
    if cached.in_bounds() {
        if let Some(piece) = pos.board.get(cached) {
            if piece.kind == PieceKind::King && piece.side == side {
                return Ok(cached);
            }
        }
    }
    find_king(&pos.board, side)
}

/// Board-scan fallback for a stale king cache.
pub fn find_king(board: &Board, side: Side) -> Result<Square, Fault> {
    board
        .pieces(side)
        .find(|(_, piece)| piece.kind == PieceKind::King)
        .map(|(sq, _)| sq)
        .ok_or(Fault::KingMissing { side })
}

/// True iff `side`'s king is currently attacked.
pub fn is_king_in_check(pos: &Position, side: Side) -> Result<bool, Fault> {
    let king = king_square(pos, side)?;
    Ok(is_square_attacked(&pos.board, king, side.opponent()))
}
