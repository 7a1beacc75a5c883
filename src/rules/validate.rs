//! Move validation: the ordered legality checks for a candidate move.

use crate::core::piece::{Piece, PieceKind, Side};
use crate::core::position::{Board, Move, Position};
use crate::core::square::{Square, Step};

use super::attacks;
use super::{Fault, Rejection, Verdict};

/// Decide whether `mv` is legal for `side` in `pos`.
///
/// Checks run in a fixed order and stop at the first failing rule, so the
/// [`Rejection`] inside an `Illegal` verdict names exactly that rule.
/// Malformed input (out-of-range squares, vacant origins) is ordinary
/// rejection, never an error; `Err` is reserved for corrupted positions.
pub fn validate_move(pos: &Position, mv: Move, side: Side) -> Result<Verdict, Fault> {
    if side != pos.side_to_move {
        return Ok(Verdict::Illegal(Rejection::NotSideToMove));
    }
    if !mv.from.in_bounds() || !mv.to.in_bounds() {
        return Ok(Verdict::Illegal(Rejection::OffBoard));
    }
    if mv.from == mv.to {
        return Ok(Verdict::Illegal(Rejection::NullMove));
    }

    let Some(piece) = pos.board.get(mv.from) else {
        return Ok(Verdict::Illegal(Rejection::EmptyOrigin));
    };
    if piece.side != side {
        return Ok(Verdict::Illegal(Rejection::ForeignPiece));
    }

    if let Some(target) = pos.board.get(mv.to) {
        // The game must end by checkmate before a king could ever be taken;
        // this guard holds that invariant against any caller.
        if target.kind == PieceKind::King {
            return Ok(Verdict::Illegal(Rejection::KingCapture));
        }
        if target.side == side {
            return Ok(Verdict::Illegal(Rejection::OwnPieceOnTarget));
        }
    }

    if let Err(rejection) = movement_pattern(pos, mv, piece) {
        return Ok(Verdict::Illegal(rejection));
    }

    // The decisive filter: pinned pieces and moves that ignore an existing
    // check fail here, whatever their pattern said.
    if exposes_own_king(pos, mv, piece)? {
        return Ok(Verdict::Illegal(Rejection::ExposesKing));
    }

    Ok(Verdict::Legal)
}

/// Does the piece's movement pattern permit `mv` on this board?
fn movement_pattern(pos: &Position, mv: Move, piece: Piece) -> Result<(), Rejection> {
    let dr = mv.to.row - mv.from.row;
    let dc = mv.to.col - mv.from.col;

    match piece.kind {
        PieceKind::Pawn => pawn_pattern(pos, mv, piece.side),
        PieceKind::Knight => {
            let (ar, ac) = (dr.abs(), dc.abs());
            if (ar == 2 && ac == 1) || (ar == 1 && ac == 2) {
                Ok(())
            } else {
                Err(Rejection::IllegalPattern)
            }
        }
        PieceKind::Rook => slider_pattern(&pos.board, mv, dr == 0 || dc == 0),
        PieceKind::Bishop => slider_pattern(&pos.board, mv, dr.abs() == dc.abs()),
        PieceKind::Queen => {
            slider_pattern(&pos.board, mv, dr == 0 || dc == 0 || dr.abs() == dc.abs())
        }
        PieceKind::King => {
            if dr.abs() <= 1 && dc.abs() <= 1 {
                Ok(())
            } else if dr == 0 && dc.abs() == 2 {
                castling_pattern(pos, mv, piece.side)
            } else {
                Err(Rejection::IllegalPattern)
            }
        }
    }
}

fn slider_pattern(board: &Board, mv: Move, aligned: bool) -> Result<(), Rejection> {
    if aligned && attacks::ray_clear(board, mv.from, mv.to) {
        Ok(())
    } else {
        Err(Rejection::IllegalPattern)
    }
}

fn pawn_pattern(pos: &Position, mv: Move, side: Side) -> Result<(), Rejection> {
    let dir = side.forward();
    let dr = mv.to.row - mv.from.row;
    let dc = mv.to.col - mv.from.col;
    let target = pos.board.get(mv.to);

    // A pawn reaching the last rank promotes; only the four regular kinds may
    // be requested for the replacement piece.
    if mv.to.row == side.promotion_row()
        && matches!(mv.promotion, Some(PieceKind::King) | Some(PieceKind::Pawn))
    {
        return Err(Rejection::IllegalPattern);
    }

    if dc == 0 {
        // Forward steps only onto empty squares.
        if target.is_some() {
            return Err(Rejection::IllegalPattern);
        }
        if dr == dir {
            return Ok(());
        }
        if dr == 2 * dir
            && mv.from.row == side.pawn_row()
            && pos.board.get(mv.from + Step::new(dir, 0)).is_none()
        {
            return Ok(());
        }
        Err(Rejection::IllegalPattern)
    } else if dc.abs() == 1 && dr == dir {
        // Diagonal steps only when capturing: a piece on the destination
        // (own pieces and kings were already rejected) or the en-passant
        // window opened by the opponent's last double step.
        if target.is_some() || pos.en_passant == Some(mv.to) {
            Ok(())
        } else {
            Err(Rejection::IllegalPattern)
        }
    } else {
        Err(Rejection::IllegalPattern)
    }
}

fn castling_pattern(pos: &Position, mv: Move, side: Side) -> Result<(), Rejection> {
    let kingside = mv.to.col > mv.from.col;
    if !pos.castling.allows(side, kingside) {
        return Err(Rejection::CastlingBarred);
    }

    // The rights flag alone is not enough: the rook may have been captured on
    // its home corner without the flag ever clearing.
    let rook_col = if kingside { 7 } else { 0 };
    let rook_sq = Square::new(mv.from.row, rook_col);
    match pos.board.get(rook_sq) {
        Some(piece) if piece.kind == PieceKind::Rook && piece.side == side => {}
        _ => return Err(Rejection::CastlingBarred),
    }

    // Every square strictly between king and rook must be empty.
    for col in mv.from.col.min(rook_col) + 1..mv.from.col.max(rook_col) {
        if pos.board.get(Square::new(mv.from.row, col)).is_some() {
            return Err(Rejection::CastlingBarred);
        }
    }

    // The king may not castle out of, through, or into an attacked square.
    for col in mv.from.col.min(mv.to.col)..=mv.from.col.max(mv.to.col) {
        let transit = Square::new(mv.from.row, col);
        if attacks::is_square_attacked(&pos.board, transit, side.opponent()) {
            return Err(Rejection::CastlingBarred);
        }
    }

    Ok(())
}

/// Simulate `mv` on a scratch board and report whether the mover's own king
/// ends up attacked.
///
/// The scratch is a structural copy of the grid: relocate the piece, vacate an
/// en-passant victim, and shift the king square if the king itself moved.
fn exposes_own_king(pos: &Position, mv: Move, piece: Piece) -> Result<bool, Fault> {
    let side = piece.side;

    let mut board = pos.board;
    board.set(mv.to, Some(piece));
    board.set(mv.from, None);

    // An en-passant capture also vacates the passed pawn's square, which can
    // open a rank or diagonal onto the king.
    if piece.kind == PieceKind::Pawn
        && pos.en_passant == Some(mv.to)
        && pos.board.get(mv.to).is_none()
    {
        board.set(Square::new(mv.to.row - side.forward(), mv.to.col), None);
    }

    let king = if piece.kind == PieceKind::King {
        mv.to
    } else {
        attacks::king_square(pos, side)?
    };

    Ok(attacks::is_square_attacked(&board, king, side.opponent()))
}
