//! Move application: build the successor position of a validated move.

use crate::core::piece::{Piece, PieceKind, Side};
use crate::core::position::{Move, Position};
use crate::core::square::Square;

use super::{attacks, status, Fault};

/// Apply `mv` for `side` and return the successor position.
///
/// The move must already have been accepted by
/// [`super::validate::validate_move`]; application is an unconditional
/// transformation, not a second legality gate. Handing it an unvalidated move
/// leaves the outcome to the caller's contract, except that a vacant origin is
/// still reported as a [`Fault`] rather than corrupting the board.
pub fn apply_move(pos: &Position, mv: Move, side: Side) -> Result<Position, Fault> {
    let mut next = pos.clone();

    let Some(piece) = next.board.get(mv.from) else {
        return Err(Fault::VacantOrigin { at: mv.from });
    };

    // Plain capture.
    if let Some(target) = next.board.get(mv.to) {
        next.captured.record(target);
    }

    // En passant: the captured pawn sits behind the destination square,
    // relative to the mover's direction of travel.
    if piece.kind == PieceKind::Pawn && pos.en_passant == Some(mv.to) && next.board.get(mv.to).is_none()
    {
        let passed = Square::new(mv.to.row - side.forward(), mv.to.col);
        if passed.in_bounds() {
            if let Some(pawn) = next.board.get(passed) {
                next.captured.record(pawn);
                next.board.set(passed, None);
            }
        }
    }

    next.board.set(mv.to, Some(piece));
    next.board.set(mv.from, None);

    match piece.kind {
        PieceKind::King => {
            next.castling.clear_side(side);
            next.kings.set(side, mv.to);

            // Castling: bring the rook across to the square the king crossed.
            if (mv.to.col - mv.from.col).abs() == 2 {
                let (rook_from, rook_to) = if mv.to.col > mv.from.col {
                    (Square::new(mv.from.row, 7), Square::new(mv.from.row, 5))
                } else {
                    (Square::new(mv.from.row, 0), Square::new(mv.from.row, 3))
                };
                let rook = next.board.get(rook_from);
                next.board.set(rook_to, rook);
                next.board.set(rook_from, None);
            }
        }
        PieceKind::Rook => {
            // Leaving a home corner forfeits that wing.
            if mv.from.row == side.home_row() {
                if mv.from.col == 0 {
                    next.castling.clear(side, false);
                } else if mv.from.col == 7 {
                    next.castling.clear(side, true);
                }
            }
        }
        _ => {}
    }

    // The en-passant window lasts exactly one ply.
    next.en_passant = None;
    if piece.kind == PieceKind::Pawn && (mv.to.row - mv.from.row).abs() == 2 {
        next.en_passant = Some(Square::new((mv.from.row + mv.to.row) / 2, mv.from.col));
    }

    // Promotion, defaulting to a queen when no kind was requested.
    if piece.kind == PieceKind::Pawn && mv.to.row == side.promotion_row() {
        let kind = mv.promotion.unwrap_or(PieceKind::Queen);
        next.board.set(mv.to, Some(Piece::new(kind, side)));
    }

    next.side_to_move = side.opponent();
    next.move_count += 1;
    next.last_move = Some(mv);
    next.history.push(mv);

    next.checks.white = attacks::is_king_in_check(&next, Side::White)?;
    next.checks.black = attacks::is_king_in_check(&next, Side::Black)?;
    next.status = status::evaluate(&next)?;

    Ok(next)
}
