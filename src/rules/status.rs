//! Game-status classification for the side to move.

use crate::core::piece::Side;
use crate::core::position::{Board, Move, Position, Status};

use super::{attacks, validate, Fault};

/// Classify `pos` for its side to move.
pub fn evaluate(pos: &Position) -> Result<Status, Fault> {
    let in_check = attacks::is_king_in_check(pos, pos.side_to_move)?;
    let has_move = has_any_legal_move(pos)?;

    Ok(match (in_check, has_move) {
        (true, true) => Status::Check,
        (true, false) => Status::Checkmate,
        (false, false) => Status::Stalemate,
        (false, true) => Status::Active,
    })
}

/// True iff the side to move has at least one legal move.
///
/// Probes every own piece against every board square with the full validator,
/// king-safety simulation included, stopping at the first hit. At most 64×64
/// probes of O(1)–O(8) geometric work each: fine for interactive play, not
/// meant for deep search.
pub fn has_any_legal_move(pos: &Position) -> Result<bool, Fault> {
    let side = pos.side_to_move;
    for (from, _) in pos.board.pieces(side) {
        for to in Board::squares() {
            if validate::validate_move(pos, Move::new(from, to), side)?.is_legal() {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Every legal move for the side to move, in board-scan order.
pub fn legal_moves(pos: &Position) -> Result<Vec<Move>, Fault> {
    let side = pos.side_to_move;
    let mut moves = Vec::new();
    for (from, _) in pos.board.pieces(side) {
        for to in Board::squares() {
            let mv = Move::new(from, to);
            if validate::validate_move(pos, mv, side)?.is_legal() {
                moves.push(mv);
            }
        }
    }
    Ok(moves)
}

/// The winning side, if the game has ended in checkmate.
///
/// The winner is the side that delivered the mate: the opponent of the side
/// left without moves.
pub fn winner(pos: &Position) -> Option<Side> {
    (pos.status == Status::Checkmate).then(|| pos.side_to_move.opponent())
}

/// True iff no further moves can be played.
pub fn is_game_over(pos: &Position) -> bool {
    matches!(pos.status, Status::Checkmate | Status::Stalemate)
}

/// True iff the game ended without a winner (stalemate, in this rule set).
pub fn is_draw(pos: &Position) -> bool {
    pos.status == Status::Stalemate
}
