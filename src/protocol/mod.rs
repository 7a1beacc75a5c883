//! The line-oriented request/response boundary.
//!
//! One JSON object per input line, one JSON object per output line,
//! synchronous, stateless: every request carries the position snapshot it
//! wants evaluated, and the session layer keeps the authoritative state per
//! match. Internally each action is a direct call into [`crate::rules`]; this
//! module only translates.
//!
//! Failure mapping, in line with the engine's two failure channels:
//! - malformed requests and unknown actions/game types become `{"error": ...}`
//! - illegal moves become `{"valid": false}`, a normal response
//! - engine faults (corrupted position) become `{"error": ...}`, so the
//!   caller can tell corruption apart from rule rejection

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::core::piece::Side;
use crate::core::position::{Move, Position};
use crate::rules::{apply, status, validate};

/// The only game this engine arbitrates.
const GAME_TYPE: &str = "chess";

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Action {
    Initialize,
    Validate,
    Apply,
    CheckWinner,
    IsGameOver,
    IsDraw,
}

#[derive(Debug, Deserialize)]
struct Request {
    action: Action,
    #[serde(default = "default_game_type")]
    game_type: String,
    #[serde(default)]
    state: Option<Position>,
    #[serde(default, rename = "move")]
    mv: Option<Move>,
    #[serde(default)]
    player_id: Option<Side>,
}

fn default_game_type() -> String {
    GAME_TYPE.to_string()
}

impl Request {
    fn state_arg(self) -> Result<Position, String> {
        self.state.ok_or_else(|| "missing field: state".to_string())
    }

    fn move_args(self) -> Result<(Position, Move, Side), String> {
        let state = self.state.ok_or_else(|| "missing field: state".to_string())?;
        let mv = self.mv.ok_or_else(|| "missing field: move".to_string())?;
        let side = self
            .player_id
            .ok_or_else(|| "missing field: player_id".to_string())?;
        Ok((state, mv, side))
    }
}

/// Handle one request line and produce exactly one JSON response line.
///
/// Every failure (unparseable JSON, missing fields, unknown action or game
/// type, engine fault) comes back as `{"error": ...}`; a request can never
/// crash the service.
pub fn handle_line(line: &str) -> String {
    dispatch(line)
        .unwrap_or_else(|message| json!({ "error": message }))
        .to_string()
}

fn dispatch(line: &str) -> Result<Value, String> {
    let req: Request =
        serde_json::from_str(line).map_err(|e| format!("invalid request: {e}"))?;
    if req.game_type != GAME_TYPE {
        return Err(format!("unknown game type: {}", req.game_type));
    }

    match req.action {
        Action::Initialize => encode(&Position::initial()),
        Action::Validate => {
            let (state, mv, side) = req.move_args()?;
            let verdict = validate::validate_move(&state, mv, side).map_err(|f| f.to_string())?;
            Ok(json!({ "valid": verdict.is_legal() }))
        }
        Action::Apply => {
            let (state, mv, side) = req.move_args()?;
            // Apply trusts its caller to have validated the move, but squares
            // straight off the wire still get a bounds check so a bad client
            // cannot push the board out of shape.
            if !mv.from.in_bounds() || !mv.to.in_bounds() {
                return Err("move squares out of bounds".to_string());
            }
            let next = apply::apply_move(&state, mv, side).map_err(|f| f.to_string())?;
            encode(&next)
        }
        Action::CheckWinner => {
            let state = req.state_arg()?;
            Ok(json!({ "winner": status::winner(&state) }))
        }
        Action::IsGameOver => {
            let state = req.state_arg()?;
            Ok(json!({ "game_over": status::is_game_over(&state) }))
        }
        Action::IsDraw => {
            let state = req.state_arg()?;
            Ok(json!({ "is_draw": status::is_draw(&state) }))
        }
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| format!("failed to encode response: {e}"))
}
