use std::sync::Mutex;

use once_cell::sync::Lazy;
use wasm_bindgen::prelude::*;

use crate::ai::PositionalSelector;
use crate::game::GameSession;
use crate::stats::StatsRecord;
use crate::types::GameMode;

/// The single session the browser front end plays against. The host is
/// single-threaded, so the mutex is never contended; it only exists to
/// make the global safe to hand out.
static SESSION: Lazy<Mutex<GameSession>> =
    Lazy::new(|| Mutex::new(GameSession::new(GameMode::Solo, Box::new(PositionalSelector))));

fn with_session<T>(f: impl FnOnce(&mut GameSession) -> Result<T, String>) -> Result<T, JsValue> {
    let mut session = SESSION
        .lock()
        .map_err(|_| JsValue::from_str("session lock poisoned"))?;
    f(&mut session).map_err(|message| JsValue::from_str(&message))
}

/// Starts a fresh game in the given mode (`"solo"` or `"duo"`).
#[wasm_bindgen]
pub fn new_game(mode: &str) -> Result<(), JsValue> {
    with_session(|session| {
        session.set_mode(GameMode::parse(mode)?);
        Ok(())
    })
}

#[wasm_bindgen]
pub fn set_mode(mode: &str) -> Result<(), JsValue> {
    new_game(mode)
}

#[wasm_bindgen]
pub fn reset() -> Result<(), JsValue> {
    with_session(|session| {
        session.reset();
        Ok(())
    })
}

/// Places a stone for the human side to move. A rejected click comes
/// back as an error and leaves the game untouched.
#[wasm_bindgen]
pub fn submit_move(row: u8, col: u8) -> Result<(), JsValue> {
    with_session(|session| session.submit_move(row, col))
}

/// Applies the computer's scheduled move once its thinking delay has
/// elapsed. Returns `true` when a move was applied; the front end calls
/// this from its animation loop while the thinking flag is up.
#[wasm_bindgen]
pub fn poll_cpu() -> Result<bool, JsValue> {
    with_session(|session| session.poll_cpu())
}

#[wasm_bindgen]
pub fn game_state() -> Result<JsValue, JsValue> {
    let state = with_session(|session| Ok(session.to_game_state()))?;
    serde_wasm_bindgen::to_value(&state).map_err(JsValue::from)
}

/// Final score summary; only valid once the game-over flag is set.
#[wasm_bindgen]
pub fn game_result() -> Result<JsValue, JsValue> {
    let result = with_session(|session| {
        if !session.is_game_over() {
            return Err("game is not over yet".to_string());
        }
        Ok(session.to_game_result())
    })?;
    serde_wasm_bindgen::to_value(&result).map_err(JsValue::from)
}

/// Hands the current tallies to the persistence collaborator.
#[wasm_bindgen]
pub fn export_stats() -> Result<Vec<u8>, JsValue> {
    with_session(|session| Ok(session.stats().to_bytes()))
}

/// Restores tallies saved by a previous session. A corrupt blob keeps
/// the current in-memory record instead of failing the game.
#[wasm_bindgen]
pub fn import_stats(bytes: &[u8]) -> Result<(), JsValue> {
    with_session(|session| {
        session.set_stats(StatsRecord::from_bytes(bytes)?);
        Ok(())
    })
}
