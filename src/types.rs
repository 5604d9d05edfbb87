use serde::{Deserialize, Serialize};

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

/// Who sits across the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Human plays black, the computer plays white.
    Solo,
    /// Two humans on the same device.
    Duo,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Solo => "solo",
            GameMode::Duo => "duo",
        }
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "solo" => Ok(GameMode::Solo),
            "duo" => Ok(GameMode::Duo),
            other => Err(format!("unknown game mode: {other}")),
        }
    }

    pub(crate) fn to_byte(self) -> u8 {
        match self {
            GameMode::Solo => 0,
            GameMode::Duo => 1,
        }
    }

    pub(crate) fn from_byte(value: u8) -> Result<Self, String> {
        match value {
            0 => Ok(GameMode::Solo),
            1 => Ok(GameMode::Duo),
            other => Err(format!("invalid game mode byte: {other}")),
        }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub board: Vec<u8>,
    pub current_player: u8,
    pub mode: GameMode,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    /// `true` while a scheduled computer move has not fired yet.
    pub is_thinking: bool,
    /// Contract:
    /// - `true` when the previous transition skipped a side with no moves.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    /// The side that was skipped, when `is_pass` is set.
    pub passed_player: Option<u8>,
    /// Flipped positions (0..=63) from the last accepted move.
    pub flipped: Vec<u8>,
    /// Legal placements for the side to move, row-major order.
    pub legal_moves: Vec<Position>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: u8,
    pub black_count: u8,
    pub white_count: u8,
}
