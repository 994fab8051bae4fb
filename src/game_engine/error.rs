//! Error types raised by round generation and sessions.

use thiserror::Error;

use crate::game_engine::models::GameType;

/// Errors surfaced by the game engine.
///
/// None of these is fatal: each game fails on its own and the others stay
/// usable.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("not enough data for {game}: {reason}")]
    InsufficientData { game: GameType, reason: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl EngineError {
    pub fn insufficient(game: GameType, reason: impl Into<String>) -> Self {
        EngineError::InsufficientData { game, reason: reason.into() }
    }

    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, EngineError::InsufficientData { .. })
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
