//! Tunable engine settings.
//!
//! Defaults reproduce the original site: 8 memorama pairs, 4 quiz options,
//! a 1 s settle/feedback pause and a 1.5 s pause after a correct typed answer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::game_engine::error::{EngineError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub matching_pairs: usize,
    pub quiz_options: usize,
    pub min_scramble_len: usize,
    /// Upper bound on rejection-sampling loops before the fallback kicks in.
    pub max_draw_attempts: usize,
    pub settle_delay_ms: u64,
    pub quiz_feedback_delay_ms: u64,
    pub scramble_advance_delay_ms: u64,
    pub fill_blank_advance_delay_ms: u64,
    pub blank_marker: String,
    /// `Some(seed)` makes every round reproducible.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            matching_pairs: 8,
            quiz_options: 4,
            min_scramble_len: 3,
            max_draw_attempts: 1000,
            settle_delay_ms: 1000,
            quiz_feedback_delay_ms: 1000,
            scramble_advance_delay_ms: 1500,
            fill_blank_advance_delay_ms: 1500,
            blank_marker: "______".to_string(),
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Default settings with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        GameConfig { rng_seed: Some(seed), ..GameConfig::default() }
    }

    /// Parse and validate a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.matching_pairs == 0 {
            return Err(EngineError::InvalidConfig("matching_pairs must be at least 1".into()));
        }
        if self.quiz_options < 2 {
            return Err(EngineError::InvalidConfig("quiz_options must be at least 2".into()));
        }
        if self.min_scramble_len < 2 {
            return Err(EngineError::InvalidConfig("min_scramble_len must be at least 2".into()));
        }
        if self.max_draw_attempts == 0 {
            return Err(EngineError::InvalidConfig("max_draw_attempts must be at least 1".into()));
        }
        if self.blank_marker.is_empty() {
            return Err(EngineError::InvalidConfig("blank_marker must not be empty".into()));
        }
        Ok(())
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn quiz_feedback_delay(&self) -> Duration {
        Duration::from_millis(self.quiz_feedback_delay_ms)
    }

    pub fn scramble_advance_delay(&self) -> Duration {
        Duration::from_millis(self.scramble_advance_delay_ms)
    }

    pub fn fill_blank_advance_delay(&self) -> Duration {
        Duration::from_millis(self.fill_blank_advance_delay_ms)
    }
}
