//! Shared helpers for the game modules.
//!
//! Round IDs, answer normalisation, and the session plumbing every game
//! repeats (RNG seeding, score, generation counter, pending timer) live here
//! so the game files only carry game rules.

use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::game_engine::{
    config::GameConfig,
    models::{GameType, SessionStatus},
    scheduler::{ScheduledTask, TimerKind, TimerToken},
};

/// Unique round ID from game prefix + RNG draw, e.g. `"QZ-1A2B3C4D"`.
pub fn make_round_id(game: GameType, rng: &mut impl RngCore) -> String {
    format!("{}-{:08X}", game.prefix(), rng.next_u32())
}

/// Seeded RNG when the config pins a seed, entropy otherwise.
pub fn make_rng(config: &GameConfig) -> StdRng {
    match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    }
}

/// Trim and lowercase typed input for comparison.
pub fn normalize_answer(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Expected blank word: lowercased with every `?` removed.
pub fn normalize_blank_word(word: &str) -> String {
    word.to_lowercase().replace('?', "")
}

/// State common to every session: RNG, score, status, and timer bookkeeping.
#[derive(Debug)]
pub struct SessionCore {
    pub game: GameType,
    pub rng: StdRng,
    pub score: u32,
    pub status: SessionStatus,
    generation: u64,
    pending: Option<ScheduledTask>,
}

impl SessionCore {
    pub fn new(game: GameType, config: &GameConfig) -> Self {
        SessionCore {
            game,
            rng: make_rng(config),
            score: 0,
            status: SessionStatus::Idle,
            generation: 0,
            pending: None,
        }
    }

    /// Invalidate the current round and any timer scheduled against it.
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.pending = None;
        self.generation
    }

    pub fn schedule(&mut self, kind: TimerKind, delay: std::time::Duration) -> ScheduledTask {
        let task = ScheduledTask {
            token: TimerToken { game: self.game, generation: self.generation, kind },
            delay,
        };
        self.pending = Some(task);
        task
    }

    pub fn pending(&self) -> Option<ScheduledTask> {
        self.pending
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume the pending task if `token` matches it; stale tokens are
    /// rejected and leave the pending task in place.
    pub fn take_pending(&mut self, token: TimerToken) -> bool {
        match self.pending {
            Some(task) if task.token == token => {
                self.pending = None;
                true
            }
            _ => {
                tracing::trace!(
                    "{} ignoring stale timer {:?} (generation now {})",
                    self.game,
                    token,
                    self.generation
                );
                false
            }
        }
    }
}
