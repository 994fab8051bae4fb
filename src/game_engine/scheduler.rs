//! Cancellable delayed transitions.
//!
//! Sessions never sleep. When a transition must happen later (un-flipping a
//! mismatched pair, advancing after feedback) the session records a
//! [`ScheduledTask`] and the presenter is expected to call
//! `session.fire(token)` once `delay` has elapsed. Each token carries the
//! session's generation, so a timer that outlives its round is a no-op.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::game_engine::models::GameType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Turn a mismatched memorama pair face-down again.
    Settle,
    /// Replace the current round with a fresh one.
    Advance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken {
    pub game: GameType,
    pub generation: u64,
    pub kind: TimerKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub token: TimerToken,
    pub delay: Duration,
}

/// A virtual clock for single-threaded presenters and tests.
///
/// Tasks come back from [`Timeline::advance`] in due order; tasks due at the
/// same instant keep their scheduling order.
#[derive(Debug, Default)]
pub struct Timeline {
    now: Duration,
    queue: Vec<(Duration, u64, TimerToken)>,
    seq: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Timeline::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn schedule(&mut self, task: ScheduledTask) {
        self.queue.push((self.now + task.delay, self.seq, task.token));
        self.seq += 1;
    }

    /// Move the clock forward and drain every task that is now due.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TimerToken> {
        self.now += elapsed;
        let now = self.now;

        let mut due: Vec<(Duration, u64, TimerToken)> = Vec::new();
        self.queue.retain(|entry| {
            if entry.0 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(at, seq, _)| (at, seq));
        due.into_iter().map(|(_, _, token)| token).collect()
    }
}
