//! The interface every game session exposes to the presenter.
//!
//! A presenter holds sessions (possibly as `Box<dyn GameSession>`), reads
//! [`Snapshot`]s to render, forwards user actions through
//! [`GameSession::submit`], and calls [`GameSession::fire`] when a task from
//! [`GameSession::pending_task`] comes due.

use serde::{Deserialize, Serialize};

use crate::game_engine::{
    error::Result,
    models::{GameType, Outcome, SessionStatus, TileSide},
    scheduler::{ScheduledTask, TimerToken},
};

/// A user action, routed to whichever session receives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionInput {
    /// Memorama: flip the tile at this index.
    Pick(usize),
    /// Quiz: choose the option at this index.
    Choose(usize),
    /// Scramble / fill-in-the-blank: typed answer.
    Text(String),
}

pub trait GameSession {
    fn game_type(&self) -> GameType;

    /// Generate a fresh round and zero the score.
    fn start(&mut self) -> SessionStatus;

    fn reset(&mut self) -> SessionStatus {
        self.start()
    }

    fn submit(&mut self, input: SessionInput) -> Result<Outcome>;

    /// Run a scheduled transition. Returns `false` for stale tokens.
    fn fire(&mut self, token: TimerToken) -> bool;

    fn pending_task(&self) -> Option<ScheduledTask>;

    fn score(&self) -> u32;

    fn status(&self) -> SessionStatus;

    fn snapshot(&self) -> Snapshot;
}

// ---------------------------------------------------------------------------
// Snapshots: owned copies of what the presenter may show
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub game: GameType,
    pub status: SessionStatus,
    pub score: u32,
    pub round: Option<RoundView>,
    pub pending: Option<ScheduledTask>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundView {
    Matching(MatchingView),
    Quiz(QuizView),
    Scramble(ScrambleView),
    FillBlank(FillBlankView),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub id: usize,
    pub display_value: String,
    pub side: TileSide,
    pub face_up: bool,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingView {
    pub round_id: String,
    pub tiles: Vec<TileView>,
    pub pairs_found: usize,
    pub pairs_total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizView {
    pub round_id: String,
    /// The term whose translation is asked for.
    pub prompt: String,
    /// Option translations in display order.
    pub options: Vec<String>,
    pub chosen: Option<usize>,
    /// Revealed only once an answer has been given.
    pub correct_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrambleView {
    pub round_id: String,
    pub scrambled: String,
    pub hint: String,
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillBlankView {
    pub round_id: String,
    pub masked: String,
    pub hint: String,
    pub attempts: u32,
}
