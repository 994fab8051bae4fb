//! Core game engine: word bank, round generation, and game sessions.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Shared types: vocabulary, rounds, statuses, outcomes |
//! | `word_bank` | Read-only dictionary/lesson view with sampling and search |
//! | `shuffle`   | Fisher-Yates shuffle and uniform picks over an injected RNG |
//! | `config`    | `GameConfig` defaults, JSON loading, validation |
//! | `error`     | `EngineError` and the crate `Result` alias |
//! | `helpers`   | Round IDs, answer normalisation, shared session state |
//! | `scheduler` | Timer tokens, scheduled tasks, virtual `Timeline` |
//! | `session`   | `GameSession` trait, inputs, and presenter snapshots |
//! | `generator` | Single entry point `generate_round()`, dispatches per game |
//! | `games`     | The four games: generator + session each |
//! | `view`      | JSON payloads for a browser presenter |

pub mod config;
pub mod error;
pub mod games;
pub mod generator;
pub mod helpers;
pub mod models;
pub mod scheduler;
pub mod session;
pub mod shuffle;
pub mod view;
pub mod word_bank;

// Re-export the public API surface so callers can use
// `game_engine::generate_round` without reaching into sub-modules.
pub use config::GameConfig;
pub use error::{EngineError, Result};
pub use games::{new_session, FillBlankSession, MatchingSession, QuizSession, ScrambleSession};
pub use generator::{generate_round, generate_seeded_round};
pub use models::{
    FillBlankRound, GameType, LessonEntry, MatchingRound, Outcome, PhraseEntry, QuizRound,
    Round, ScrambleRound, SessionStatus, Tile, TileSide, VocabularyEntry,
};
pub use scheduler::{ScheduledTask, TimerKind, TimerToken, Timeline};
pub use session::{GameSession, RoundView, SessionInput, Snapshot};
pub use word_bank::{SearchResult, WordBank};
