//! # nawat_games
//!
//! The game engine behind the Nawat vocabulary mini-games: memorama
//! (matching), a multiple-choice quiz, word scramble and fill-in-the-blank.
//!
//! The engine does no I/O and no rendering. A presenter (the page script, or
//! the terminal demo under `demos/`) hands it already-fetched word data,
//! renders [`Snapshot`]s and forwards user actions.
//!
//! ## How it works
//!
//! 1. Build a [`WordBank`] once from the dictionary and lesson data and
//!    share it behind an `Arc`.
//! 2. Create one session per game ([`MatchingSession`], [`QuizSession`],
//!    [`ScrambleSession`], [`FillBlankSession`]) and call `start()`. The
//!    session generates a round from the bank and its own RNG.
//! 3. Forward user actions with `submit(...)`. When the session needs a
//!    delayed transition (settle a mismatched pair, advance after feedback)
//!    it exposes a [`ScheduledTask`]; call `fire(token)` once its delay has
//!    passed. Tokens from a replaced round are ignored.
//!
//! ## Key features
//!
//! - **Deterministic**: set `GameConfig::rng_seed` to reproduce every round.
//! - **Uniform shuffles**: Fisher-Yates everywhere, no random-comparator sort.
//! - **Graceful with little data**: an empty or tiny word bank puts a
//!   session in `InsufficientData` instead of looping or panicking.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use nawat_games::{GameConfig, GameSession, QuizSession, SessionInput, VocabularyEntry, WordBank};
//!
//! let bank = Arc::new(WordBank::new(
//!     vec![
//!         VocabularyEntry::new("ne", "el"),
//!         VocabularyEntry::new("se", "uno"),
//!         VocabularyEntry::new("ume", "dos"),
//!         VocabularyEntry::new("yey", "tres"),
//!     ],
//!     &[],
//! ));
//!
//! let mut quiz = QuizSession::new(bank, GameConfig::seeded(42));
//! quiz.start();
//! let outcome = quiz.submit(SessionInput::Choose(0)).unwrap();
//! println!("{outcome:?}, score {}", quiz.score());
//!
//! if let Some(task) = quiz.pending_task() {
//!     // ...after task.delay has elapsed:
//!     quiz.fire(task.token);
//! }
//! ```

pub mod game_engine;

// Convenience re-exports so callers can use `nawat_games::QuizSession`
// directly without reaching into `game_engine::`.
pub use game_engine::{
    generate_round, generate_seeded_round, new_session, view::to_view_json, EngineError,
    FillBlankSession, GameConfig, GameSession, GameType, LessonEntry, MatchingSession, Outcome,
    PhraseEntry, QuizSession, Round, RoundView, ScheduledTask, ScrambleSession, SearchResult,
    SessionInput, SessionStatus, Snapshot, TimerKind, TimerToken, Timeline, VocabularyEntry,
    WordBank,
};
