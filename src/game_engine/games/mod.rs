//! One module per game type.
//!
//! Each module holds a pure round generator with the signature
//!
//! ```ignore
//! pub fn generate_<game>_round<R: Rng>(
//!     bank: &WordBank,
//!     config: &GameConfig,
//!     rng: &mut R,
//! ) -> Result<<Game>Round>
//! ```
//!
//! and the session type that owns the current round, score and timers.

/// Memorama (`MT-`)
pub mod matching;
/// Multiple-choice quiz (`QZ-`)
pub mod quiz;
/// Word scramble (`SC-`)
pub mod scramble;
/// Fill in the blank (`FB-`)
pub mod fill_blank;

pub use fill_blank::FillBlankSession;
pub use matching::MatchingSession;
pub use quiz::QuizSession;
pub use scramble::ScrambleSession;

use std::sync::Arc;

use crate::game_engine::{
    config::GameConfig, models::GameType, session::GameSession, word_bank::WordBank,
};

/// Build the session for `game`, sharing `bank` read-only.
pub fn new_session(game: GameType, bank: Arc<WordBank>, config: GameConfig) -> Box<dyn GameSession> {
    match game {
        GameType::Matching  => Box::new(MatchingSession::new(bank, config)),
        GameType::Quiz      => Box::new(QuizSession::new(bank, config)),
        GameType::Scramble  => Box::new(ScrambleSession::new(bank, config)),
        GameType::FillBlank => Box::new(FillBlankSession::new(bank, config)),
    }
}
