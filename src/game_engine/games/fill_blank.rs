//! Fill in the blank: one word of a lesson phrase is hidden and must be
//! typed back.

use std::sync::Arc;

use rand::Rng;

use crate::game_engine::{
    config::GameConfig,
    error::{EngineError, Result},
    helpers::{make_round_id, normalize_answer, normalize_blank_word, SessionCore},
    models::{FillBlankRound, GameType, Outcome, SessionStatus},
    scheduler::{ScheduledTask, TimerKind, TimerToken},
    session::{FillBlankView, GameSession, RoundView, SessionInput, Snapshot},
    shuffle::pick_index,
    word_bank::WordBank,
};

pub fn generate_fill_blank_round<R: Rng>(
    bank: &WordBank,
    config: &GameConfig,
    rng: &mut R,
) -> Result<FillBlankRound> {
    config.validate()?;
    if bank.phrases().is_empty() {
        return Err(EngineError::insufficient(GameType::FillBlank, "no lesson phrases available"));
    }

    let round_id = make_round_id(GameType::FillBlank, rng);
    let phrase = bank
        .random_phrase(rng)
        .cloned()
        .ok_or_else(|| EngineError::insufficient(GameType::FillBlank, "no lesson phrases available"))?;

    // Single-space split keeps empty segments so the join is exact.
    let words: Vec<String> = phrase.term.split(' ').map(str::to_string).collect();
    let candidates: Vec<usize> = (0..words.len()).filter(|&i| !words[i].is_empty()).collect();
    let blank_index = pick_index(rng, candidates.len())
        .map(|i| candidates[i])
        .ok_or_else(|| EngineError::insufficient(GameType::FillBlank, "phrase has no words"))?;

    let mut masked_words: Vec<&str> = words.iter().map(String::as_str).collect();
    masked_words[blank_index] = config.blank_marker.as_str();
    let masked = masked_words.join(" ");

    Ok(FillBlankRound { round_id, phrase, words, blank_index, masked })
}

#[derive(Debug)]
pub struct FillBlankSession {
    bank: Arc<WordBank>,
    config: GameConfig,
    core: SessionCore,
    round: Option<FillBlankRound>,
    attempts: u32,
}

impl FillBlankSession {
    pub fn new(bank: Arc<WordBank>, config: GameConfig) -> Self {
        let core = SessionCore::new(GameType::FillBlank, &config);
        FillBlankSession { bank, config, core, round: None, attempts: 0 }
    }

    pub fn round(&self) -> Option<&FillBlankRound> {
        self.round.as_ref()
    }

    /// Check a typed answer against the hidden word, ignoring case,
    /// surrounding whitespace and any `?` attached to the word.
    pub fn guess(&mut self, text: &str) -> Result<Outcome> {
        match self.core.status {
            SessionStatus::InsufficientData => {
                return Err(EngineError::insufficient(GameType::FillBlank, "no active round"));
            }
            SessionStatus::Idle => return Ok(Outcome::Ignored),
            _ => {}
        }
        if self.core.has_pending() {
            return Ok(Outcome::Ignored);
        }
        let Some(round) = self.round.as_ref() else {
            return Ok(Outcome::Ignored);
        };

        self.attempts += 1;
        let expected = normalize_answer(&normalize_blank_word(round.blank_word()));
        if normalize_answer(text) == expected {
            self.core.score += 1;
            self.core.status = SessionStatus::Correct;
            self.core.schedule(TimerKind::Advance, self.config.fill_blank_advance_delay());
            tracing::debug!("{} filled after {} attempts", round.round_id, self.attempts);
            Ok(Outcome::Correct)
        } else {
            self.core.status = SessionStatus::Incorrect;
            Ok(Outcome::Incorrect)
        }
    }

    fn next_round(&mut self) -> SessionStatus {
        self.core.next_generation();
        self.attempts = 0;
        match generate_fill_blank_round(&self.bank, &self.config, &mut self.core.rng) {
            Ok(round) => {
                tracing::debug!("{} masked '{}'", round.round_id, round.masked);
                self.round = Some(round);
                self.core.status = SessionStatus::AwaitingInput;
            }
            Err(e) => {
                tracing::warn!("{}", e);
                self.round = None;
                self.core.status = SessionStatus::InsufficientData;
            }
        }
        self.core.status
    }
}

impl GameSession for FillBlankSession {
    fn game_type(&self) -> GameType {
        GameType::FillBlank
    }

    fn start(&mut self) -> SessionStatus {
        self.core.score = 0;
        self.next_round()
    }

    fn submit(&mut self, input: SessionInput) -> Result<Outcome> {
        match input {
            SessionInput::Text(text) => self.guess(&text),
            other => Err(EngineError::InvalidInput(format!("fill-in-the-blank expects text, got {other:?}"))),
        }
    }

    fn fire(&mut self, token: TimerToken) -> bool {
        if token.kind != TimerKind::Advance || !self.core.take_pending(token) {
            return false;
        }
        self.next_round();
        true
    }

    fn pending_task(&self) -> Option<ScheduledTask> {
        self.core.pending()
    }

    fn score(&self) -> u32 {
        self.core.score
    }

    fn status(&self) -> SessionStatus {
        self.core.status
    }

    fn snapshot(&self) -> Snapshot {
        let round = self.round.as_ref().map(|r| {
            RoundView::FillBlank(FillBlankView {
                round_id: r.round_id.clone(),
                masked: r.masked.clone(),
                hint: r.phrase.translation.clone(),
                attempts: self.attempts,
            })
        });
        Snapshot {
            game: GameType::FillBlank,
            status: self.core.status,
            score: self.core.score,
            round,
            pending: self.core.pending(),
        }
    }
}
