//! Multiple-choice quiz: pick the Spanish translation of a Nawat term.

use std::sync::Arc;

use rand::Rng;

use crate::game_engine::{
    config::GameConfig,
    error::{EngineError, Result},
    helpers::{make_round_id, SessionCore},
    models::{GameType, Outcome, QuizRound, SessionStatus},
    scheduler::{ScheduledTask, TimerKind, TimerToken},
    session::{GameSession, QuizView, RoundView, SessionInput, Snapshot},
    shuffle::{permutation, shuffle},
    word_bank::WordBank,
};

/// One target plus `config.quiz_options - 1` distractors with distinct
/// terms, shuffled for display.
///
/// Distractors are drawn by rejection sampling, capped at
/// `config.max_draw_attempts`; if the cap is hit the remaining slots are
/// filled from a shuffled scan of the bank.
pub fn generate_quiz_round<R: Rng>(
    bank: &WordBank,
    config: &GameConfig,
    rng: &mut R,
) -> Result<QuizRound> {
    config.validate()?;
    let wanted = config.quiz_options;
    let distinct = bank.distinct_term_count();
    if distinct < wanted {
        return Err(EngineError::insufficient(
            GameType::Quiz,
            format!("need {wanted} distinct terms, bank has {distinct}"),
        ));
    }

    let round_id = make_round_id(GameType::Quiz, rng);
    let target = bank
        .random_entry(rng)
        .cloned()
        .ok_or_else(|| EngineError::insufficient(GameType::Quiz, "the word bank is empty"))?;

    let mut options = vec![target.clone()];
    let mut attempts = 0;
    while options.len() < wanted && attempts < config.max_draw_attempts {
        attempts += 1;
        if let Some(candidate) = bank.random_entry(rng) {
            if !options.iter().any(|o| o.term == candidate.term) {
                options.push(candidate.clone());
            }
        }
    }

    if options.len() < wanted {
        tracing::debug!("Quiz draw hit {} attempts, filling distractors by scan", attempts);
        for i in permutation(rng, bank.len()) {
            if options.len() >= wanted {
                break;
            }
            let candidate = &bank.entries()[i];
            if !options.iter().any(|o| o.term == candidate.term) {
                options.push(candidate.clone());
            }
        }
    }

    shuffle(rng, &mut options);
    Ok(QuizRound { round_id, target, options })
}

#[derive(Debug)]
pub struct QuizSession {
    bank: Arc<WordBank>,
    config: GameConfig,
    core: SessionCore,
    round: Option<QuizRound>,
    chosen: Option<usize>,
}

impl QuizSession {
    pub fn new(bank: Arc<WordBank>, config: GameConfig) -> Self {
        let core = SessionCore::new(GameType::Quiz, &config);
        QuizSession { bank, config, core, round: None, chosen: None }
    }

    pub fn round(&self) -> Option<&QuizRound> {
        self.round.as_ref()
    }

    /// Choose an option by display index. Only the first answer per round
    /// counts; the round auto-advances after the feedback delay.
    pub fn answer(&mut self, option: usize) -> Result<Outcome> {
        match self.core.status {
            SessionStatus::InsufficientData => {
                return Err(EngineError::insufficient(GameType::Quiz, "no active round"));
            }
            SessionStatus::Idle => return Ok(Outcome::Ignored),
            _ => {}
        }
        let Some(round) = self.round.as_ref() else {
            return Ok(Outcome::Ignored);
        };
        if option >= round.options.len() {
            return Err(EngineError::InvalidInput(format!(
                "option {} out of range ({} options)",
                option,
                round.options.len()
            )));
        }
        if self.chosen.is_some() || self.core.has_pending() {
            return Ok(Outcome::Ignored);
        }

        self.chosen = Some(option);
        let outcome = if round.options[option].term == round.target.term {
            self.core.score += 1;
            self.core.status = SessionStatus::Correct;
            Outcome::Correct
        } else {
            self.core.status = SessionStatus::Incorrect;
            Outcome::Incorrect
        };
        tracing::debug!("{} answered option {}: {:?}", round.round_id, option, outcome);

        self.core.schedule(TimerKind::Advance, self.config.quiz_feedback_delay());
        Ok(outcome)
    }

    fn next_round(&mut self) -> SessionStatus {
        self.core.next_generation();
        self.chosen = None;
        match generate_quiz_round(&self.bank, &self.config, &mut self.core.rng) {
            Ok(round) => {
                tracing::debug!("{} asks for '{}'", round.round_id, round.target.term);
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

    fn view(&self) -> Option<QuizView> {
        let round = self.round.as_ref()?;
        Some(QuizView {
            round_id: round.round_id.clone(),
            prompt: round.target.term.clone(),
            options: round.options.iter().map(|o| o.translation.clone()).collect(),
            chosen: self.chosen,
            correct_index: self.chosen.and_then(|_| round.correct_index()),
        })
    }
}

impl GameSession for QuizSession {
    fn game_type(&self) -> GameType {
        GameType::Quiz
    }

    fn start(&mut self) -> SessionStatus {
        self.core.score = 0;
        self.next_round()
    }

    fn submit(&mut self, input: SessionInput) -> Result<Outcome> {
        match input {
            SessionInput::Choose(option) => self.answer(option),
            other => Err(EngineError::InvalidInput(format!("quiz expects an option choice, got {other:?}"))),
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
        Snapshot {
            game: GameType::Quiz,
            status: self.core.status,
            score: self.core.score,
            round: self.view().map(RoundView::Quiz),
            pending: self.core.pending(),
        }
    }
}
