//! Word scramble: unscramble a Nawat term, with its translation as a hint.

use std::collections::HashSet;
use std::sync::Arc;

use rand::Rng;

use crate::game_engine::{
    config::GameConfig,
    error::{EngineError, Result},
    helpers::{make_round_id, normalize_answer, SessionCore},
    models::{GameType, Outcome, ScrambleRound, SessionStatus, VocabularyEntry},
    scheduler::{ScheduledTask, TimerKind, TimerToken},
    session::{GameSession, RoundView, ScrambleView, SessionInput, Snapshot},
    shuffle::{pick_index, shuffle},
    word_bank::WordBank,
};

/// A term can be scrambled when it is long enough and has at least two
/// different characters once case is ignored; otherwise every permutation
/// reads as the answer.
pub fn is_scramblable(term: &str, min_len: usize) -> bool {
    term.chars().count() >= min_len
        && normalize_answer(term).chars().collect::<HashSet<_>>().len() >= 2
}

/// Permute the characters of `term` so the result differs from it even
/// when compared the way guesses are (trimmed, case-insensitive).
///
/// Retries a Fisher-Yates shuffle up to `max_attempts` times, then falls back
/// to rotating left by one, which differs for any term with two distinct
/// lowercase characters.
pub fn scramble_term<R: Rng>(term: &str, max_attempts: usize, rng: &mut R) -> String {
    let answer = normalize_answer(term);
    let mut chars: Vec<char> = term.chars().collect();
    for _ in 0..max_attempts {
        shuffle(rng, &mut chars);
        let candidate: String = chars.iter().collect();
        if normalize_answer(&candidate) != answer {
            return candidate;
        }
    }
    let mut rotated: Vec<char> = term.chars().collect();
    rotated.rotate_left(1);
    rotated.into_iter().collect()
}

pub fn generate_scramble_round<R: Rng>(
    bank: &WordBank,
    config: &GameConfig,
    rng: &mut R,
) -> Result<ScrambleRound> {
    config.validate()?;
    let eligible: Vec<&VocabularyEntry> = bank
        .entries()
        .iter()
        .filter(|e| is_scramblable(&e.term, config.min_scramble_len))
        .collect();
    if eligible.is_empty() {
        return Err(EngineError::insufficient(
            GameType::Scramble,
            format!("no term with {}+ characters to scramble", config.min_scramble_len),
        ));
    }

    let round_id = make_round_id(GameType::Scramble, rng);

    let mut entry = None;
    for _ in 0..config.max_draw_attempts {
        match bank.random_entry(rng) {
            Some(e) if is_scramblable(&e.term, config.min_scramble_len) => {
                entry = Some(e);
                break;
            }
            _ => {}
        }
    }
    let entry = match entry {
        Some(e) => e,
        None => pick_index(rng, eligible.len())
            .map(|i| eligible[i])
            .ok_or_else(|| EngineError::insufficient(GameType::Scramble, "no eligible term"))?,
    };

    let scrambled = scramble_term(&entry.term, config.max_draw_attempts, rng);
    Ok(ScrambleRound { round_id, entry: entry.clone(), scrambled })
}

#[derive(Debug)]
pub struct ScrambleSession {
    bank: Arc<WordBank>,
    config: GameConfig,
    core: SessionCore,
    round: Option<ScrambleRound>,
    attempts: u32,
}

impl ScrambleSession {
    pub fn new(bank: Arc<WordBank>, config: GameConfig) -> Self {
        let core = SessionCore::new(GameType::Scramble, &config);
        ScrambleSession { bank, config, core, round: None, attempts: 0 }
    }

    pub fn round(&self) -> Option<&ScrambleRound> {
        self.round.as_ref()
    }

    /// Check a typed answer. Wrong answers can be retried on the same round.
    pub fn guess(&mut self, text: &str) -> Result<Outcome> {
        match self.core.status {
            SessionStatus::InsufficientData => {
                return Err(EngineError::insufficient(GameType::Scramble, "no active round"));
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
        if normalize_answer(text) == normalize_answer(&round.entry.term) {
            self.core.score += 1;
            self.core.status = SessionStatus::Correct;
            self.core.schedule(TimerKind::Advance, self.config.scramble_advance_delay());
            tracing::debug!("{} solved after {} attempts", round.round_id, self.attempts);
            Ok(Outcome::Correct)
        } else {
            self.core.status = SessionStatus::Incorrect;
            Ok(Outcome::Incorrect)
        }
    }

    fn next_round(&mut self) -> SessionStatus {
        self.core.next_generation();
        self.attempts = 0;
        match generate_scramble_round(&self.bank, &self.config, &mut self.core.rng) {
            Ok(round) => {
                tracing::debug!("{} scrambled '{}'", round.round_id, round.scrambled);
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

impl GameSession for ScrambleSession {
    fn game_type(&self) -> GameType {
        GameType::Scramble
    }

    fn start(&mut self) -> SessionStatus {
        self.core.score = 0;
        self.next_round()
    }

    fn submit(&mut self, input: SessionInput) -> Result<Outcome> {
        match input {
            SessionInput::Text(text) => self.guess(&text),
            other => Err(EngineError::InvalidInput(format!("scramble expects text, got {other:?}"))),
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
            RoundView::Scramble(ScrambleView {
                round_id: r.round_id.clone(),
                scrambled: r.scrambled.clone(),
                hint: r.entry.translation.clone(),
                attempts: self.attempts,
            })
        });
        Snapshot {
            game: GameType::Scramble,
            status: self.core.status,
            score: self.core.score,
            round,
            pending: self.core.pending(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sorted_chars(s: &str) -> Vec<char> {
        let mut v: Vec<char> = s.chars().collect();
        v.sort_unstable();
        v
    }

    fn session(words: &[(&str, &str)], seed: u64) -> ScrambleSession {
        let bank = WordBank::new(words.iter().map(|(t, s)| VocabularyEntry::new(*t, *s)).collect(), &[]);
        let mut s = ScrambleSession::new(Arc::new(bank), GameConfig::seeded(seed));
        s.start();
        s
    }

    #[test]
    fn scramble_always_differs_and_keeps_letters() {
        let terms = ["tal", "kal", "abab", "nawat", "tzinti", "aab", "Tepet", "ñuñu"];
        let mut rng = StdRng::seed_from_u64(21);
        for term in terms {
            for _ in 0..200 {
                let out = scramble_term(term, 10, &mut rng);
                assert_ne!(out, term);
                assert_eq!(sorted_chars(&out), sorted_chars(term), "letters changed for {term}");
            }
        }
    }

    #[test]
    fn mixed_case_term_never_scrambles_to_the_answer() {
        assert!(!is_scramblable("Aaa", 3));
        assert!(is_scramblable("Aab", 3));

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let out = scramble_term("Tat", 10, &mut rng);
            assert_ne!(out.to_lowercase(), "tat", "{out} reads as the answer");
        }
        assert_eq!(scramble_term("Aab", 0, &mut rng), "abA");
    }

    #[test]
    fn uniform_mixed_case_bank_is_insufficient() {
        let s = session(&[("Aaa", "x"), ("NNn", "y")], 3);
        assert_eq!(s.status(), SessionStatus::InsufficientData);
        assert!(s.round().is_none());
    }

    #[test]
    fn invalid_config_does_not_generate() {
        let bank = WordBank::new(vec![VocabularyEntry::new("kal", "casa")], &[]);
        let mut s = ScrambleSession::new(
            Arc::new(bank),
            GameConfig { max_draw_attempts: 0, ..GameConfig::seeded(1) },
        );
        assert_eq!(s.start(), SessionStatus::InsufficientData);
        assert!(s.round().is_none());
        assert!(s.guess("kal").unwrap_err().is_insufficient_data());
    }

    #[test]
    fn rotation_fallback_differs() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(scramble_term("abc", 0, &mut rng), "bca");
        assert_eq!(scramble_term("aab", 0, &mut rng), "aba");
    }

    #[test]
    fn short_or_uniform_terms_are_insufficient() {
        let bank = WordBank::new(
            vec![VocabularyEntry::new("ne", "the"), VocabularyEntry::new("aaa", "x")],
            &[],
        );
        let mut rng = StdRng::seed_from_u64(1);
        let err = generate_scramble_round(&bank, &GameConfig::default(), &mut rng).unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn only_eligible_terms_are_picked() {
        let bank = WordBank::new(
            vec![VocabularyEntry::new("ne", "the"), VocabularyEntry::new("kal", "house")],
            &[],
        );
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let round = generate_scramble_round(&bank, &GameConfig::default(), &mut rng).unwrap();
            assert_eq!(round.entry.term, "kal");
        }
    }

    #[test]
    fn case_insensitive_trimmed_guess_is_correct() {
        let mut s = session(&[("Kal", "casa")], 5);
        assert_eq!(s.guess("  kAL ").unwrap(), Outcome::Correct);
        assert_eq!(s.score(), 1);

        let task = s.pending_task().unwrap();
        assert_eq!(task.delay, std::time::Duration::from_millis(1500));
        assert_eq!(s.guess("kal").unwrap(), Outcome::Ignored, "no double scoring before advance");
        assert!(s.fire(task.token));
        assert_eq!(s.status(), SessionStatus::AwaitingInput);
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn wrong_guess_allows_retry() {
        let mut s = session(&[("kal", "casa")], 6);
        let id = s.round().unwrap().round_id.clone();
        assert_eq!(s.guess("lak").unwrap(), Outcome::Incorrect);
        assert_eq!(s.status(), SessionStatus::Incorrect);
        assert!(s.pending_task().is_none());
        assert_eq!(s.guess("kal").unwrap(), Outcome::Correct);
        assert_eq!(s.round().unwrap().round_id, id);
    }

    #[test]
    fn text_input_only() {
        let mut s = session(&[("kal", "casa")], 7);
        assert!(matches!(s.submit(SessionInput::Pick(0)), Err(EngineError::InvalidInput(_))));
    }
}
