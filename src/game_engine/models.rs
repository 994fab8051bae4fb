use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Word list primitives
// ---------------------------------------------------------------------------

/// One dictionary entry: a Nawat term and its Spanish translation.
///
/// The source datasets use `nahuat` / `spanish` as field names; both are
/// accepted when deserialising.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    #[serde(alias = "nahuat")]
    pub term: String,
    #[serde(alias = "spanish")]
    pub translation: String,
}

impl VocabularyEntry {
    pub fn new(term: impl Into<String>, translation: impl Into<String>) -> Self {
        VocabularyEntry { term: term.into(), translation: translation.into() }
    }

    /// Both sides must carry visible text.
    pub fn is_valid(&self) -> bool {
        !self.term.trim().is_empty() && !self.translation.trim().is_empty()
    }
}

impl fmt::Display for VocabularyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.term, self.translation)
    }
}

/// A multi-word lesson phrase, used only by the fill-in-the-blank game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseEntry {
    pub term: String,
    pub translation: String,
}

impl PhraseEntry {
    /// Build a phrase from a vocabulary item, or `None` when the term is a
    /// single word.
    pub fn from_vocabulary(entry: &VocabularyEntry) -> Option<Self> {
        let words = entry.term.split(' ').filter(|w| !w.is_empty()).count();
        if entry.term.contains(' ') && words >= 2 {
            Some(PhraseEntry {
                term: entry.term.clone(),
                translation: entry.translation.clone(),
            })
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonEntry {
    pub level: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub vocabulary: Vec<VocabularyEntry>,
}

// ---------------------------------------------------------------------------
// Game metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameType {
    Matching,
    Quiz,
    Scramble,
    FillBlank,
}

impl GameType {
    /// Two-letter prefix used in round IDs.
    pub fn prefix(self) -> &'static str {
        match self {
            GameType::Matching  => "MT",
            GameType::Quiz      => "QZ",
            GameType::Scramble  => "SC",
            GameType::FillBlank => "FB",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameType::Matching  => "Memorama",
            GameType::Quiz      => "Quiz",
            GameType::Scramble  => "Word Scramble",
            GameType::FillBlank => "Fill in the Blank",
        };
        write!(f, "{}", s)
    }
}

/// Observable lifecycle state of a session, as shown to the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Created but never started.
    Idle,
    AwaitingInput,
    /// Evaluating or settling; input is refused.
    Locked,
    Correct,
    Incorrect,
    /// Every matching tile has been paired.
    Complete,
    /// The word bank cannot produce a round for this game.
    InsufficientData,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Idle             => "idle",
            SessionStatus::AwaitingInput    => "awaiting-input",
            SessionStatus::Locked           => "locked",
            SessionStatus::Correct          => "correct",
            SessionStatus::Incorrect        => "incorrect",
            SessionStatus::Complete         => "complete",
            SessionStatus::InsufficientData => "insufficient-data",
        };
        write!(f, "{}", s)
    }
}

/// Result of a single `submit` / `pick` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Correct,
    Incorrect,
    /// Accepted as a first pick; nothing to evaluate yet.
    Pending,
    /// Dropped without any state change (locked, already answered, ...).
    Ignored,
}

// ---------------------------------------------------------------------------
// Rounds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileSide {
    Term,
    Translation,
}

/// One face-down card on the memorama board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub display_value: String,
    pub expected_pair_value: String,
    pub side: TileSide,
}

impl Tile {
    /// Symmetric pairing check on stored values, not on identity.
    pub fn pairs_with(&self, other: &Tile) -> bool {
        self.expected_pair_value == other.display_value
            && other.expected_pair_value == self.display_value
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingRound {
    pub round_id: String,
    pub tiles: Vec<Tile>,
}

impl MatchingRound {
    pub fn pair_count(&self) -> usize {
        self.tiles.len() / 2
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRound {
    pub round_id: String,
    pub target: VocabularyEntry,
    /// Target plus distractors, in display order.
    pub options: Vec<VocabularyEntry>,
}

impl QuizRound {
    /// Index of the option carrying the target's term.
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.term == self.target.term)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrambleRound {
    pub round_id: String,
    pub entry: VocabularyEntry,
    pub scrambled: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillBlankRound {
    pub round_id: String,
    pub phrase: PhraseEntry,
    /// The phrase term split on single spaces; joining with `" "` restores it.
    pub words: Vec<String>,
    pub blank_index: usize,
    pub masked: String,
}

impl FillBlankRound {
    /// The word hidden behind the blank marker.
    pub fn blank_word(&self) -> &str {
        &self.words[self.blank_index]
    }
}

/// Any round, as produced by the generic dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Round {
    Matching(MatchingRound),
    Quiz(QuizRound),
    Scramble(ScrambleRound),
    FillBlank(FillBlankRound),
}

impl Round {
    pub fn round_id(&self) -> &str {
        match self {
            Round::Matching(r)  => &r.round_id,
            Round::Quiz(r)      => &r.round_id,
            Round::Scramble(r)  => &r.round_id,
            Round::FillBlank(r) => &r.round_id,
        }
    }

    pub fn game_type(&self) -> GameType {
        match self {
            Round::Matching(_)  => GameType::Matching,
            Round::Quiz(_)      => GameType::Quiz,
            Round::Scramble(_)  => GameType::Scramble,
            Round::FillBlank(_) => GameType::FillBlank,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_field_names_are_accepted() {
        let e: VocabularyEntry =
            serde_json::from_str(r#"{"nahuat": "ne", "spanish": "the"}"#).unwrap();
        assert_eq!(e, VocabularyEntry::new("ne", "the"));
    }

    #[test]
    fn phrase_requires_two_words() {
        assert!(PhraseEntry::from_vocabulary(&VocabularyEntry::new("ne ta", "x")).is_some());
        assert!(PhraseEntry::from_vocabulary(&VocabularyEntry::new("neta", "x")).is_none());
        assert!(PhraseEntry::from_vocabulary(&VocabularyEntry::new("ne ", "x")).is_none());
    }

    #[test]
    fn tile_pairing_is_symmetric() {
        let a = Tile { display_value: "ne".into(), expected_pair_value: "the".into(), side: TileSide::Term };
        let b = Tile { display_value: "the".into(), expected_pair_value: "ne".into(), side: TileSide::Translation };
        assert!(a.pairs_with(&b));
        assert!(b.pairs_with(&a));
        assert!(!a.pairs_with(&a));
    }
}
