//! Read-only view over the dictionary and lesson data.
//!
//! A `WordBank` is built once at startup from data the presenter has already
//! fetched, then shared (behind an `Arc`) by every game session. No game
//! mutates it.

use std::collections::HashSet;

use rand::Rng;

use crate::game_engine::{
    error::Result,
    models::{LessonEntry, PhraseEntry, VocabularyEntry},
    shuffle::{permutation, pick_index},
};

/// Lesson levels in display order.
pub const LESSON_LEVELS: [&str; 3] = ["Básico", "Intermedio", "Avanzado"];

/// Dictionary browsing needs at least this many characters.
pub const MIN_SEARCH_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult<'a> {
    TooShort,
    Matches(Vec<&'a VocabularyEntry>),
}

#[derive(Debug, Clone, Default)]
pub struct WordBank {
    entries: Vec<VocabularyEntry>,
    phrases: Vec<PhraseEntry>,
    lessons: Vec<LessonEntry>,
}

impl WordBank {
    /// Build a bank, dropping entries with a blank side and deriving the
    /// phrase view from the lessons' vocabulary.
    pub fn new(vocabulary: Vec<VocabularyEntry>, lessons: &[LessonEntry]) -> Self {
        let total = vocabulary.len();
        let entries: Vec<VocabularyEntry> =
            vocabulary.into_iter().filter(VocabularyEntry::is_valid).collect();
        if entries.len() < total {
            tracing::warn!(
                "Dropped {} vocabulary entries with an empty term or translation",
                total - entries.len()
            );
        }

        let phrases: Vec<PhraseEntry> = lessons
            .iter()
            .flat_map(|l| l.vocabulary.iter())
            .filter(|v| v.is_valid())
            .filter_map(PhraseEntry::from_vocabulary)
            .collect();

        tracing::debug!(
            "WordBank ready: {} entries, {} phrases, {} lessons",
            entries.len(),
            phrases.len(),
            lessons.len()
        );

        WordBank { entries, phrases, lessons: lessons.to_vec() }
    }

    /// A bank with no data; every generator reports insufficient data.
    pub fn empty() -> Self {
        WordBank::default()
    }

    /// Parse the dictionary and lesson payloads.
    pub fn from_json(dictionary_json: &str, lessons_json: &str) -> Result<Self> {
        let vocabulary: Vec<VocabularyEntry> = serde_json::from_str(dictionary_json)?;
        let lessons: Vec<LessonEntry> = serde_json::from_str(lessons_json)?;
        Ok(WordBank::new(vocabulary, &lessons))
    }

    /// Like [`WordBank::from_json`], but degrades to an empty bank on bad data.
    pub fn from_json_or_empty(dictionary_json: &str, lessons_json: &str) -> Self {
        match WordBank::from_json(dictionary_json, lessons_json) {
            Ok(bank) => bank,
            Err(e) => {
                tracing::warn!("Failed to load word data, games will be empty: {}", e);
                WordBank::empty()
            }
        }
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn phrases(&self) -> &[PhraseEntry] {
        &self.phrases
    }

    pub fn lessons(&self) -> &[LessonEntry] {
        &self.lessons
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of different terms; duplicates count once.
    pub fn distinct_term_count(&self) -> usize {
        self.entries.iter().map(|e| e.term.as_str()).collect::<HashSet<_>>().len()
    }

    pub fn random_entry<R: Rng>(&self, rng: &mut R) -> Option<&VocabularyEntry> {
        pick_index(rng, self.entries.len()).map(|i| &self.entries[i])
    }

    /// Up to `n` entries without replacement: a uniform permutation, then the
    /// prefix.
    pub fn sample_distinct<R: Rng>(&self, rng: &mut R, n: usize) -> Vec<&VocabularyEntry> {
        permutation(rng, self.entries.len())
            .into_iter()
            .take(n)
            .map(|i| &self.entries[i])
            .collect()
    }

    pub fn random_phrase<R: Rng>(&self, rng: &mut R) -> Option<&PhraseEntry> {
        pick_index(rng, self.phrases.len()).map(|i| &self.phrases[i])
    }

    /// Case-insensitive substring search over both sides of the dictionary.
    pub fn search(&self, filter: &str) -> SearchResult<'_> {
        if filter.chars().count() < MIN_SEARCH_LEN {
            return SearchResult::TooShort;
        }
        let needle = filter.to_lowercase();
        SearchResult::Matches(
            self.entries
                .iter()
                .filter(|e| {
                    e.term.to_lowercase().contains(&needle)
                        || e.translation.to_lowercase().contains(&needle)
                })
                .collect(),
        )
    }

    /// Lessons grouped by level in [`LESSON_LEVELS`] order; empty levels and
    /// unknown levels are left out.
    pub fn lessons_by_level(&self) -> Vec<(&'static str, Vec<&LessonEntry>)> {
        LESSON_LEVELS
            .iter()
            .map(|&level| (level, self.lessons.iter().filter(|l| l.level == level).collect::<Vec<_>>()))
            .filter(|(_, lessons)| !lessons.is_empty())
            .collect()
    }
}
