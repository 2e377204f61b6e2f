//! Chain rules: the checks a submitted word chain must pass before it can be
//! scored and stored.
//!
//! Every failure is a [`ChainError`] value returned to the caller, who turns
//! it into a message for the player.  Nothing here panics or aborts.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::overlap::{overlap_count, ScoringPolicy};
use crate::domain::puzzle::TodaysPuzzle;

/// Number of words in a chain (start + 3 player words + end).
pub const DEFAULT_CHAIN_LENGTH: usize = 5;

/// Shortest word a player may enter.
pub const DEFAULT_MIN_WORD_LENGTH: usize = 3;

/// Longest word a player may enter.  Overlap checks cost
/// `O(len(a) * len(b))`, so client input is capped before any of them run.
pub const DEFAULT_MAX_WORD_LENGTH: usize = 45;

/// Reasons a chain (or a single candidate word) is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    /// The chain does not have the configured number of words.
    #[error("{expected} words required, got {actual}")]
    WrongWordCount { expected: usize, actual: usize },

    /// A player word is shorter than the minimum length.
    #[error("\"{word}\" is too short: words must be at least {min} letters long")]
    WordTooShort { word: String, min: usize },

    /// A player word is longer than the maximum length.  The word itself is
    /// not echoed back.
    #[error("words must be at most {max} letters long, got {length}")]
    WordTooLong { length: usize, max: usize },

    /// More words than a chain can hold.
    #[error("at most {max} words allowed, got {actual}")]
    TooManyWords { max: usize, actual: usize },

    /// The first or last word is not today's start or end word.
    #[error("words do not match today's words")]
    NotTodaysWords,

    /// Two neighbouring words share no letters.
    #[error("\"{next}\" must overlap with the end of \"{prev}\"")]
    NoOverlap { prev: String, next: String },

    /// The overlap swallows one of the two words entirely.
    #[error("\"{next}\" must extend \"{prev}\" by at least one letter")]
    OverlapConsumesWord { prev: String, next: String },

    /// The same word appears twice in the chain.
    #[error("words must all be unique: \"{0}\" is repeated")]
    DuplicateWord(String),

    /// The word is neither in the trusted list nor in the dictionary.
    #[error("{0} is not a word")]
    NotAWord(String),

    /// Every slot is already filled.
    #[error("the chain is already complete")]
    ChainComplete,
}

/// Checks the overlap between `prev` and `next` and returns its length.
///
/// The overlap must be at least one letter and strictly shorter than the
/// shorter of the two words, so that each word extends its neighbour.
///
/// # Errors
///
/// [`ChainError::NoOverlap`] or [`ChainError::OverlapConsumesWord`].
pub fn check_adjacency(prev: &str, next: &str) -> Result<usize, ChainError> {
    let overlap = overlap_count(prev, next);
    if overlap == 0 {
        return Err(ChainError::NoOverlap {
            prev: prev.to_string(),
            next: next.to_string(),
        });
    }

    let shorter = prev.chars().count().min(next.chars().count());
    if overlap >= shorter {
        return Err(ChainError::OverlapConsumesWord {
            prev: prev.to_string(),
            next: next.to_string(),
        });
    }

    Ok(overlap)
}

/// The tunable rules of a game: chain length, minimum word length, and how
/// the chain is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainRules {
    pub chain_length: usize,
    pub min_word_length: usize,
    #[serde(default = "default_max_word_length")]
    pub max_word_length: usize,
    pub policy: ScoringPolicy,
}

fn default_max_word_length() -> usize {
    DEFAULT_MAX_WORD_LENGTH
}

impl Default for ChainRules {
    fn default() -> Self {
        Self {
            chain_length: DEFAULT_CHAIN_LENGTH,
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            max_word_length: DEFAULT_MAX_WORD_LENGTH,
            policy: ScoringPolicy::DoubleEnded,
        }
    }
}

impl ChainRules {
    /// Checks that `word` is neither too short nor too long to be entered
    /// by a player.
    ///
    /// # Errors
    ///
    /// [`ChainError::WordTooShort`] or [`ChainError::WordTooLong`].
    pub fn check_length(&self, word: &str) -> Result<(), ChainError> {
        self.check_max_length(word)?;
        if word.chars().count() < self.min_word_length {
            return Err(ChainError::WordTooShort {
                word: word.to_string(),
                min: self.min_word_length,
            });
        }
        Ok(())
    }

    fn check_max_length(&self, word: &str) -> Result<(), ChainError> {
        if word.chars().nth(self.max_word_length).is_some() {
            return Err(ChainError::WordTooLong {
                length: word.chars().count(),
                max: self.max_word_length,
            });
        }
        Ok(())
    }

    /// Checks a chain sent only to be laid out: no more than `chain_length`
    /// words, none longer than `max_word_length`.  Blank entries are allowed.
    ///
    /// # Errors
    ///
    /// [`ChainError::TooManyWords`] or [`ChainError::WordTooLong`].
    pub fn check_layout_request<S: AsRef<str>>(&self, words: &[S]) -> Result<(), ChainError> {
        if words.len() > self.chain_length {
            return Err(ChainError::TooManyWords {
                max: self.chain_length,
                actual: words.len(),
            });
        }
        words
            .iter()
            .try_for_each(|word| self.check_max_length(word.as_ref()))
    }

    /// Runs every synchronous check on a complete, lowercased chain.
    ///
    /// Checks run in this order and stop at the first failure: word count,
    /// today's start/end words, player word length, adjacency of each pair
    /// (left to right), uniqueness.  Dictionary membership is checked
    /// separately because it may suspend (see
    /// [`WordValidator`](crate::domain::dictionary::WordValidator)).
    ///
    /// # Errors
    ///
    /// The first [`ChainError`] encountered.
    pub fn validate_shape<S: AsRef<str>>(
        &self,
        words: &[S],
        puzzle: &TodaysPuzzle,
    ) -> Result<(), ChainError> {
        if words.len() != self.chain_length {
            return Err(ChainError::WrongWordCount {
                expected: self.chain_length,
                actual: words.len(),
            });
        }

        let first = words.first().map(AsRef::as_ref);
        let last = words.last().map(AsRef::as_ref);
        if first != Some(puzzle.start_word.as_str()) || last != Some(puzzle.end_word.as_str()) {
            return Err(ChainError::NotTodaysWords);
        }

        let inner = words.get(1..words.len() - 1).unwrap_or_default();
        for word in inner {
            self.check_length(word.as_ref())?;
        }

        for pair in words.windows(2) {
            check_adjacency(pair[0].as_ref(), pair[1].as_ref())?;
        }

        let mut seen = HashSet::with_capacity(words.len());
        for word in words {
            if !seen.insert(word.as_ref()) {
                return Err(ChainError::DuplicateWord(word.as_ref().to_string()));
            }
        }

        Ok(())
    }
}

/// Lowercases every word in a submitted chain.
pub fn normalize_chain<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    words.iter().map(|w| w.as_ref().trim().to_lowercase()).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
