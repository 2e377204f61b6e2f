//! Word validity: a bundled trusted word list backed by an injected dictionary
//! lookup.
//!
//! # Why a trait? (for beginners)
//!
//! The real dictionary lives behind an HTTP API.  The core crate must not open
//! sockets, so it only describes *what* it needs ("is this a word?") as the
//! [`DictionaryLookup`] trait.  The server crate provides the HTTP
//! implementation; tests provide mocks.  This keeps every rule in this crate
//! testable without a network.
//!
//! # Failure policy
//!
//! A lookup that fails (timeout, DNS error, unexpected status) is treated
//! exactly like "not a word".  The failure is logged at `warn` and never
//! surfaces as a separate error to the player.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::chain::ChainError;

/// Errors a [`DictionaryLookup`] may report.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// The request could not be sent or no response arrived.
    #[error("dictionary transport error: {0}")]
    Transport(String),

    /// The dictionary answered with something other than found/not found.
    #[error("unexpected dictionary response status {0}")]
    UnexpectedStatus(u16),
}

/// External "is this a recognised dictionary entry?" capability.
#[async_trait]
pub trait DictionaryLookup: Send + Sync {
    /// Returns `Ok(true)` if `word` is a dictionary entry, `Ok(false)` if the
    /// dictionary positively does not know it.
    async fn is_word(&self, word: &str) -> Result<bool, DictionaryError>;
}

/// A lookup that knows no words; used when online lookups are disabled so the
/// trusted list is the only source of truth.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineDictionary;

#[async_trait]
impl DictionaryLookup for OfflineDictionary {
    async fn is_word(&self, _word: &str) -> Result<bool, DictionaryError> {
        Ok(false)
    }
}

/// The bundled list of words that are always accepted.
#[derive(Debug, Default, Clone)]
pub struct TrustedWordList {
    words: HashSet<String>,
}

impl TrustedWordList {
    /// Builds the list, lowercasing and trimming every entry.  Blank entries
    /// are dropped.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// `word` must already be lowercase.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Decides whether player words are real words.
#[derive(Clone)]
pub struct WordValidator {
    trusted: Arc<TrustedWordList>,
    lookup: Arc<dyn DictionaryLookup>,
}

impl WordValidator {
    pub fn new(trusted: Arc<TrustedWordList>, lookup: Arc<dyn DictionaryLookup>) -> Self {
        Self { trusted, lookup }
    }

    pub fn trusted(&self) -> &TrustedWordList {
        &self.trusted
    }

    /// Returns `true` if `word` (any case) is in the trusted list or, failing
    /// that, the dictionary recognises it.  Lookup failures yield `false`.
    pub async fn is_word_valid(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        if self.trusted.contains(&word) {
            return true;
        }

        match self.lookup.is_word(&word).await {
            Ok(found) => {
                debug!("dictionary lookup for {word:?}: {found}");
                found
            }
            Err(e) => {
                warn!("dictionary lookup for {word:?} failed, treating as unknown: {e}");
                false
            }
        }
    }

    /// Checks every word in order, one lookup at a time, and stops at the
    /// first word that is not valid.
    ///
    /// # Errors
    ///
    /// [`ChainError::NotAWord`] naming the first rejected word.
    pub async fn validate_all<S: AsRef<str>>(&self, words: &[S]) -> Result<(), ChainError> {
        for word in words {
            let word = word.as_ref();
            if !self.is_word_valid(word).await {
                return Err(ChainError::NotAWord(word.to_string()));
            }
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
