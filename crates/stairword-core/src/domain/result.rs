//! Stored game results, share ids, and per-puzzle statistics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::puzzle::TodaysPuzzle;

/// Length of a share id.
pub const SHARE_ID_LEN: usize = 5;

const SHARE_ID_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Bytes at or above this are skipped so every character is equally likely
/// (248 = 4 * 62).
const UNBIASED_BYTE_LIMIT: usize = 256 / SHARE_ID_ALPHABET.len() * SHARE_ID_ALPHABET.len();

/// Byte positions of a v4 UUID that carry the version and variant bits.
const UUID_FIXED_BYTES: [usize; 2] = [6, 8];

/// Errors parsing a [`ShareId`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShareIdError {
    #[error("share id must be 5 characters, got {0}")]
    WrongLength(usize),

    #[error("share id contains invalid character {0:?}")]
    InvalidChar(char),
}

/// Short random id that links to a stored [`GameResult`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShareId(String);

impl ShareId {
    /// Generates a fresh random id.
    ///
    /// The randomness comes from v4 UUIDs.  Each fully random byte below 248
    /// picks one character; other bytes are skipped and another UUID is
    /// drawn if one runs out.
    pub fn generate() -> Self {
        let mut id = String::with_capacity(SHARE_ID_LEN);
        while id.len() < SHARE_ID_LEN {
            let bytes = Uuid::new_v4().into_bytes();
            let random = bytes
                .iter()
                .enumerate()
                .filter(|(i, _)| !UUID_FIXED_BYTES.contains(i))
                .map(|(_, b)| *b);
            push_unbiased(&mut id, random);
        }
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Appends one alphabet character per usable byte until `id` is
/// [`SHARE_ID_LEN`] long.
fn push_unbiased(id: &mut String, bytes: impl IntoIterator<Item = u8>) {
    for b in bytes {
        if id.len() == SHARE_ID_LEN {
            break;
        }
        let b = b as usize;
        if b < UNBIASED_BYTE_LIMIT {
            id.push(SHARE_ID_ALPHABET[b % SHARE_ID_ALPHABET.len()] as char);
        }
    }
}

impl FromStr for ShareId {
    type Err = ShareIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != SHARE_ID_LEN {
            return Err(ShareIdError::WrongLength(len));
        }
        if let Some(bad) = s.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(ShareIdError::InvalidChar(bad));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ShareId {
    type Error = ShareIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ShareId> for String {
    fn from(id: ShareId) -> Self {
        id.0
    }
}

impl fmt::Display for ShareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One accepted chain.  Created once, never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub words: Vec<String>,
    pub score: u32,
    pub puzzle_number: u32,
    pub share_id: ShareId,
}

/// Best and average score for one puzzle number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleStats {
    pub max_score: u32,
    /// Mean score rounded half up.
    pub avg_score: u32,
}

impl PuzzleStats {
    /// Aggregates `scores`; `None` when there are none.
    pub fn from_scores<I: IntoIterator<Item = u32>>(scores: I) -> Option<Self> {
        let (count, sum, max) = scores
            .into_iter()
            .fold((0u64, 0u64, 0u32), |(count, sum, max), score| {
                (count + 1, sum + u64::from(score), max.max(score))
            });

        if count == 0 {
            return None;
        }

        let avg = (sum * 2 + count) / (count * 2);
        Some(Self {
            max_score: max,
            avg_score: u32::try_from(avg).unwrap_or(u32::MAX),
        })
    }
}

/// Builds the text a player pastes to share their result.
pub fn share_text(puzzle: &TodaysPuzzle, score: u32, site_url: &str, share_id: &ShareId) -> String {
    let site_url = site_url.trim_end_matches('/');
    format!(
        "Stairword #{number}\n\n{start} ➡️ {end}\nScore: {score}\n\nPlay it yourself: {site_url}\n\nSee my solution (spoilers!): {site_url}/{share_id}",
        number = puzzle.number,
        start = puzzle.start_word.to_uppercase(),
        end = puzzle.end_word.to_uppercase(),
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
