//! Overlap engine: suffix/prefix matching between neighbouring words and the
//! chain score built on top of it.
//!
//! # What is an "overlap"? (for beginners)
//!
//! Two words overlap when the tail of the first word is also the head of the
//! second word.  `"gerbil"` and `"billy"` overlap by `"bil"`:
//!
//! ```text
//! g e r b i l
//!       b i l l y
//! ```
//!
//! The score of a chain is the number of overlapping letters between each
//! pair of neighbours.  Under [`ScoringPolicy::DoubleEnded`] the overlaps
//! touching the fixed start and end words count twice.
//!
//! All lengths in this module are measured in Unicode scalar values
//! (`char`s), not bytes.

use serde::{Deserialize, Serialize};

/// How the per-pair overlaps of a chain are combined into a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// Every overlapping letter scores one point.
    Flat,
    /// Like [`ScoringPolicy::Flat`], but the first pair (start word → first
    /// user word) and the last pair (last user word → end word) score double.
    #[default]
    DoubleEnded,
}

impl ScoringPolicy {
    /// Returns the multiplier applied to the pair that ends at `index` in a
    /// chain of `len` words.
    ///
    /// `index` is the position of the *second* word of the pair, so the
    /// first pair is `index == 1` and the last pair is `index == len - 1`.
    pub fn pair_multiplier(self, index: usize, len: usize) -> u32 {
        match self {
            ScoringPolicy::Flat => 1,
            ScoringPolicy::DoubleEnded if index == 1 || index + 1 == len => 2,
            ScoringPolicy::DoubleEnded => 1,
        }
    }
}

/// Returns the length of the longest suffix of `word_a` that is also a prefix
/// of `word_b`, never counting the whole of `word_a`.
///
/// Candidate suffixes are tried starting at offset 1 into `word_a` and moving
/// right, so the first hit is the longest one.  If nothing matches, or either
/// word is empty, the result is 0.
///
/// # Example
///
/// ```rust
/// use stairword_core::overlap_count;
///
/// assert_eq!(overlap_count("gerbil", "billy"), 3);
/// assert_eq!(overlap_count("zinger", "gerbil"), 3);
/// assert_eq!(overlap_count("apple", "zebra"), 0);
/// ```
pub fn overlap_count(word_a: &str, word_b: &str) -> usize {
    word_a
        .char_indices()
        .skip(1)
        .map(|(start, _)| &word_a[start..])
        .find(|suffix| word_b.starts_with(suffix))
        .map_or(0, |suffix| suffix.chars().count())
}

/// Sums the overlaps between consecutive words of `words` under `policy`.
///
/// Empty entries (unfilled slots) simply contribute nothing, so the score of
/// a partially completed chain is well defined.
pub fn chain_score<S: AsRef<str>>(words: &[S], policy: ScoringPolicy) -> u32 {
    words
        .windows(2)
        .enumerate()
        .map(|(pair, window)| {
            let overlap = overlap_count(window[0].as_ref(), window[1].as_ref()) as u32;
            overlap * policy.pair_multiplier(pair + 1, words.len())
        })
        .sum()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
