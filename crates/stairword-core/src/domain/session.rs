//! A player's in-progress chain for today's puzzle.
//!
//! The chain starts as `[start, "", "", "", end]`.  The player fills the
//! blanks left to right, one word at a time, and may undo the most recent
//! word.
//!
//! ```text
//!  index:   0        1        2       3        4
//!         zinger   gerbil   billy    ""     nestle
//!                                    ^ cursor
//! ```
//!
//! Dictionary membership is *not* checked here because it may suspend; the
//! caller checks it between [`PuzzleSession::check_candidate`] and
//! [`PuzzleSession::place`].

use crate::domain::chain::{check_adjacency, ChainError, ChainRules};
use crate::domain::layout::{layout_chain, RowLayout};
use crate::domain::overlap::chain_score;
use crate::domain::puzzle::TodaysPuzzle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleSession {
    puzzle: TodaysPuzzle,
    rules: ChainRules,
    words: Vec<String>,
    /// Index of the next blank slot; equals `words.len() - 1` once complete.
    cursor: usize,
}

impl PuzzleSession {
    /// Starts an empty chain for `puzzle`.  `rules.chain_length` below 2 is
    /// treated as 2 (start and end only).
    pub fn new(puzzle: TodaysPuzzle, rules: ChainRules) -> Self {
        let blanks = rules.chain_length.max(2) - 2;
        let mut words = Vec::with_capacity(blanks + 2);
        words.push(puzzle.start_word.clone());
        words.extend(std::iter::repeat(String::new()).take(blanks));
        words.push(puzzle.end_word.clone());

        Self {
            puzzle,
            rules,
            words,
            cursor: 1,
        }
    }

    pub fn puzzle(&self) -> &TodaysPuzzle {
        &self.puzzle
    }

    pub fn rules(&self) -> &ChainRules {
        &self.rules
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The slot the next word will fill, or `None` when the chain is complete.
    pub fn current_index(&self) -> Option<usize> {
        (!self.is_complete()).then_some(self.cursor)
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.words.len() - 1
    }

    /// Score of the words placed so far.
    pub fn score(&self) -> u32 {
        chain_score(&self.words, self.rules.policy)
    }

    pub fn layout(&self) -> Vec<RowLayout> {
        layout_chain(&self.words)
    }

    /// Checks whether `word` may fill the current slot and returns it
    /// lowercased.
    ///
    /// The word must be long enough, overlap the previous word, overlap the
    /// end word when it fills the last blank, and not already be in the chain.
    ///
    /// # Errors
    ///
    /// [`ChainError::ChainComplete`] if there is no blank left, otherwise the
    /// first failing rule.
    pub fn check_candidate(&self, word: &str) -> Result<String, ChainError> {
        if self.is_complete() {
            return Err(ChainError::ChainComplete);
        }

        let word = word.trim().to_lowercase();
        self.rules.check_length(&word)?;
        check_adjacency(&self.words[self.cursor - 1], &word)?;

        let fills_last_blank = self.cursor + 2 == self.words.len();
        if fills_last_blank {
            check_adjacency(&word, &self.words[self.cursor + 1])?;
        }

        if self.words.contains(&word) {
            return Err(ChainError::DuplicateWord(word));
        }

        Ok(word)
    }

    /// Places `word` in the current slot and advances to the next one.
    ///
    /// # Errors
    ///
    /// Same as [`PuzzleSession::check_candidate`]; the session is unchanged
    /// on error.
    pub fn place(&mut self, word: &str) -> Result<(), ChainError> {
        let word = self.check_candidate(word)?;
        self.words[self.cursor] = word;
        self.cursor += 1;
        Ok(())
    }

    /// Clears the most recently placed word.  Returns `false` if no player
    /// word has been placed yet.
    pub fn undo(&mut self) -> bool {
        if self.cursor < 2 {
            return false;
        }
        self.cursor -= 1;
        self.words[self.cursor].clear();
        true
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
