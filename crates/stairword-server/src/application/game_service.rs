//! GameService: validates, scores, stores, and looks up chains.
//!
//! The service owns the collaborators the core rules need but cannot provide
//! themselves:
//!
//! - a [`PuzzleProvider`] for today's words,
//! - a [`WordValidator`] (trusted list + dictionary lookup),
//! - a [`ResultStore`] for accepted chains.
//!
//! # Submission pipeline
//!
//! ```text
//! words ──► normalise ──► shape rules ──► dictionary ──► score ──► save ──► stats
//!               │              │               │                    │
//!               │         ChainError      NotAWord          DuplicateShareId
//!               │        (no lookup)     (stops at first)    (retry, new id)
//! ```
//!
//! Shape rules run first so a chain with the wrong start/end words never
//! costs a dictionary request.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use stairword_core::{
    chain_score, layout_chain, normalize_chain, share_text, ChainError, ChainRules, GameResult,
    PuzzleProvider, PuzzleSession, PuzzleStats, RowLayout, ShareId, ShareIdError, TodaysPuzzle,
    WordValidator,
};

/// How many fresh share ids to try before giving up on a save.
pub const MAX_SHARE_ID_ATTEMPTS: usize = 3;

/// Errors reported by a [`ResultStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another result already uses this share id.
    #[error("share id {0} is already taken")]
    DuplicateShareId(ShareId),

    /// The backing store failed.
    #[error("result store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence for accepted chains.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Stores `result`.  Must fail with [`StoreError::DuplicateShareId`] rather
    /// than overwrite an existing result.
    async fn save(&self, result: GameResult) -> Result<(), StoreError>;

    async fn find_by_share_id(&self, share_id: &ShareId) -> Result<Option<GameResult>, StoreError>;

    /// Best and average score for `puzzle_number`; `None` if nobody has
    /// finished it yet.
    async fn stats_for_puzzle(&self, puzzle_number: u32) -> Result<Option<PuzzleStats>, StoreError>;
}

/// Errors returned by [`GameService`] operations.
#[derive(Debug, Error)]
pub enum GameError {
    /// The chain or word broke a game rule.
    #[error(transparent)]
    Rejected(#[from] ChainError),

    /// The share id is malformed.
    #[error("invalid share id: {0}")]
    InvalidShareId(#[from] ShareIdError),

    /// No result has this share id.
    #[error("no result found for share id {0}")]
    NotFound(ShareId),

    /// The result store failed.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl GameError {
    /// `true` for errors the player caused and can fix; `false` for server
    /// faults.
    pub fn is_player_error(&self) -> bool {
        !matches!(self, GameError::Storage(_))
    }
}

/// A chain that was accepted and stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub result: GameResult,
    pub stats: Option<PuzzleStats>,
    pub share_text: String,
}

/// A stored result with its puzzle's current statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedResult {
    pub result: GameResult,
    pub stats: Option<PuzzleStats>,
}

/// The game use cases.  Shared by every connection behind an `Arc`.
pub struct GameService {
    rules: ChainRules,
    puzzles: Arc<dyn PuzzleProvider>,
    validator: WordValidator,
    store: Arc<dyn ResultStore>,
    site_url: String,
}

impl GameService {
    pub fn new(
        rules: ChainRules,
        puzzles: Arc<dyn PuzzleProvider>,
        validator: WordValidator,
        store: Arc<dyn ResultStore>,
        site_url: impl Into<String>,
    ) -> Self {
        Self {
            rules,
            puzzles,
            validator,
            store,
            site_url: site_url.into(),
        }
    }

    pub fn rules(&self) -> ChainRules {
        self.rules
    }

    pub fn todays_puzzle(&self) -> TodaysPuzzle {
        self.puzzles.todays_puzzle()
    }

    /// Starts an empty chain for today's puzzle.
    pub fn new_session(&self) -> PuzzleSession {
        PuzzleSession::new(self.todays_puzzle(), self.rules)
    }

    /// Replaces `session` with a fresh one if the day has rolled over since it
    /// was created.  Returns `true` if it was replaced.
    pub fn refresh_session(&self, session: &mut PuzzleSession) -> bool {
        let today = self.todays_puzzle();
        if session.puzzle() == &today {
            return false;
        }
        info!(
            "puzzle #{} replaced by #{}; resetting session",
            session.puzzle().number,
            today.number
        );
        *session = PuzzleSession::new(today, self.rules);
        true
    }

    /// Statistics for today's puzzle.
    ///
    /// # Errors
    ///
    /// [`GameError::Storage`] if the store fails.
    pub async fn todays_stats(&self) -> Result<Option<PuzzleStats>, GameError> {
        let number = self.todays_puzzle().number;
        Ok(self.store.stats_for_puzzle(number).await?)
    }

    /// Fills the session's next blank with `word` after checking the chain
    /// rules and the dictionary.
    ///
    /// # Errors
    ///
    /// [`GameError::Rejected`]; the session is unchanged.
    pub async fn place_word(&self, session: &mut PuzzleSession, word: &str) -> Result<(), GameError> {
        let word = session.check_candidate(word)?;
        if !self.validator.is_word_valid(&word).await {
            return Err(ChainError::NotAWord(word).into());
        }
        session.place(&word)?;
        debug!("placed {word:?}; chain is now {:?}", session.words());
        Ok(())
    }

    /// Validates, scores, and stores a complete chain.
    ///
    /// # Errors
    ///
    /// [`GameError::Rejected`] for any rule violation (nothing is stored),
    /// [`GameError::Storage`] if saving or reading statistics fails.
    pub async fn submit<S: AsRef<str>>(&self, words: &[S]) -> Result<Submission, GameError> {
        let words = normalize_chain(words);
        let puzzle = self.todays_puzzle();

        self.rules.validate_shape(&words, &puzzle)?;
        self.validator.validate_all(&words).await?;

        let score = chain_score(&words, self.rules.policy);
        let result = self.save_with_fresh_id(words, score, puzzle.number).await?;
        info!(
            "saved result {} for puzzle #{} with score {}",
            result.share_id, result.puzzle_number, result.score
        );

        let stats = self.store.stats_for_puzzle(puzzle.number).await?;
        let share_text = share_text(&puzzle, score, &self.site_url, &result.share_id);

        Ok(Submission {
            result,
            stats,
            share_text,
        })
    }

    /// Looks up a stored result by share id, with its puzzle's statistics.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidShareId`], [`GameError::NotFound`], or
    /// [`GameError::Storage`].
    pub async fn shared_result(&self, share_id: &str) -> Result<SharedResult, GameError> {
        let share_id: ShareId = share_id.trim().parse()?;
        let result = self
            .store
            .find_by_share_id(&share_id)
            .await?
            .ok_or(GameError::NotFound(share_id))?;
        let stats = self.store.stats_for_puzzle(result.puzzle_number).await?;
        Ok(SharedResult { result, stats })
    }

    /// Lays out an arbitrary chain for display.  Nothing is validated beyond
    /// the word count and word length limits.
    ///
    /// # Errors
    ///
    /// [`GameError::Rejected`] with [`ChainError::TooManyWords`] or
    /// [`ChainError::WordTooLong`].
    pub fn layout<S: AsRef<str>>(&self, words: &[S]) -> Result<Vec<RowLayout>, GameError> {
        self.rules.check_layout_request(words)?;
        Ok(layout_chain(words))
    }

    async fn save_with_fresh_id(
        &self,
        words: Vec<String>,
        score: u32,
        puzzle_number: u32,
    ) -> Result<GameResult, StoreError> {
        let mut attempt = 1;
        loop {
            let result = GameResult {
                words: words.clone(),
                score,
                puzzle_number,
                share_id: ShareId::generate(),
            };
            match self.store.save(result.clone()).await {
                Ok(()) => return Ok(result),
                Err(StoreError::DuplicateShareId(id)) if attempt < MAX_SHARE_ID_ATTEMPTS => {
                    warn!("share id {id} collided (attempt {attempt}); retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
