//! In-process [`ResultStore`].
//!
//! Results live in a `tokio::sync::RwLock<HashMap<..>>` keyed by share id and
//! are lost when the process exits.  Statistics are computed on demand by
//! scanning every result for the requested puzzle.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use stairword_core::{GameResult, PuzzleStats, ShareId};

use crate::application::game_service::{ResultStore, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryResultStore {
    results: RwLock<HashMap<ShareId, GameResult>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored results.
    pub async fn len(&self) -> usize {
        self.results.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.results.read().await.is_empty()
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn save(&self, result: GameResult) -> Result<(), StoreError> {
        let mut results = self.results.write().await;
        if results.contains_key(&result.share_id) {
            return Err(StoreError::DuplicateShareId(result.share_id));
        }
        results.insert(result.share_id.clone(), result);
        Ok(())
    }

    async fn find_by_share_id(&self, share_id: &ShareId) -> Result<Option<GameResult>, StoreError> {
        Ok(self.results.read().await.get(share_id).cloned())
    }

    async fn stats_for_puzzle(&self, puzzle_number: u32) -> Result<Option<PuzzleStats>, StoreError> {
        let results = self.results.read().await;
        Ok(PuzzleStats::from_scores(
            results
                .values()
                .filter(|r| r.puzzle_number == puzzle_number)
                .map(|r| r.score),
        ))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
