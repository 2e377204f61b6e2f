//! Daily puzzle schedule.
//!
//! Every day since a fixed epoch gets the next `(start, end)` pair from a
//! list, wrapping around when the list runs out.  The puzzle number shown to
//! players is the 1-based day count.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors building a [`DailySchedule`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PuzzleError {
    /// The schedule has no word pairs to hand out.
    #[error("daily word list is empty")]
    EmptySchedule,

    /// A pair has an empty start or end word.
    #[error("daily word pair {index} has an empty word")]
    EmptyWord { index: usize },
}

/// The start/end words for one day, and that day's puzzle number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodaysPuzzle {
    pub start_word: String,
    pub end_word: String,
    pub number: u32,
}

/// Supplies the puzzle that is live right now.
pub trait PuzzleProvider: Send + Sync {
    fn todays_puzzle(&self) -> TodaysPuzzle;
}

/// Rotating list of daily word pairs anchored at an epoch.
#[derive(Debug, Clone)]
pub struct DailySchedule {
    epoch: DateTime<Utc>,
    pairs: Vec<(String, String)>,
}

/// 2023-01-26T19:00:00Z, the day puzzle #1 went live.
pub fn default_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, 26, 19, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

impl DailySchedule {
    /// Builds a schedule from `pairs`, lowercasing every word.
    ///
    /// # Errors
    ///
    /// [`PuzzleError::EmptySchedule`] if `pairs` is empty,
    /// [`PuzzleError::EmptyWord`] if any word is blank.
    pub fn new(epoch: DateTime<Utc>, pairs: Vec<(String, String)>) -> Result<Self, PuzzleError> {
        if pairs.is_empty() {
            return Err(PuzzleError::EmptySchedule);
        }
        let pairs = pairs
            .into_iter()
            .enumerate()
            .map(|(index, (start, end))| {
                let (start, end) = (start.trim().to_lowercase(), end.trim().to_lowercase());
                if start.is_empty() || end.is_empty() {
                    Err(PuzzleError::EmptyWord { index })
                } else {
                    Ok((start, end))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { epoch, pairs })
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the puzzle live at instant `now`.
    ///
    /// Whole days elapsed since the epoch select the pair (modulo the list
    /// length).  Instants before the epoch map to day 0.
    pub fn puzzle_at(&self, now: DateTime<Utc>) -> TodaysPuzzle {
        let days = now.signed_duration_since(self.epoch).num_days().max(0) as usize;
        let (start, end) = &self.pairs[days % self.pairs.len()];
        TodaysPuzzle {
            start_word: start.clone(),
            end_word: end.clone(),
            number: u32::try_from(days + 1).unwrap_or(u32::MAX),
        }
    }
}

impl PuzzleProvider for DailySchedule {
    fn todays_puzzle(&self) -> TodaysPuzzle {
        self.puzzle_at(Utc::now())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
