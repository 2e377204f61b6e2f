//! # stairword-core
//!
//! Game rules for Stairword, a daily word puzzle.
//!
//! Each day the player gets a **start** word and an **end** word and must
//! connect them with three words of their own.  Every word has to overlap the
//! end of the previous word by at least one letter, and extend it by at least
//! one letter:
//!
//! ```text
//! zinger
//!    gerbil
//!       billy
//!          lysine
//!              nestle
//! ```
//!
//! Each overlapping letter scores a point; letters overlapping the start or
//! end word score double.  The chain above scores 15.
//!
//! This crate has no I/O.  It is used by `stairword-server`, which supplies
//! the dictionary, the clock, and storage.
//!
//! - **`domain::overlap`** – `overlap_count` and `chain_score`.
//! - **`domain::chain`** – the checks a submitted chain must pass.
//! - **`domain::dictionary`** – trusted words plus an injected lookup.
//! - **`domain::layout`** – the staircase rows a client draws.
//! - **`domain::puzzle`** – which words are live today.
//! - **`domain::session`** – one player's chain in progress.
//! - **`domain::result`** – stored results, share ids, statistics.

pub mod domain;

// Re-export the most-used items at the crate root so callers can write
// `stairword_core::overlap_count` instead of the full module path.
pub use domain::chain::{check_adjacency, normalize_chain, ChainError, ChainRules};
pub use domain::dictionary::{
    DictionaryError, DictionaryLookup, OfflineDictionary, TrustedWordList, WordValidator,
};
pub use domain::layout::{layout_chain, render_text, RowLayout};
pub use domain::overlap::{chain_score, overlap_count, ScoringPolicy};
pub use domain::puzzle::{DailySchedule, PuzzleError, PuzzleProvider, TodaysPuzzle};
pub use domain::result::{share_text, GameResult, PuzzleStats, ShareId, ShareIdError};
pub use domain::session::PuzzleSession;
