//! Application layer: game use cases and request dispatch.
//!
//! Depends on `domain` and `stairword-core` only.  Storage and dictionary
//! lookups arrive through the [`ResultStore`] and
//! [`DictionaryLookup`](stairword_core::DictionaryLookup) traits, so
//! everything here can be tested with in-memory fakes.

pub mod dispatch;
pub mod game_service;

pub use dispatch::{handle_message, ConnectionState};
pub use game_service::{
    GameError, GameService, ResultStore, SharedResult, StoreError, Submission,
    MAX_SHARE_ID_ATTEMPTS,
};
