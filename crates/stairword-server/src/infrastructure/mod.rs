//! Infrastructure layer for stairword-server.
//!
//! The infrastructure layer handles all I/O and wires the concrete
//! implementations into a [`GameService`].
//!
//! # Responsibilities
//!
//! - Reading the TOML config file and the JSON word files
//! - Looking words up in the online dictionary (`reqwest`)
//! - Keeping submitted results in memory
//! - Accepting WebSocket connections and spawning per-connection tasks
//!
//! # What does NOT belong here?
//!
//! - Game rules (that is `stairword-core`)
//! - Request handling (that is the application layer)
//! - Message type definitions (that is the domain layer)

pub mod config_file;
pub mod dictionary_http;
pub mod memory_store;
pub mod word_files;
pub mod ws_server;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use stairword_core::{DailySchedule, DictionaryLookup, OfflineDictionary, WordValidator};

use crate::application::GameService;
use crate::domain::config::ServerConfig;

pub use config_file::{load_config_file, ConfigError, ConfigFile};
pub use dictionary_http::HttpDictionary;
pub use memory_store::InMemoryResultStore;
pub use word_files::{load_daily_pairs, load_word_list, WordFileError};
pub use ws_server::{bind, run_server, serve};

/// Loads the word files and builds a [`GameService`] backed by the in-memory
/// result store.
///
/// # Errors
///
/// Returns an error if a word file cannot be read, the daily schedule is
/// empty, or the HTTP client cannot be created.
pub fn build_game_service(config: &ServerConfig) -> anyhow::Result<GameService> {
    let trusted = load_word_list(&config.word_list_path)?;
    let pairs = load_daily_pairs(&config.daily_words_path)?;
    let schedule = DailySchedule::new(config.epoch, pairs).with_context(|| {
        format!(
            "invalid daily puzzle file {}",
            config.daily_words_path.display()
        )
    })?;

    let lookup: Arc<dyn DictionaryLookup> = if config.dictionary.enabled {
        info!("dictionary lookups enabled via {}", config.dictionary.url);
        Arc::new(
            HttpDictionary::new(&config.dictionary.url, config.dictionary.timeout)
                .context("failed to create dictionary HTTP client")?,
        )
    } else {
        info!("dictionary lookups disabled; only trusted words are accepted");
        Arc::new(OfflineDictionary)
    };

    Ok(GameService::new(
        config.rules,
        Arc::new(schedule),
        WordValidator::new(Arc::new(trusted), lookup),
        Arc::new(InMemoryResultStore::new()),
        config.site_url.clone(),
    ))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
