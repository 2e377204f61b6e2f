//! Server configuration types.
//!
//! [`ServerConfig`] is the single source of truth for all runtime settings.
//! It starts from [`ServerConfig::default`], is overlaid with the optional
//! TOML config file (see
//! [`config_file`](crate::infrastructure::config_file)), and finally with
//! the CLI bind address.
//!
//! Keeping configuration as a plain struct (no global state, no environment
//! reads in here) makes the server easy to build inside tests.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use stairword_core::domain::puzzle::default_epoch;
use stairword_core::ChainRules;

/// Default public dictionary endpoint; `/<word>` is appended per lookup.
pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Settings for the online dictionary lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionarySettings {
    /// When `false`, only the trusted word list is consulted.
    pub enabled: bool,
    /// Base URL of the dictionary API.
    pub url: String,
    /// Per-request timeout.  A timed-out lookup counts as "not a word".
    pub timeout: Duration,
}

impl Default for DictionarySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            url: DEFAULT_DICTIONARY_URL.to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// All runtime configuration for the game server.
///
/// Build this once at startup and hand the pieces to
/// [`build_game_service`](crate::infrastructure::build_game_service) and
/// [`run_server`](crate::infrastructure::run_server).
///
/// # Example
///
/// ```rust
/// use stairword_server::domain::ServerConfig;
///
/// let cfg = ServerConfig::default();
/// assert_eq!(cfg.bind_addr.port(), 24900);
/// assert_eq!(cfg.rules.chain_length, 5);
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address and port the WebSocket server binds to.
    pub bind_addr: SocketAddr,

    /// Chain length, minimum word length, scoring policy.
    pub rules: ChainRules,

    /// Instant puzzle #1 went live; one new puzzle per whole day after it.
    pub epoch: DateTime<Utc>,

    /// JSON array of trusted words.
    pub word_list_path: PathBuf,

    /// JSON array of `[start, end]` pairs, one per day.
    pub daily_words_path: PathBuf,

    pub dictionary: DictionarySettings,

    /// Public site URL used in share text.
    pub site_url: String,

    /// Default `tracing` filter when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for ServerConfig {
    /// Returns a `ServerConfig` suitable for local development.
    ///
    /// | Field             | Default                   |
    /// |-------------------|---------------------------|
    /// | bind_addr         | `0.0.0.0:24900`           |
    /// | rules             | 5 words, 3 letters, double-ended |
    /// | epoch             | `2023-01-26T19:00:00Z`    |
    /// | word_list_path    | `data/words.json`         |
    /// | daily_words_path  | `data/daily.json`         |
    /// | site_url          | `http://localhost:24900`  |
    /// | log_level         | `info`                    |
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 24900)),
            rules: ChainRules::default(),
            epoch: default_epoch(),
            word_list_path: PathBuf::from("data/words.json"),
            daily_words_path: PathBuf::from("data/daily.json"),
            dictionary: DictionarySettings::default(),
            site_url: "http://localhost:24900".to_string(),
            log_level: "info".to_string(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
