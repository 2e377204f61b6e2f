//! TOML configuration file for the game server.
//!
//! Every section and field is optional; anything left out keeps the value
//! from [`ServerConfig::default`].
//!
//! ```toml
//! [game]
//! chain_length = 5
//! min_word_length = 3
//! max_word_length = 45
//! scoring = "double_ended"       # or "flat"
//! epoch = "2023-01-26T19:00:00Z"
//!
//! [words]
//! word_list = "data/words.json"
//! daily_words = "data/daily.json"
//!
//! [dictionary]
//! enabled = true
//! url = "https://api.dictionaryapi.dev/api/v2/entries/en"
//! timeout_secs = 5
//!
//! [site]
//! url = "https://stairword.example.com"
//! log_level = "info"
//! ```
//!
//! # Serde default values
//!
//! Each section is `#[serde(default)]` and every field inside it is an
//! `Option`, so a missing field means "keep the built-in default" rather than
//! "reset to zero".  [`ConfigFile::apply_to`] copies only the fields that are
//! present.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stairword_core::ScoringPolicy;
use thiserror::Error;
use tracing::debug;

use crate::domain::config::ServerConfig;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The file parsed but a value is out of range.
    #[error("invalid config value: {0}")]
    Invalid(String),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level layout of the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub game: GameSection,
    pub words: WordsSection,
    pub dictionary: DictionarySection,
    pub site: SiteSection,
}

/// `[game]`: chain rules and the puzzle calendar.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GameSection {
    pub chain_length: Option<usize>,
    pub min_word_length: Option<usize>,
    pub max_word_length: Option<usize>,
    pub scoring: Option<ScoringPolicy>,
    pub epoch: Option<DateTime<Utc>>,
}

/// `[words]`: paths to the JSON word files.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct WordsSection {
    pub word_list: Option<PathBuf>,
    pub daily_words: Option<PathBuf>,
}

/// `[dictionary]`: online dictionary lookups.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DictionarySection {
    pub enabled: Option<bool>,
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// `[site]`: public URL and logging.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    pub url: Option<String>,
    pub log_level: Option<String>,
}

impl ConfigFile {
    /// Parses config file text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] if the TOML is malformed or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Overlays every field present in the file onto `config`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if a chain needs fewer than two words, the
    /// maximum word length is below the minimum, or a timeout is zero.  `config` is left untouched in that case.
    pub fn apply_to(&self, config: &mut ServerConfig) -> Result<(), ConfigError> {
        let mut next = config.clone();

        if let Some(n) = self.game.chain_length {
            if n < 2 {
                return Err(ConfigError::Invalid(format!(
                    "game.chain_length must be at least 2, got {n}"
                )));
            }
            next.rules.chain_length = n;
        }
        if let Some(n) = self.game.min_word_length {
            next.rules.min_word_length = n;
        }
        if let Some(n) = self.game.max_word_length {
            next.rules.max_word_length = n;
        }
        if next.rules.max_word_length < next.rules.min_word_length.max(1) {
            return Err(ConfigError::Invalid(format!(
                "game.max_word_length ({}) must be at least game.min_word_length ({}) and 1",
                next.rules.max_word_length, next.rules.min_word_length
            )));
        }
        if let Some(policy) = self.game.scoring {
            next.rules.policy = policy;
        }
        if let Some(epoch) = self.game.epoch {
            next.epoch = epoch;
        }

        if let Some(path) = &self.words.word_list {
            next.word_list_path = path.clone();
        }
        if let Some(path) = &self.words.daily_words {
            next.daily_words_path = path.clone();
        }

        if let Some(enabled) = self.dictionary.enabled {
            next.dictionary.enabled = enabled;
        }
        if let Some(url) = &self.dictionary.url {
            next.dictionary.url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = self.dictionary.timeout_secs {
            if secs == 0 {
                return Err(ConfigError::Invalid(
                    "dictionary.timeout_secs must be greater than 0".to_string(),
                ));
            }
            next.dictionary.timeout = Duration::from_secs(secs);
        }

        if let Some(url) = &self.site.url {
            next.site_url = url.clone();
        }
        if let Some(level) = &self.site.log_level {
            next.log_level = level.clone();
        }

        *config = next;
        Ok(())
    }
}

/// Reads and parses the config file at `path`.  The file must exist.
///
/// # Errors
///
/// [`ConfigError::Io`] if the file cannot be read, [`ConfigError::Parse`] if
/// it is not valid.
pub fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file = ConfigFile::parse(&content)?;
    debug!("loaded config file {}", path.display());
    Ok(file)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
