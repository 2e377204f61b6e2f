//! Loads the JSON word files the server starts from.
//!
//! - `words.json`: `["billy", "gerbil", ...]`, the trusted word list.
//! - `daily.json`: `[["zinger", "nestle"], ...]`, one start/end pair per day.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use stairword_core::TrustedWordList;

#[derive(Debug, Error)]
pub enum WordFileError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, WordFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| WordFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| WordFileError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads the trusted word list.
///
/// # Errors
///
/// [`WordFileError`] if the file is missing or is not a JSON array of strings.
pub fn load_word_list(path: &Path) -> Result<TrustedWordList, WordFileError> {
    let words: Vec<String> = read_json(path)?;
    let list = TrustedWordList::new(words);
    info!("loaded {} trusted words from {}", list.len(), path.display());
    Ok(list)
}

/// Reads the daily start/end pairs in schedule order.
///
/// # Errors
///
/// [`WordFileError`] if the file is missing or is not a JSON array of
/// two-string arrays.
pub fn load_daily_pairs(path: &Path) -> Result<Vec<(String, String)>, WordFileError> {
    let pairs: Vec<(String, String)> = read_json(path)?;
    info!("loaded {} daily puzzles from {}", pairs.len(), path.display());
    Ok(pairs)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
