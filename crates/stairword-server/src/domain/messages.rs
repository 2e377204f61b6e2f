//! JSON message types for the browser-facing WebSocket protocol.
//!
//! # Message flow
//!
//! ```text
//! Browser → Server:  JSON text frame  →  ClientMsg
//! Server  → Browser: ServerMsg        →  JSON text frame
//! ```
//!
//! Every request gets exactly one reply frame.  A binary frame counts as a
//! request and is answered with [`ServerMsg::Error`].
//!
//! # JSON discriminant
//!
//! Every message is a JSON object with a `"type"` field that identifies the
//! variant.  All other fields are flattened into the same object:
//!
//! ```json
//! {"type":"PlaceWord","word":"gerbil"}
//! ```
//!
//! Serde's `#[serde(tag = "type")]` attribute handles this automatically.

use serde::{Deserialize, Serialize};
use stairword_core::{PuzzleStats, RowLayout};

// ── Browser → Server messages ─────────────────────────────────────────────────

/// All messages a browser can send over the WebSocket.
///
/// # Serde representation
///
/// ```json
/// {"type":"GetPuzzle"}
/// {"type":"PlaceWord","word":"gerbil"}
/// {"type":"Undo"}
/// {"type":"Submit"}
/// {"type":"Submit","words":["zinger","gerbil","billy","lysine","nestle"]}
/// {"type":"GetShared","share_id":"aB3xZ"}
/// {"type":"Layout","words":["gerbil","billy"]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMsg {
    /// Asks for today's start/end words and statistics.
    GetPuzzle,

    /// Fills the next blank slot of this connection's chain.
    PlaceWord { word: String },

    /// Clears the most recently placed word.
    Undo,

    /// Submits a complete chain for scoring and storage.
    ///
    /// Without `words`, the connection's own chain is submitted.
    Submit {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        words: Option<Vec<String>>,
    },

    /// Looks up a stored result by its share id.
    GetShared { share_id: String },

    /// Lays out an arbitrary chain (e.g. for a "how to play" page).
    Layout { words: Vec<String> },
}

impl ClientMsg {
    /// Variant name, for log messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ClientMsg::GetPuzzle => "GetPuzzle",
            ClientMsg::PlaceWord { .. } => "PlaceWord",
            ClientMsg::Undo => "Undo",
            ClientMsg::Submit { .. } => "Submit",
            ClientMsg::GetShared { .. } => "GetShared",
            ClientMsg::Layout { .. } => "Layout",
        }
    }
}

// ── Server → Browser messages ─────────────────────────────────────────────────

/// All messages the server sends to a browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMsg {
    /// Today's puzzle.  `stats` is `null` until someone has finished it.
    Puzzle {
        number: u32,
        start_word: String,
        end_word: String,
        total_words: usize,
        stats: Option<PuzzleStats>,
    },

    /// The connection's chain after a `PlaceWord` or `Undo`.
    Board {
        words: Vec<String>,
        rows: Vec<RowLayout>,
        score: u32,
        complete: bool,
        /// Slot the next word fills; `null` once the chain is complete.
        current_index: Option<usize>,
    },

    /// A chain was accepted and stored.
    Submitted {
        share_id: String,
        score: u32,
        stats: Option<PuzzleStats>,
        share_text: String,
    },

    /// A stored result, words uppercased for display.
    Shared {
        words: Vec<String>,
        puzzle_number: u32,
        score: u32,
        stats: Option<PuzzleStats>,
        rows: Vec<RowLayout>,
    },

    /// Reply to `Layout`.
    Layout { rows: Vec<RowLayout> },

    /// The request broke a game rule; the player should try again.
    Rejected { reason: String },

    /// The request could not be processed.
    Error { message: String },
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_word_deserializes_from_tagged_json() {
        let msg: ClientMsg = serde_json::from_str(r#"{"type":"PlaceWord","word":"gerbil"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMsg::PlaceWord {
                word: "gerbil".to_string()
            }
        );
    }

    #[test]
    fn test_unit_variants_deserialize_from_type_only() {
        let msg: ClientMsg = serde_json::from_str(r#"{"type":"GetPuzzle"}"#).unwrap();
        assert_eq!(msg, ClientMsg::GetPuzzle);
        let msg: ClientMsg = serde_json::from_str(r#"{"type":"Undo"}"#).unwrap();
        assert_eq!(msg, ClientMsg::Undo);
    }

    #[test]
    fn test_submit_words_are_optional() {
        let msg: ClientMsg = serde_json::from_str(r#"{"type":"Submit"}"#).unwrap();
        assert_eq!(msg, ClientMsg::Submit { words: None });

        let msg: ClientMsg =
            serde_json::from_str(r#"{"type":"Submit","words":["a","b"]}"#).unwrap();
        assert_eq!(
            msg,
            ClientMsg::Submit {
                words: Some(vec!["a".to_string(), "b".to_string()])
            }
        );
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let result: Result<ClientMsg, _> = serde_json::from_str(r#"{"type":"Teleport"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejected_serializes_with_type_tag() {
        let json = serde_json::to_value(ServerMsg::Rejected {
            reason: "qzx is not a word".to_string(),
        })
        .unwrap();
        assert_eq!(json["type"], "Rejected");
        assert_eq!(json["reason"], "qzx is not a word");
    }

    #[test]
    fn test_puzzle_without_stats_serializes_null() {
        let json = serde_json::to_value(ServerMsg::Puzzle {
            number: 3,
            start_word: "ZINGER".to_string(),
            end_word: "NESTLE".to_string(),
            total_words: 5,
            stats: None,
        })
        .unwrap();
        assert!(json["stats"].is_null());
        assert_eq!(json["total_words"], 5);
    }

    #[test]
    fn test_board_rows_carry_layout_spans() {
        let rows = stairword_core::layout_chain(&["gerbil", "billy"]);
        let json = serde_json::to_value(ServerMsg::Layout { rows }).unwrap();
        assert_eq!(json["rows"][1]["prev_overlap"], "bil");
        assert_eq!(json["rows"][1]["non_overlap"], "ly");
        assert_eq!(json["rows"][1]["indent"], 3);
    }

    #[test]
    fn test_type_name_matches_serde_tag() {
        let msg = ClientMsg::GetShared {
            share_id: "aB3xZ".to_string(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], msg.type_name());
    }
}
