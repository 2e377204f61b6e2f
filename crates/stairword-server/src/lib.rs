//! stairword-server library crate.
//!
//! Serves the Stairword daily puzzle to browsers as JSON over WebSocket.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Browser (JSON over WebSocket)
//!         ↕
//! [stairword-server]
//!   ├── domain/           Pure types: JSON message enums, ServerConfig
//!   ├── application/      GameService use cases, per-connection dispatch
//!   └── infrastructure/
//!         ├── ws_server/        WebSocket accept loop (tokio-tungstenite)
//!         ├── dictionary_http/  Dictionary API client (reqwest)
//!         ├── memory_store/     In-memory ResultStore
//!         ├── word_files/       JSON word list and daily schedule
//!         └── config_file/      TOML config file
//!         ↕
//! [stairword-core]  overlap, scoring, layout, chain rules
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O.
//! - `application` depends on `domain` and `stairword-core` only; storage and
//!   dictionary access come in through traits.
//! - `infrastructure` depends on all other layers plus `tokio`, `reqwest`,
//!   and `tungstenite`.

/// Domain layer: protocol messages and configuration (no I/O).
pub mod domain;

/// Application layer: game use cases and request dispatch.
pub mod application;

/// Infrastructure layer: WebSocket server, dictionary client, storage, files.
pub mod infrastructure;
