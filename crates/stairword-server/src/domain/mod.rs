//! Domain layer for stairword-server.
//!
//! Pure types with no I/O: the JSON protocol and the configuration struct.
//! Game rules themselves live in `stairword-core`.
//!
//! # What does NOT belong here?
//!
//! - Any `tokio`, `TcpStream`, or `WebSocket` types
//! - File I/O or environment variable reading
//! - HTTP clients

pub mod config;
pub mod messages;

pub use config::{DictionarySettings, ServerConfig};
pub use messages::{ClientMsg, ServerMsg};
