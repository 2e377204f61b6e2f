//! Domain entities for Stairword.
//!
//! This module contains pure game rules with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The innermost layer of the application is the **domain**.  Domain code
//! holds the rules that make the game what it is (how words overlap, how a
//! chain is scored, how it is drawn) and nothing else: no sockets, no files,
//! no clocks except where a caller passes one in.  The only outward-facing
//! piece is [`dictionary::DictionaryLookup`], a trait the server implements.

/// Suffix/prefix overlap and chain scoring.
pub mod overlap;

/// Validation rules for submitted chains and the error taxonomy.
pub mod chain;

/// Trusted word list and the injected dictionary lookup.
pub mod dictionary;

/// Stair layout rows and the plain-text renderer.
pub mod layout;

/// Daily start/end word schedule.
pub mod puzzle;

/// Stored results, share ids, and statistics.
pub mod result;

/// Word-at-a-time chain building with undo.
pub mod session;
