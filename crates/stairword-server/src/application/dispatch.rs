//! Per-connection request handling.
//!
//! [`handle_message`] turns one [`ClientMsg`] into exactly one [`ServerMsg`].
//! It owns no sockets, so every protocol rule can be tested without a
//! network:
//!
//! ```text
//! ClientMsg ──► handle_message(service, state) ──► ServerMsg
//!                         │
//!                  ConnectionState (chain in progress, submitted share id)
//! ```
//!
//! Errors never escape: rule violations become `Rejected` frames and server
//! faults become `Error` frames.

use stairword_core::{layout_chain, PuzzleSession, ShareId};
use tracing::{debug, error};

use crate::application::game_service::{GameError, GameService};
use crate::domain::messages::{ClientMsg, ServerMsg};

/// Text sent to the client for faults it cannot do anything about.  The real
/// cause is logged.
const INTERNAL_ERROR: &str = "internal server error";

/// State kept for one WebSocket connection.
#[derive(Debug, Clone)]
pub struct ConnectionState {
    pub session: PuzzleSession,
    /// Set once the connection's own chain has been submitted.
    pub submitted: Option<ShareId>,
}

impl ConnectionState {
    pub fn new(service: &GameService) -> Self {
        Self {
            session: service.new_session(),
            submitted: None,
        }
    }
}

/// Handles one client request and returns the reply frame.
pub async fn handle_message(
    service: &GameService,
    state: &mut ConnectionState,
    msg: ClientMsg,
) -> ServerMsg {
    debug!("handling {}", msg.type_name());

    // A connection left open across the daily rollover starts over.
    if service.refresh_session(&mut state.session) {
        state.submitted = None;
    }

    match msg {
        ClientMsg::GetPuzzle => puzzle_reply(service).await,

        ClientMsg::PlaceWord { word } => {
            if state.submitted.is_some() {
                return rejected("this chain has already been submitted");
            }
            match service.place_word(&mut state.session, &word).await {
                Ok(()) => board_reply(&state.session),
                Err(e) => error_reply(e),
            }
        }

        ClientMsg::Undo => {
            if state.submitted.is_some() {
                return rejected("this chain has already been submitted");
            }
            if state.session.undo() {
                board_reply(&state.session)
            } else {
                rejected("there is no word to undo")
            }
        }

        ClientMsg::Submit { words } => {
            let own_chain = words.is_none();
            if own_chain && state.submitted.is_some() {
                return rejected("this chain has already been submitted");
            }
            if own_chain && !state.session.is_complete() {
                return rejected("the chain is not complete yet");
            }
            let words = words.unwrap_or_else(|| state.session.words().to_vec());
            match service.submit(&words).await {
                Ok(submission) => {
                    let share_id = submission.result.share_id;
                    if own_chain {
                        state.submitted = Some(share_id.clone());
                    }
                    ServerMsg::Submitted {
                        share_id: share_id.into(),
                        score: submission.result.score,
                        stats: submission.stats,
                        share_text: submission.share_text,
                    }
                }
                Err(e) => error_reply(e),
            }
        }

        ClientMsg::GetShared { share_id } => match service.shared_result(&share_id).await {
            Ok(shared) => {
                let rows = layout_chain(&shared.result.words);
                ServerMsg::Shared {
                    words: shared
                        .result
                        .words
                        .iter()
                        .map(|w| w.to_uppercase())
                        .collect(),
                    puzzle_number: shared.result.puzzle_number,
                    score: shared.result.score,
                    stats: shared.stats,
                    rows,
                }
            }
            Err(e) => error_reply(e),
        },

        ClientMsg::Layout { words } => match service.layout(&words) {
            Ok(rows) => ServerMsg::Layout { rows },
            Err(e) => error_reply(e),
        },
    }
}

async fn puzzle_reply(service: &GameService) -> ServerMsg {
    let puzzle = service.todays_puzzle();
    match service.todays_stats().await {
        Ok(stats) => ServerMsg::Puzzle {
            number: puzzle.number,
            start_word: puzzle.start_word.to_uppercase(),
            end_word: puzzle.end_word.to_uppercase(),
            total_words: service.rules().chain_length,
            stats,
        },
        Err(e) => error_reply(e),
    }
}

fn board_reply(session: &PuzzleSession) -> ServerMsg {
    ServerMsg::Board {
        words: session.words().to_vec(),
        rows: session.layout(),
        score: session.score(),
        complete: session.is_complete(),
        current_index: session.current_index(),
    }
}

fn rejected(reason: &str) -> ServerMsg {
    ServerMsg::Rejected {
        reason: reason.to_string(),
    }
}

fn error_reply(e: GameError) -> ServerMsg {
    if e.is_player_error() {
        debug!("request rejected: {e}");
        ServerMsg::Rejected {
            reason: e.to_string(),
        }
    } else {
        error!("request failed: {e}");
        ServerMsg::Error {
            message: INTERNAL_ERROR.to_string(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
