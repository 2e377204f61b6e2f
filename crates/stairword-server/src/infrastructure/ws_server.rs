//! WebSocket server: accept loop and per-connection task management.
//!
//! This module is responsible for:
//!
//! 1. Binding a TCP listener on the configured address.
//! 2. Accepting incoming TCP connections from browsers.
//! 3. Upgrading each connection to a WebSocket session.
//! 4. Reading JSON text frames, handing each to
//!    [`handle_message`](crate::application::handle_message), and writing
//!    back exactly one JSON reply frame.  Binary frames get an `Error` reply.
//!    Messages larger than [`MAX_MESSAGE_SIZE`] close the connection.
//! 5. Stopping the accept loop when the `running` flag is cleared.
//!
//! # Scalability
//!
//! Each browser connection runs in its own Tokio task and holds only its own
//! [`ConnectionState`].  The [`GameService`] is shared behind an `Arc`; the
//! only shared mutable state is the result store's lock.
//!
//! Requests on one connection are handled strictly in order, so a player's
//! `PlaceWord` frames can never race each other.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::{
    accept_async_with_config,
    tungstenite::{protocol::WebSocketConfig, Error as WsError, Message as WsMessage},
};
use tracing::{debug, error, info, warn};

use crate::application::{handle_message, ConnectionState, GameService};
use crate::domain::messages::{ClientMsg, ServerMsg};

/// How often the accept loop wakes up to check the `running` flag.
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Largest message or frame a browser may send.  The biggest legitimate
/// request is a full chain of maximum-length words, well under this.
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024;

/// Frame limits applied to every accepted connection.
fn websocket_config() -> WebSocketConfig {
    let mut config = WebSocketConfig::default();
    config.max_message_size = Some(MAX_MESSAGE_SIZE);
    config.max_frame_size = Some(MAX_MESSAGE_SIZE);
    config
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Binds the WebSocket listener.
///
/// # Errors
///
/// Returns an error if the address is in use or the process lacks permission
/// to bind it.
pub async fn bind(addr: SocketAddr) -> anyhow::Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind WebSocket listener on {addr}"))
}

/// Binds `addr` and serves until `running` is set to `false`.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot be bound.
pub async fn run_server(
    addr: SocketAddr,
    service: Arc<GameService>,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let listener = bind(addr).await?;
    serve(listener, service, running).await
}

/// Runs the accept loop on an already-bound listener until `running` is set
/// to `false`.
///
/// Split from [`run_server`] so tests can bind port 0 and learn the real
/// address before serving.
///
/// # Errors
///
/// Currently always returns `Ok`; accept errors are logged and skipped.
pub async fn serve(
    listener: TcpListener,
    service: Arc<GameService>,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Stairword server listening on ws://{addr}");
    }

    loop {
        if !running.load(Ordering::Relaxed) {
            info!("shutdown flag set; stopping accept loop");
            break;
        }

        // A short timeout on `accept()` lets the loop notice the shutdown
        // flag even when nobody is connecting.
        match timeout(ACCEPT_POLL_INTERVAL, listener.accept()).await {
            Ok(Ok((stream, peer_addr))) => {
                info!("new browser connection from {peer_addr}");
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    handle_connection(stream, peer_addr, service).await;
                });
            }
            Ok(Err(e)) => {
                // Transient (e.g. too many open file descriptors); keep serving.
                error!("accept error: {e}");
            }
            Err(_) => {}
        }
    }

    Ok(())
}

// ── Per-connection handler ────────────────────────────────────────────────────

/// Wraps [`run_connection`] and logs how the connection ended.
async fn handle_connection(raw_stream: TcpStream, peer_addr: SocketAddr, service: Arc<GameService>) {
    match run_connection(raw_stream, peer_addr, service).await {
        Ok(()) => info!("connection {peer_addr} closed normally"),
        Err(e) => warn!("connection {peer_addr} closed with error: {e:#}"),
    }
}

/// Completes the WebSocket handshake and answers frames until the browser
/// disconnects.
async fn run_connection(
    raw_stream: TcpStream,
    peer_addr: SocketAddr,
    service: Arc<GameService>,
) -> anyhow::Result<()> {
    let ws_stream = accept_async_with_config(raw_stream, Some(websocket_config()))
        .await
        .with_context(|| format!("WebSocket handshake failed with {peer_addr}"))?;
    debug!("WebSocket session established: {peer_addr}");

    let (mut ws_tx, mut ws_rx) = ws_stream.split();
    let mut state = ConnectionState::new(&service);

    loop {
        let ws_msg = match ws_rx.next().await {
            Some(Ok(msg)) => msg,
            Some(Err(WsError::ConnectionClosed | WsError::Protocol(_))) => {
                debug!("connection {peer_addr}: WebSocket closed");
                break;
            }
            Some(Err(e)) => {
                return Err(e).context("WebSocket read failed");
            }
            None => {
                debug!("connection {peer_addr}: stream ended");
                break;
            }
        };

        let reply = match ws_msg {
            WsMessage::Text(text) => reply_to_text(&service, &mut state, &text, peer_addr).await,
            WsMessage::Binary(_) => {
                warn!("connection {peer_addr}: unexpected binary frame");
                binary_frame_reply()
            }
            WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_) => continue,
            WsMessage::Close(_) => {
                debug!("connection {peer_addr}: Close frame received");
                break;
            }
        };

        let json = serde_json::to_string(&reply).context("failed to serialize reply")?;
        ws_tx
            .send(WsMessage::Text(json))
            .await
            .context("WebSocket send failed")?;
    }

    Ok(())
}

/// Parses one text frame and produces its reply.  Frames that are not a
/// valid [`ClientMsg`] get an `Error` reply; the connection stays open.
async fn reply_to_text(
    service: &GameService,
    state: &mut ConnectionState,
    text: &str,
    peer_addr: SocketAddr,
) -> ServerMsg {
    match serde_json::from_str::<ClientMsg>(text) {
        Ok(msg) => handle_message(service, state, msg).await,
        Err(e) => {
            warn!("connection {peer_addr}: invalid JSON from browser: {e}");
            ServerMsg::Error {
                message: format!("invalid message: {e}"),
            }
        }
    }
}

/// Reply to a binary frame; the protocol is JSON text only.
fn binary_frame_reply() -> ServerMsg {
    ServerMsg::Error {
        message: "binary frames are not supported; send JSON text".to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
