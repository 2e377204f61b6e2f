//! Stairword game server entry point.
//!
//! Serves today's puzzle, checks and scores chains, and stores shared
//! results for browser clients speaking JSON over WebSocket.
//!
//! # Usage
//!
//! ```text
//! stairword-server [OPTIONS]
//!
//! Options:
//!   --bind   <IP>    Address to listen on [default: 0.0.0.0]
//!   --port   <PORT>  WebSocket listener port [default: 24900]
//!   --config <PATH>  TOML config file (optional)
//! ```
//!
//! # Environment variable overrides
//!
//! CLI args take precedence when both are present.
//!
//! | Variable           | Default   | Description             |
//! |--------------------|-----------|-------------------------|
//! | `STAIRWORD_BIND`   | `0.0.0.0` | Listen address          |
//! | `STAIRWORD_PORT`   | `24900`   | WebSocket listener port |
//! | `STAIRWORD_CONFIG` | (none)    | TOML config file        |
//! | `RUST_LOG`         | `info`    | `tracing` filter        |
//!
//! Settings are layered: built-in defaults, then the config file, then the
//! listen address from the command line.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stairword_server::domain::ServerConfig;
use stairword_server::infrastructure::{build_game_service, load_config_file, run_server};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Stairword daily word-chain puzzle server.
#[derive(Debug, Parser)]
#[command(
    name = "stairword-server",
    about = "JSON-over-WebSocket server for the Stairword daily puzzle",
    version
)]
struct Cli {
    /// IP address to bind the WebSocket server to.
    ///
    /// Use `0.0.0.0` to accept connections on every interface, or
    /// `127.0.0.1` for local connections only.
    #[arg(long, default_value = "0.0.0.0", env = "STAIRWORD_BIND")]
    bind: String,

    /// TCP port for the WebSocket server to listen on.
    #[arg(long, default_value_t = 24900, env = "STAIRWORD_PORT")]
    port: u16,

    /// Path to a TOML config file.  Without it, built-in defaults are used.
    #[arg(long, env = "STAIRWORD_CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Builds the [`ServerConfig`] from defaults, the config file, and the
    /// listen address.
    ///
    /// # Errors
    ///
    /// Returns an error if `--bind` is not an IP address or the config file
    /// cannot be loaded.
    fn into_server_config(self) -> anyhow::Result<ServerConfig> {
        let mut config = ServerConfig::default();

        if let Some(path) = &self.config {
            let file = load_config_file(path)
                .with_context(|| format!("failed to load config file {}", path.display()))?;
            file.apply_to(&mut config)
                .with_context(|| format!("invalid config file {}", path.display()))?;
        }

        let ip: IpAddr = self
            .bind
            .parse()
            .with_context(|| format!("invalid bind address: '{}'", self.bind))?;
        config.bind_addr = SocketAddr::new(ip, self.port);

        Ok(config)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// # What happens at startup
///
/// 1. CLI arguments are parsed and the [`ServerConfig`] is assembled.
/// 2. `tracing_subscriber` is initialised.  `RUST_LOG` wins; otherwise the
///    config's `log_level` is used.
/// 3. The word files are loaded and the game service is built.
/// 4. A Ctrl+C handler is spawned; it clears a shared `AtomicBool`.
/// 5. [`run_server`] accepts connections until the flag is cleared.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.into_server_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!(
        "Stairword server starting: bind={}, chain_length={}, scoring={:?}",
        config.bind_addr, config.rules.chain_length, config.rules.policy
    );

    let service = Arc::new(build_game_service(&config)?);
    let puzzle = service.todays_puzzle();
    info!(
        "today is puzzle #{}: {} → {}",
        puzzle.number, puzzle.start_word, puzzle.end_word
    );

    // ── Graceful shutdown flag ─────────────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C; initiating graceful shutdown");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    run_server(config.bind_addr, service, running).await?;

    info!("Stairword server stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
