//! Passledger Node — entry point.
//!
//! Serves the passport registry over HTTP with configuration from a TOML
//! file or defaults, persisting committed passports to RocksDB.

// Public APIs for node internals; some are exercised only by tests.
#![allow(dead_code)]

mod api;
mod config;
mod state;
mod storage;

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use config::PassledgerConfig;
use state::AppState;
use storage::Storage;

/// Passledger Node
#[derive(Parser, Debug)]
#[command(name = "passledger-node", version, about = "Passledger passport registry node")]
struct Args {
    /// Path to the configuration file (TOML).
    #[arg(short, long, default_value = "passledger.toml")]
    config: PathBuf,

    /// Override the API port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the data directory.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Generate a default config file and exit.
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Handle --init flag before anything else
    if args.init {
        let config = PassledgerConfig::default();
        config.save(&args.config)?;
        println!("wrote default config to {}", args.config.display());
        return Ok(());
    }

    // Load configuration
    let mut config = PassledgerConfig::load(&args.config)?;

    // Apply CLI overrides
    if let Some(api_port) = args.api_port {
        config.api.port = api_port;
    }
    if let Some(ref data_dir) = args.data_dir {
        config.storage.data_dir = data_dir.clone();
    }
    config.logging.level = args.log_level;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    if config.logging.format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    tracing::info!("Passledger Node v{}", env!("CARGO_PKG_VERSION"));

    let storage = Storage::open(&config.storage.data_dir)?;
    let state = Arc::new(AppState::new(storage)?);
    tracing::info!(
        passports = state.registry.passport_count(),
        data_dir = %config.storage.data_dir.display(),
        "registry ready"
    );

    let listen_addr: SocketAddr = config.api_addr().parse()?;
    api::start_api_server(listen_addr, state).await?;

    tracing::info!("Passledger node exited cleanly");
    Ok(())
}
