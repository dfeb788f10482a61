//! QuickSearch service.
//!
//! Short URL paths that redirect to search engines, plus a few lookups
//! answered directly.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                   QUICKSEARCH                     │
//!                    │                                                   │
//!   Client Request   │  ┌─────────┐   ┌──────────────┐   ┌────────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│   handlers   │──▶│ resolvers  │  │
//!                    │  │ server  │   │ (per module) │   │            │  │
//!                    │  └─────────┘   └──────┬───────┘   │ oui        │──┼──▶ OUI file
//!                    │                       │           │ canonical  │  │
//!   Client Response  │                       │           │ intel      │──┼──▶ DNS
//!   ◀────────────────┼───────────────────────┘           │ journey    │──┼──▶ journey API
//!   (text / 303)     │                                   │ search     │  │
//!                    │                                   └────────────┘  │
//!                    │  ┌─────────────────────────────────────────────┐  │
//!                    │  │ config │ lifecycle │ observability           │  │
//!                    │  └─────────────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use quicksearch::config::{load_config, QuickSearchConfig};
use quicksearch::observability::{init_logging, init_metrics};
use quicksearch::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "quicksearch")]
#[command(about = "URL shortcut and lookup service", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file; built-in defaults when absent.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => QuickSearchConfig::default(),
    };

    init_logging(&config.observability);
    tracing::info!("quicksearch v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config = ?cli.config,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let stopped = shutdown.subscribe();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Cannot listen for Ctrl+C");
            return;
        }
        tracing::info!("Shutdown signal received");
        signal.trigger();
    });

    HttpServer::new(config).run(listener, stopped).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
