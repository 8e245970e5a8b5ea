//! CORS-injecting rewriting forwarder.
//!
//! A small reverse-proxy edge service built with Tokio and Axum.
//!
//! # Request Flow
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                 EDGE PROXY                    │
//!                    │                                               │
//!   Client Request   │  ┌────────┐   ┌─────────┐   ┌────────────┐  │
//!   ─────────────────┼─▶│  http  │──▶│ rewrite │──▶│ forwarder  │──┼──▶ Upstream
//!                    │  │ server │   │ policy  │   │ (reqwest)  │  │     API
//!                    │  └────┬───┘   └─────────┘   └─────┬──────┘  │
//!                    │       │ OPTIONS                    │         │
//!                    │       ▼                            ▼         │
//!   Client Response  │  ┌────────┐                  ┌──────────┐   │
//!   ◀────────────────┼──│  cors  │◀─────────────────│ response │   │
//!                    │  │ inject │                  │  relay   │   │
//!                    │  └────────┘                  └──────────┘   │
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! The rewrite policy is fixed at startup: either a fixed base URL that
//! replaces the inbound host entirely, or a hostname-to-hostname origin
//! map with pass-through for unmapped hosts.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use edge_proxy::config::{loader::load_config, ProxyConfig};
use edge_proxy::http::HttpServer;
use edge_proxy::lifecycle::Shutdown;
use edge_proxy::observability::logging::init_logging;

/// CORS-injecting rewriting forwarder.
#[derive(Parser, Debug)]
#[command(name = "edge-proxy", version, about)]
struct Args {
    /// Path to a TOML configuration file. Built-in defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    init_logging(&config.observability);

    tracing::info!("edge-proxy v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        policy = config.upstream.mode_name(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
