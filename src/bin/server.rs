//! Standalone API server (without Dioxus frontend)
//! Use this for API-only testing or driving NeuronBox from another front end.
//!
//! Run with: cargo run --bin server --features server -- --port 52014

use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use neuronbox::config::{load_config, load_default_config};
use neuronbox::domain::ROUTE_TABLE;
use neuronbox::handlers::{api_router, AppState};
use neuronbox::shared::logging::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "neuronbox-server", version, about = "NeuronBox model and transcription API")]
struct Args {
    /// Configuration file (defaults to $NEURONBOX_CONFIG, then the data directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on, overriding the configured bind address
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    ROUTE_TABLE.validate().context("Invalid route table")?;

    let config = match &args.config {
        Some(path) => load_config(path),
        None => load_default_config(),
    }
    .context("Failed to load configuration")?;

    let mut addr: SocketAddr = config.bind;
    if let Some(port) = args.port {
        addr.set_port(port);
    }

    let state = Arc::new(AppState::new(config).context("Failed to initialize state")?);
    AppState::install(state.clone());

    tracing::info!("Starting NeuronBox API server (standalone)...");
    let app = api_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
