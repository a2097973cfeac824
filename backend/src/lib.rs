//! Chess move service
//!
//! HTTP front end over the chess engine: resolves AI moves through a tiered
//! pipeline (cache, opening book, remote advisor, search) and forwards
//! finished games to a result ledger.

pub mod ai;
pub mod api;
pub mod config;
pub mod error;
pub mod ledger;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::ai::MoveOrchestrator;
use crate::api::AppState;
use crate::config::ServiceConfig;

pub use error::{AdvisorError, ConfigError, ResolveError, ResolveResult};

/// Install the fmt subscriber, honouring `RUST_LOG` (default `info`)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second call (tests, embedding binaries) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Application state built from configuration
pub fn app_state(config: &ServiceConfig) -> AppState {
    AppState::new(
        MoveOrchestrator::from_config(config),
        ledger::ledger_for(config.ledger_url.as_deref()),
    )
}

/// Run the HTTP service until the process is stopped
pub async fn serve(config: ServiceConfig) -> anyhow::Result<()> {
    let app = api::router(app_state(&config));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("[API] Listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("HTTP server error")
}
