// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pulso serve` command implementation.
//!
//! Wires the SQLite event store, the insertion-notification bus, and the
//! webhook HTTP server together, then serves until SIGINT/SIGTERM.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use pulso_bus::EventBus;
use pulso_config::model::PulsoConfig;
use pulso_core::{EventStore, PulsoError};
use pulso_storage::SqliteEventStore;
use pulso_webhook::{ServerConfig, WebhookState};

/// Runs the `pulso serve` command.
///
/// Startup order: storage (with migrations) first, then the HTTP surface.
/// Shutdown drains the opposite way: the server stops accepting requests,
/// then the store checkpoints its WAL.
pub async fn run_serve(config: PulsoConfig) -> Result<(), PulsoError> {
    init_tracing(&config.service.log_level);

    info!("starting pulso serve");

    let bus = EventBus::default();

    let store = SqliteEventStore::new(config.storage.clone(), bus.clone());
    store.initialize().await?;
    let store = Arc::new(store);
    info!(path = %config.storage.database_path, "event store ready");

    let state = WebhookState {
        store: Arc::clone(&store) as Arc<dyn EventStore>,
        bus,
        started_at: std::time::Instant::now(),
    };

    let cancel = install_signal_handler();

    // Informational only: where external automations should point their
    // webhook. The server binds to host/port regardless.
    info!("webhook endpoint: {}", webhook_url(&config));

    let server_config = ServerConfig {
        host: config.webhook.host.clone(),
        port: config.webhook.port,
    };
    pulso_webhook::start_server(&server_config, state, cancel).await?;

    store.close().await?;
    info!("pulso serve shutdown complete");
    Ok(())
}

/// The externally visible webhook address.
///
/// Prefers `service.public_base_url` (reverse proxy, tunnel); falls back
/// to the bind address.
pub fn webhook_url(config: &PulsoConfig) -> String {
    let base = match &config.service.public_base_url {
        Some(url) => url.trim_end_matches('/').to_string(),
        None => format!("http://{}:{}", config.webhook.host, config.webhook.port),
    };
    format!("{base}/v1/interactions")
}

/// Installs signal handlers for SIGTERM and SIGINT.
///
/// Returns a [`CancellationToken`] that is cancelled when either signal is
/// received. The handler task runs in the background until then.
fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm =
                signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");

            tokio::select! {
                _ = ctrl_c => {
                    info!("received SIGINT (Ctrl+C), initiating shutdown");
                }
                _ = sigterm.recv() => {
                    info!("received SIGTERM, initiating shutdown");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            info!("received Ctrl+C, initiating shutdown");
        }

        token_clone.cancel();
        debug!("shutdown signal handler completed");
    });

    token
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pulso={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
