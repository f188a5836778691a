// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! fxd - focus relay daemon
//!
//! Hosts the HTTP gate and the background queue drainer over a shared
//! durable store.

use std::sync::Arc;

use fx_adapters::{BridgeClient, TracedStatusClient};
use fx_core::{Drainer, DrainerConfig, LockStore, MonotonicIdGen, PendingQueue, RequestGate};
use fx_daemon::server::{router, AppState};
use fx_daemon::Config;
use fx_store::FileKvStore;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

/// Concrete upstream client used in production (wrapped with tracing)
type DaemonClient = TracedStatusClient<BridgeClient>;

const LOCK_KEY: &str = "locked";
const QUEUE_PREFIX: &str = "queue/";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging();

    let config = Config::from_env()?;
    info!(
        bind = %config.bind,
        state_dir = %config.state_dir.display(),
        bridge = %config.bridge_url,
        auth = config.auth_token.is_some(),
        "starting fxd"
    );

    let store: Arc<FileKvStore> = Arc::new(FileKvStore::open(&config.state_dir)?);
    let lock = LockStore::new(store.clone(), LOCK_KEY);
    let queue = PendingQueue::new(store, QUEUE_PREFIX, MonotonicIdGen::new());
    let client: Arc<DaemonClient> = Arc::new(TracedStatusClient::new(BridgeClient::new(
        &config.bridge_url,
    )));

    let gate = RequestGate::new(lock.clone(), queue.clone(), client.clone());
    let drainer = Drainer::new(
        lock,
        queue,
        client,
        DrainerConfig {
            poll_interval: config.poll_interval,
            retry_backoff: config.retry_backoff,
        },
    );

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let drainer_handle = tokio::spawn(async move {
        drainer.run(shutdown_rx).await;
    });

    let app = router(AppState { gate }, config.auth_token.clone());
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(addr = %config.bind, "daemon ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutting down");
    shutdown_tx.send(true).ok();
    if let Err(e) = drainer_handle.await {
        error!(error = %e, "drainer task failed");
    }

    info!("daemon stopped");
    Ok(())
}

/// Resolve on SIGTERM or SIGINT
async fn shutdown_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "failed to install SIGTERM handler");
            return;
        }
    };
    let mut sigint = match signal(SignalKind::interrupt()) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "failed to install SIGINT handler");
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM"),
        _ = sigint.recv() => info!("received SIGINT"),
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}
