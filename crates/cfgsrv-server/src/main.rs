//! Binary entrypoint for the cfgsrv HTTP server.
//!
//! Configuration comes from flags or environment variables (see
//! [`ServerConfig`]). On SIGINT/SIGTERM the server stops accepting
//! connections and drains in-flight requests; if draining takes longer than
//! the grace period it is stopped forcibly. The store is released on every
//! exit path when the application state is dropped.

use std::future::IntoFuture;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cfgsrv_server::config::ServerConfig;
use cfgsrv_server::router::build_router;
use cfgsrv_server::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            error!("{}", msg);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServerConfig) -> Result<(), String> {
    let addr = config
        .bind_addr()
        .map_err(|e| format!("invalid listen address: {}", e))?;

    let state = AppState::new(&config.db_path)
        .map_err(|e| format!("cannot open store at {}: {}", config.db_path, e))?;
    info!(db_path = %config.db_path, "store opened");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("failed to listen on {}: {}", addr, e))?;
    info!("cfgsrv listening on {}", addr);

    let app = build_router(state);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let mut drain_rx = shutdown_rx.clone();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = drain_rx.wait_for(|stop| *stop).await;
        })
        .into_future();

    let grace = config.shutdown_grace();
    let outcome = tokio::select! {
        res = server => res.map_err(|e| format!("server error: {}", e)),
        _ = force_stop_after(shutdown_rx, grace) => {
            warn!(
                grace_secs = grace.as_secs(),
                "server couldn't stop gracefully in time, forcing stop"
            );
            Ok(())
        }
    };

    // The router (and with it the store) is dropped with the server future.
    if outcome.is_ok() {
        info!("shutdown complete, store released");
    }
    outcome
}

/// Resolves `grace` after shutdown has been requested.
async fn force_stop_after(mut shutdown_rx: watch::Receiver<bool>, grace: Duration) {
    if shutdown_rx.wait_for(|stop| *stop).await.is_err() {
        // Sender gone without a signal: never force.
        std::future::pending::<()>().await;
    }
    tokio::time::sleep(grace).await;
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
