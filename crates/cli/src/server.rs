//! # CLI Server
//!
//! Server startup and management for the orgtree CLI.

use std::net::SocketAddr;

use anyhow::anyhow;
use error::{Result, ResultExt as _};
use migration::{Migrator, MigratorTrait as _};
use server::{router::create_app_router, AppState};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    commands::ServeArgs,
    config::{parse_socket_addr, AppConfig},
};

/// Starts the API server
///
/// Connects to the database, applies pending migrations, and serves HTTP
/// until Ctrl+C or SIGTERM.
pub async fn serve(config: &AppConfig, args: &ServeArgs) -> Result<()> {
    info!(target: "serve", "Starting API server...");

    let address = parse_socket_addr(&args.host, args.port)
        .map_err(|e| anyhow!("Invalid address {}:{}: {}", args.host, args.port, e))?;

    info!(target: "serve", "Connecting to database...");
    let db = config.database.connect().await?;

    info!(target: "serve", "Running database migrations...");
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;
    info!(
        target: "serve",
        "Database migrations completed successfully"
    );

    let state = AppState::new(db, config.settings);
    info!(
        target: "serve",
        max_tree_depth = state.settings.max_tree_depth,
        request_timeout_secs = state.settings.request_timeout.as_secs(),
        "Server settings loaded"
    );

    serve_http(create_app_router(state), &address).await
}

/// Serves the application over plain HTTP
async fn serve_http(app: axum::Router, address: &SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(address)
        .await
        .context(format!("Failed to bind to {}", address))?;

    info!(target: "serve", %address, "Starting HTTP server...");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow!("HTTP server error: {}", e))?;

    info!(target: "serve", "Server stopped");
    Ok(())
}

/// Waits for shutdown signals (Ctrl+C or SIGTERM)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                warn!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(target: "serve", "Received shutdown signal");
}
