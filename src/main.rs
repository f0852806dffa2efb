//! Task API server.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `postgres` (default) | `in_memory`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 15)
//! - `RUN_MIGRATIONS`: apply embedded migrations at startup (default: false)
//! - `JWT_SECRET`: shared HS256 secret (required)
//! - `JWT_ISSUER`: expected token issuer (optional)
//! - `CORS_ORIGINS`: comma-separated allowed origins (optional)
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `8000`)
//! - `RUST_LOG`: Logging filter (default: `info,taskdesk=debug,tower_http=debug`)
//! - `LOG_FORMAT`: `pretty` (default) | `json`

use tokio::net::TcpListener;
use tokio::signal;

use taskdesk::api::{AppState, create_router};
use taskdesk::infrastructure::{AppConfig, RepositoryFactory};
use taskdesk::telemetry::{self, LogFormat};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    telemetry::init(LogFormat::from_env());

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting task API");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "Configuration error");
            std::process::exit(1);
        }
    };

    tracing::info!(
        storage_mode = ?config.storage.mode,
        cors_origins = config.cors_origins.len(),
        issuer = config.jwt_issuer.as_deref().unwrap_or("<any>"),
        "Configuration loaded"
    );

    let factory = RepositoryFactory::new(config.storage.clone());
    let repository = match factory.create().await {
        Ok(repository) => repository,
        Err(error) => {
            tracing::error!(%error, "Failed to initialize task storage");
            std::process::exit(1);
        }
    };

    let state = AppState::from_config(repository, &config);
    let application = create_router(state, &config.cors_origins);

    let bind_address = config.bind_address();
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, address = %bind_address, "Failed to bind");
            std::process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(address) => tracing::info!("Listening on {}", address),
        Err(error) => tracing::warn!(%error, "Could not determine local address"),
    }

    if let Err(error) = axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%error, "Server error");
        std::process::exit(1);
    }

    tracing::info!("Server shutdown complete");
}

/// Completes when SIGINT or (on Unix) SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
