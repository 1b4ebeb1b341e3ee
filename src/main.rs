//! Kronium admin console - HTTP server entry point

use anyhow::{Context, anyhow};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::{net::TcpListener, signal};
use tokio_util::sync::CancellationToken;

use kronium::{Config, create_app, init_tracing};
use kronium_core::config::Validate;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install the rustls crypto provider before the S3 client opens any TLS connection
    let _ = rustls::crypto::ring::default_provider().install_default();

    run_server().await
}

async fn run_server() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let config = Config::load()
        .context("Failed to load configuration. Check DATABASE_URL and KRONIUM__* env vars")?;

    config
        .validate()
        .context("Configuration validation failed")?;

    init_tracing(&config.logging).map_err(|e| anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::info!("Starting Kronium admin console...");
    tracing::info!(
        "Configuration loaded: server={}:{}",
        config.server.host,
        config.server.port
    );

    let server_host = config.server.host.clone();
    let server_port = config.server.port;
    let enable_docs = config.server.enable_docs;
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_seconds);

    let app_handle = create_app(config)
        .await
        .map_err(|e| anyhow!("Failed to create application: {}", e))?;

    let addr = SocketAddr::new(
        server_host
            .parse()
            .with_context(|| format!("Invalid server.host '{}'", server_host))?,
        server_port,
    );

    tracing::info!("Server listening on {}", addr);
    if enable_docs {
        tracing::info!("API documentation available at http://{}/docs", addr);
    } else {
        tracing::info!("API documentation disabled");
    }

    let shutdown_token = app_handle.shutdown_token;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    let server = axum::serve(listener, app_handle.router)
        .with_graceful_shutdown(shutdown_signal(shutdown_token.clone()))
        .into_future();

    // Connections still open after the grace period are dropped
    let grace_period = async {
        shutdown_token.cancelled().await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    tokio::select! {
        result = server => result?,
        _ = grace_period => {
            tracing::warn!(
                timeout_secs = shutdown_timeout.as_secs(),
                "Graceful shutdown timed out; closing remaining connections"
            );
        }
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM and cancel the shutdown token
async fn shutdown_signal(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        },
    }

    shutdown_token.cancel();
}
