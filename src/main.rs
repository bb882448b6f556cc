//! Memo Server - A concurrent line-oriented request server
//!
//! Serves the line protocol and the admin HTTP API from one shared
//! request processor.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memo_server::api::create_router;
use memo_server::{
    spawn_cleanup_task, AppState, Config, LineServer, RequestProcessor, UppercaseCompute,
};

/// Main entry point for the memo server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Build the shared request processor (cache + admission gate)
/// 4. Start the background expiry sweep
/// 5. Start the admin HTTP API
/// 6. Run the line server until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memo_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Memo Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_capacity={}, cache_ttl={}ms, concurrency_limit={}, port={}, admin_port={}, cleanup_interval={}s",
        config.cache_capacity,
        config.cache_ttl_ms,
        config.concurrency_limit,
        config.server_port,
        config.admin_port,
        config.cleanup_interval
    );

    let compute = Arc::new(UppercaseCompute::new(config.processing_delay()));
    let processor =
        RequestProcessor::from_config(&config, compute).context("Invalid configuration")?;
    info!("Request processor initialized");

    let cleanup_handle = spawn_cleanup_task(
        processor.cache(),
        Duration::from_secs(config.cleanup_interval),
    );

    // Admin API
    let admin_addr = SocketAddr::from(([0, 0, 0, 0], config.admin_port));
    let admin_listener = tokio::net::TcpListener::bind(admin_addr)
        .await
        .with_context(|| format!("Failed to bind admin port {}", admin_addr))?;
    let app = create_router(AppState::new(processor.clone()));
    let admin_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(admin_listener, app).await {
            warn!("Admin API stopped: {}", e);
        }
    });
    info!("Admin API listening on http://{}", admin_addr);

    // Line protocol
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let server = LineServer::bind(addr, processor.clone())
        .await
        .with_context(|| format!("Failed to bind server port {}", addr))?;
    info!("Server is listening on {}", addr);

    server.run(shutdown_signal()).await;

    processor.admission().close();
    admin_handle.abort();
    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
