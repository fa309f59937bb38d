//! HTTP transport for MCP using Axum
//!
//! Stateless JSON-RPC 2.0 over `POST /mcp`. Each request gets its own
//! [`session::RequestSession`] and its own exchange delegate; nothing is
//! shared between requests except the read-only tool registry.

pub mod error;
pub mod handler;
pub mod jsonrpc;
pub mod session;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::tools::ToolRegistry;
use handler::{handle_health, handle_jsonrpc, AppState};

/// Builds the router without binding, so tests can drive it in-process
///
/// # Endpoints
/// - POST /mcp: JSON-RPC 2.0 endpoint
/// - GET /health, GET /healthz: liveness
///
/// # CORS
/// Configured to allow all origins (*).
pub fn build_router(registry: Arc<ToolRegistry>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/mcp", post(handle_jsonrpc))
        .route("/health", get(handle_health))
        .route("/healthz", get(handle_health))
        .layer(cors)
        .with_state(AppState { registry })
}

/// Start HTTP server with MCP JSON-RPC endpoint
///
/// `host` may be an IP literal or a name such as `localhost`. Returns an
/// error if the address cannot be bound; otherwise runs until Ctrl+C.
pub async fn start_http_server(
    host: &str,
    port: u16,
    registry: Arc<ToolRegistry>,
) -> anyhow::Result<()> {
    tracing::info!("Initializing HTTP MCP server...");

    let tool_count = registry.definitions().len();
    let app = build_router(registry);

    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}:{}: {}", host, port, e))?;
    let addr = listener.local_addr()?;

    tracing::info!("HTTP MCP server listening on {}", addr);
    tracing::info!("Endpoint: POST http://{}/mcp", addr);
    tracing::info!("  - {} tools (account, orders, market data, quick trade)", tool_count);

    // Create graceful shutdown handler
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    // Spawn shutdown signal handler
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Received shutdown signal (Ctrl+C)");
                let _ = shutdown_tx.send(());
            }
            Err(err) => {
                tracing::error!("Failed to listen for shutdown signal: {}", err);
            }
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_rx.await.ok();
            tracing::info!("Shutting down HTTP server...");
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
