//! Stdio Transport for MCP Server
//!
//! Provides standard I/O transport for local MCP connections (e.g., Claude Desktop).

use std::sync::Arc;

use crate::mcp::ExchangeServer;
use crate::tools::ToolRegistry;
use rmcp::ServiceExt;

/// Runs the MCP server with stdio transport
///
/// Messages are read from stdin and responses are written to stdout.
/// Logging is sent to stderr to avoid interfering with the MCP protocol.
///
/// # Returns
///
/// Returns Ok(()) when the client disconnects, or an error if initialization fails.
pub async fn run_stdio_server(registry: Arc<ToolRegistry>) -> anyhow::Result<()> {
    tracing::info!("Starting HollaEx MCP server in stdio mode");

    let server = ExchangeServer::new(registry);

    // Run server with stdio transport
    let service = server.serve(rmcp::transport::stdio()).await?;

    tracing::info!("MCP server ready on stdio");

    // Wait for shutdown signal
    service.waiting().await?;

    tracing::info!("MCP server shutdown complete");

    Ok(())
}
