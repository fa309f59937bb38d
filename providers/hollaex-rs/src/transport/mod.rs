//! MCP transport layer
//!
//! - Stdio: Standard I/O for local connections, served by rmcp
//! - HTTP: JSON-RPC 2.0 over HTTP (axum)
//!
//! Both transports share one [`ToolRegistry`](crate::tools::ToolRegistry).

#[cfg(feature = "http_transport")]
pub mod http;

#[cfg(feature = "mcp_server")]
pub mod stdio;
