//! Model Context Protocol (MCP) server implementation for the HollaEx provider
//!
//! The rmcp `ServerHandler` used by the stdio transport. Tool listing and
//! invocation are served straight from the shared [`ToolRegistry`].
//!
//! [`ToolRegistry`]: crate::tools::ToolRegistry

pub mod handler;
pub mod server;

// Re-exports
pub use server::ExchangeServer;
