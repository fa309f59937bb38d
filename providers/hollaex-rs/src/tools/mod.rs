//! MCP Tool Catalog
//!
//! Every exchange operation exposed to clients is declared here as a
//! [`ToolDefinition`] and dispatched through the [`ToolRegistry`].

pub mod account;
pub mod definition;
pub mod market;
pub mod orders;
pub mod params;
pub mod quick_trade;
pub mod registry;
pub mod schema;

pub use definition::{Access, Params, ToolDefinition, ToolOutput};
pub use registry::ToolRegistry;
pub use schema::{ToolSchema, Violation};
