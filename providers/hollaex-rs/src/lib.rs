// Library exports for hollaex-provider

pub mod error;

pub mod config; // Configuration management
pub mod hollaex; // HollaEx API client
pub mod tools; // Tool catalog and registry

#[cfg(feature = "mcp_server")]
pub mod mcp; // MCP server implementation (stdio)

pub mod transport; // MCP transport layer (stdio, HTTP)

/// Name reported in `initialize`
pub const SERVER_NAME: &str = "hollaex-provider";

pub const SERVER_TITLE: &str = "HollaEx MCP Provider";

pub const SERVER_INSTRUCTIONS: &str = "HollaEx MCP Provider for trading and market data. \
    Market data tools work without credentials; account, order and quick trade tools \
    need HOLLAEX_API_KEY and HOLLAEX_API_SECRET.";
