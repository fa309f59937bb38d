//! MCP Server Implementation
//!
//! This module contains the ExchangeServer struct which implements the MCP ServerHandler trait.

use std::sync::Arc;

use crate::tools::ToolRegistry;

/// Main HollaEx MCP Server struct
///
/// Cheap to clone; every clone shares the same registry.
#[derive(Clone, Debug)]
pub struct ExchangeServer {
    pub registry: Arc<ToolRegistry>,
}

impl ExchangeServer {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }
}
