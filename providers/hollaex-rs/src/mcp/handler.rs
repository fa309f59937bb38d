//! ServerHandler Implementation
//!
//! Tools are declared at runtime by the registry, so listing and dispatch
//! are implemented by hand instead of through the rmcp tool macros.

use std::sync::Arc;

use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ErrorCode, ErrorData, Implementation,
    InitializeResult, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
    ServerCapabilities, Tool, ToolsCapability,
};
use rmcp::service::{RequestContext, RoleServer};

use crate::error::ToolError;
use crate::mcp::server::ExchangeServer;
use crate::tools::{ToolDefinition, ToolOutput};

/// Converts a tool definition into the rmcp listing model
pub fn to_tool(definition: &ToolDefinition) -> Tool {
    let mut tool = Tool::new(
        definition.name,
        definition.description,
        Arc::new(definition.input_schema_object()),
    );
    tool.title = Some(definition.title.to_string());
    tool.output_schema = definition.output_schema_object().map(Arc::new);
    tool
}

/// Success envelope: summary as text content, payload as structured content
pub fn to_call_result(output: ToolOutput) -> CallToolResult {
    let mut result = CallToolResult::success(vec![Content::text(output.summary)]);
    result.structured_content = Some(output.payload);
    result
}

/// Failure envelope with the registry's JSON-RPC code
pub fn to_error_data(err: &ToolError) -> ErrorData {
    ErrorData::new(ErrorCode(err.code()), err.to_string(), err.data())
}

impl ServerHandler for ExchangeServer {
    /// Returns server information and capabilities
    ///
    /// This is called during MCP initialization to communicate server metadata
    /// and supported features to the client.
    fn get_info(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: crate::SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some(crate::SERVER_TITLE.to_string()),
                website_url: None,
                icons: None,
            },
            instructions: Some(crate::SERVER_INSTRUCTIONS.to_string()),
        }
    }

    async fn list_tools(
        &self,
        _params: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: self.registry.definitions().iter().map(to_tool).collect(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        params: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.registry
            .invoke(&params.name, params.arguments)
            .await
            .map(to_call_result)
            .map_err(|e| to_error_data(&e))
    }
}
