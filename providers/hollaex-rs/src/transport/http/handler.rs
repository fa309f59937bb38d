//! HTTP request handlers for MCP JSON-RPC endpoints
//!
//! Implements handlers for:
//! - POST /mcp: Main JSON-RPC endpoint
//!   - initialize: Server info and capabilities
//!   - notifications/*: Acknowledged without a body
//!   - ping
//!   - tools/list: List all available tools
//!   - tools/call: Execute a tool
//! - GET /health, GET /healthz: Liveness

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use super::error::{HttpTransportError, Result};
use super::jsonrpc::{InitializeResult, JsonRpcRequest, JsonRpcResponse};
use super::session::RequestSession;
use crate::error::ToolError;
use crate::tools::ToolRegistry;

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    pub registry: Arc<ToolRegistry>,
}

/// Main JSON-RPC endpoint handler
///
/// POST /mcp
/// Content-Type: application/json
///
/// The body is taken as raw bytes so that an unreadable envelope still gets
/// a JSON-RPC shaped answer instead of axum's plain-text rejection.
pub async fn handle_jsonrpc(State(state): State<AppState>, body: Bytes) -> Response {
    let mut session = RequestSession::open();

    let request = match JsonRpcRequest::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(session_id = %session.session_id, "Rejected JSON-RPC envelope: {}", err);
            session.complete();
            return HttpTransportError::from(err).into_response();
        }
    };

    session.set_method(&request.method);
    tracing::debug!(
        session_id = %session.session_id,
        method = %request.method,
        "Received JSON-RPC request"
    );

    // Notifications never get a JSON-RPC response
    if request.method.starts_with("notifications/") || request.is_notification() {
        session.complete();
        return StatusCode::ACCEPTED.into_response();
    }

    let id = request.response_id();
    let response = match route(&state, request).await {
        Ok(result) => (StatusCode::OK, Json(JsonRpcResponse::success(result, id))).into_response(),
        Err(err) => err.into_response_with_id(id),
    };

    session.complete();
    response
}

async fn route(state: &AppState, request: JsonRpcRequest) -> Result<Value> {
    match request.method.as_str() {
        "initialize" => handle_initialize(),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(handle_tools_list(state)),
        "tools/call" => handle_tools_call(state, request.params).await,
        other => Err(HttpTransportError::MethodNotFound(other.to_string())),
    }
}

/// Handle initialize method
fn handle_initialize() -> Result<Value> {
    serde_json::to_value(InitializeResult::for_server())
        .map_err(|e| HttpTransportError::Tool(ToolError::Internal(e.to_string())))
}

/// Handle tools/list method
fn handle_tools_list(state: &AppState) -> Value {
    let tools: Vec<Value> = state
        .registry
        .definitions()
        .iter()
        .map(|tool| tool.listing())
        .collect();

    json!({ "tools": tools })
}

/// Handle tools/call method
///
/// `{name, arguments}` go straight to the registry; its errors keep their
/// own JSON-RPC codes.
async fn handle_tools_call(state: &AppState, params: Option<Value>) -> Result<Value> {
    let params = params
        .ok_or_else(|| HttpTransportError::InvalidParams("Missing params".to_string()))?;

    let tool_name = params
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| HttpTransportError::InvalidParams("Missing tool name".to_string()))?;

    let arguments = match params.get("arguments") {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map.clone()),
        Some(_) => {
            return Err(HttpTransportError::InvalidParams(
                "arguments must be an object".to_string(),
            ))
        }
    };

    let output = state.registry.invoke(tool_name, arguments).await?;
    Ok(output.to_call_result())
}

/// Liveness check; never touches the registry or credentials
pub async fn handle_health() -> Json<Value> {
    Json(json!({ "ok": true }))
}
