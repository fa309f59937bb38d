//! JSON-RPC 2.0 message structures for the MCP HTTP transport
//!
//! Implements JSON-RPC 2.0 specification:
//! - Request: { jsonrpc: "2.0", method, params, id }
//! - Response: { jsonrpc: "2.0", result, id } OR { jsonrpc: "2.0", error, id }
//! - Notification: { jsonrpc: "2.0", method, params } (no id)

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// MCP revision advertised in `initialize`
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC 2.0 request message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,

    /// Method name (e.g., "initialize", "tools/list", "tools/call")
    pub method: String,

    /// Method parameters (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,

    /// Request ID (optional for notifications)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

impl JsonRpcRequest {
    /// Create a new JSON-RPC request
    pub fn new(method: impl Into<String>, params: Option<Value>, id: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id,
        }
    }

    /// Parses a raw POST body into a request envelope
    ///
    /// Anything that is not a single JSON-RPC 2.0 request object is rejected.
    pub fn from_slice(body: &[u8]) -> Result<Self, EnvelopeError> {
        let request: JsonRpcRequest = serde_json::from_slice(body)?;
        if request.jsonrpc != JSONRPC_VERSION {
            return Err(EnvelopeError::Version(request.jsonrpc));
        }
        if request.method.is_empty() {
            return Err(EnvelopeError::EmptyMethod);
        }
        Ok(request)
    }

    /// Check if this is a notification (no id)
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Id to echo back; notifications and malformed ids answer with `null`
    pub fn response_id(&self) -> Value {
        self.id.clone().unwrap_or(Value::Null)
    }
}

/// Why a POST body is not a usable JSON-RPC request
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("malformed JSON-RPC envelope: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported JSON-RPC version {0:?}")]
    Version(String),

    #[error("empty method name")]
    EmptyMethod,
}

/// JSON-RPC 2.0 response message (success)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,

    /// Result value (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error object (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,

    /// Request ID (matches request, or null)
    pub id: Value,
}

impl JsonRpcResponse {
    /// Create a successful response
    pub fn success(result: Value, id: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Create an error response
    pub fn error(error: JsonRpcError, id: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code (integer)
    pub code: i32,

    /// Error message (string)
    pub message: String,

    /// Additional error data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    /// Create a new JSON-RPC error
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Create error with additional data
    pub fn with_data(code: i32, message: impl Into<String>, data: Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    // Standard JSON-RPC 2.0 error codes
    pub fn method_not_found() -> Self {
        Self::new(-32601, "Method not found")
    }

    pub fn internal_error() -> Self {
        Self::new(-32603, "Internal error")
    }

    /// Error object for a failed tool call
    pub fn from_tool_error(err: &crate::error::ToolError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
            data: err.data(),
        }
    }
}

/// MCP initialization result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    /// Protocol version
    pub protocol_version: String,

    /// Server capabilities
    pub capabilities: ServerCapabilities,

    /// Server information
    pub server_info: ServerInfo,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl InitializeResult {
    pub fn for_server() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: crate::SERVER_NAME.to_string(),
                title: Some(crate::SERVER_TITLE.to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(crate::SERVER_INSTRUCTIONS.to_string()),
        }
    }
}

/// Server capabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    /// Tools capability
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    /// Whether the tool list can change while connected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

/// Server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server name
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Server version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jsonrpc_request() {
        let req = JsonRpcRequest::new("tools/list", None, Some(serde_json::json!(1)));

        assert_eq!(req.jsonrpc, "2.0");
        assert_eq!(req.method, "tools/list");
        assert!(!req.is_notification());

        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"jsonrpc\":\"2.0\""));
        assert!(json.contains("\"method\":\"tools/list\""));
    }

    #[test]
    fn test_jsonrpc_notification() {
        let notif = JsonRpcRequest::new("notifications/initialized", None, None);
        assert!(notif.is_notification());
    }

    #[test]
    fn test_jsonrpc_success_response() {
        let resp =
            JsonRpcResponse::success(serde_json::json!({"status": "ok"}), serde_json::json!(1));

        assert_eq!(resp.jsonrpc, "2.0");
        assert!(resp.result.is_some());
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_jsonrpc_error_response() {
        let error = JsonRpcError::method_not_found();
        let resp = JsonRpcResponse::error(error, serde_json::json!(1));

        assert_eq!(resp.jsonrpc, "2.0");
        assert!(resp.result.is_none());
        assert!(resp.error.is_some());

        let err = resp.error.unwrap();
        assert_eq!(err.code, -32601);
        assert_eq!(err.message, "Method not found");
    }

    #[test]
    fn test_from_slice_rejects_malformed_envelopes() {
        assert!(matches!(
            JsonRpcRequest::from_slice(b"{not json"),
            Err(EnvelopeError::Json(_))
        ));
        assert!(matches!(
            JsonRpcRequest::from_slice(br#"{"jsonrpc":"1.0","method":"ping","id":1}"#),
            Err(EnvelopeError::Version(_))
        ));
        assert!(JsonRpcRequest::from_slice(br#"{"jsonrpc":"2.0","id":1}"#).is_err());
        assert!(JsonRpcRequest::from_slice(br#"[{"jsonrpc":"2.0","method":"ping"}]"#).is_err());

        let ok = JsonRpcRequest::from_slice(br#"{"jsonrpc":"2.0","method":"ping","id":"a"}"#).unwrap();
        assert_eq!(ok.response_id(), serde_json::json!("a"));
    }

    #[test]
    fn test_initialize_result_is_camel_case() {
        let json = serde_json::to_value(InitializeResult::for_server()).unwrap();

        assert_eq!(json["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(json["serverInfo"]["name"], crate::SERVER_NAME);
        assert_eq!(json["capabilities"]["tools"]["listChanged"], false);
    }

    #[test]
    fn test_tool_error_conversion() {
        let err = crate::error::ToolError::invalid("limit", "must be at most 50");
        let rpc = JsonRpcError::from_tool_error(&err);

        assert_eq!(rpc.code, -32602);
        assert_eq!(rpc.data.unwrap()["violations"][0], "limit: must be at most 50");
    }
}
