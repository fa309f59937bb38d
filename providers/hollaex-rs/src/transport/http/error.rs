//! HTTP transport error handling
//!
//! Converts transport and tool failures to JSON-RPC error objects with
//! the HTTP status they are sent under.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use super::jsonrpc::{EnvelopeError, JsonRpcError, JsonRpcResponse};
use crate::error::ToolError;

/// HTTP transport errors
#[derive(Debug, thiserror::Error)]
pub enum HttpTransportError {
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl HttpTransportError {
    /// Convert to JSON-RPC error code
    pub fn to_jsonrpc_error(&self) -> JsonRpcError {
        match self {
            HttpTransportError::Envelope(err) => {
                let mut error = JsonRpcError::internal_error();
                error.data = Some(json!({ "detail": err.to_string() }));
                error
            }
            HttpTransportError::MethodNotFound(method) => {
                JsonRpcError::new(-32601, format!("Method not found: {}", method))
            }
            HttpTransportError::InvalidParams(msg) => {
                JsonRpcError::new(-32602, format!("Invalid params: {}", msg))
            }
            HttpTransportError::Tool(err) => JsonRpcError::from_tool_error(err),
        }
    }

    /// Get HTTP status code for error
    ///
    /// Only an unreadable envelope is an HTTP-level failure; everything
    /// else is a well-formed JSON-RPC error sent with 200.
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpTransportError::Envelope(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::OK,
        }
    }

    /// Full response for a request whose id is known
    pub fn into_response_with_id(self, id: Value) -> Response {
        let status = self.status_code();
        let response = JsonRpcResponse::error(self.to_jsonrpc_error(), id);
        (status, Json(response)).into_response()
    }
}

impl IntoResponse for HttpTransportError {
    fn into_response(self) -> Response {
        // No request context, so the id is null
        self.into_response_with_id(Value::Null)
    }
}

/// Result type for HTTP transport operations
pub type Result<T> = std::result::Result<T, HttpTransportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExchangeError;
    use crate::transport::http::jsonrpc::JsonRpcRequest;

    #[test]
    fn test_envelope_error_conversion() {
        let err: HttpTransportError = JsonRpcRequest::from_slice(b"{").unwrap_err().into();

        let jsonrpc_err = err.to_jsonrpc_error();
        assert_eq!(jsonrpc_err.code, -32603);
        assert_eq!(jsonrpc_err.message, "Internal error");
        assert!(jsonrpc_err.data.is_some());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_method_not_found_conversion() {
        let err = HttpTransportError::MethodNotFound("unknown/method".to_string());

        let jsonrpc_err = err.to_jsonrpc_error();
        assert_eq!(jsonrpc_err.code, -32601);
        assert_eq!(err.status_code(), StatusCode::OK);
    }

    #[test]
    fn test_tool_error_keeps_registry_code() {
        let err = HttpTransportError::Tool(ToolError::MissingCredentials("no key".to_string()));
        assert_eq!(err.to_jsonrpc_error().code, -32001);

        let err = HttpTransportError::Tool(ToolError::Upstream(ExchangeError::RateLimitError(
            "slow down".to_string(),
        )));
        assert_eq!(err.to_jsonrpc_error().code, -32002);
        assert_eq!(err.status_code(), StatusCode::OK);
    }
}
