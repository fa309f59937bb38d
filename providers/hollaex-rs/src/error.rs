use serde_json::{json, Value};
use thiserror::Error;

use crate::tools::schema::Violation;

/// Failure of a single tool invocation.
///
/// Every variant maps to one JSON-RPC error code so that clients can tell
/// a bad request apart from an unknown tool or an exchange-side rejection.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid input: {}", format_violations(.0))]
    InvalidInput(Vec<Violation>),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Exchange error: {0}")]
    Upstream(#[from] ExchangeError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Builds an `InvalidInput` error carrying a single violation
    pub fn invalid(path: impl Into<String>, message: impl Into<String>) -> Self {
        ToolError::InvalidInput(vec![Violation::new(path, message)])
    }

    /// JSON-RPC error code used by both transports
    pub fn code(&self) -> i32 {
        match self {
            ToolError::InvalidInput(_) => -32602,
            ToolError::ToolNotFound(_) => -32601,
            ToolError::MissingCredentials(_) => -32001,
            ToolError::Upstream(_) => -32002,
            ToolError::Internal(_) => -32603,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ToolError::InvalidInput(_) => "invalid_input",
            ToolError::MissingCredentials(_) => "missing_credentials",
            ToolError::ToolNotFound(_) => "tool_not_found",
            ToolError::Upstream(_) => "upstream_error",
            ToolError::Internal(_) => "internal_error",
        }
    }

    /// Optional `data` member of the JSON-RPC error object
    pub fn data(&self) -> Option<Value> {
        match self {
            ToolError::InvalidInput(violations) => Some(json!({
                "type": self.error_type(),
                "violations": violations.iter().map(ToString::to_string).collect::<Vec<_>>(),
            })),
            ToolError::Upstream(err @ ExchangeError::Api { status, .. }) => Some(json!({
                "type": self.error_type(),
                "reason": err.error_type(),
                "status": status,
            })),
            ToolError::Upstream(err) => Some(json!({
                "type": self.error_type(),
                "reason": err.error_type(),
            })),
            _ => Some(json!({ "type": self.error_type() })),
        }
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised by the HollaEx REST delegate
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("HollaEx API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Signing error: {0}")]
    SigningError(String),
}

impl ExchangeError {
    pub fn error_type(&self) -> &'static str {
        match self {
            ExchangeError::ConnectionError(_) => "connection_error",
            ExchangeError::RateLimitError(_) => "rate_limit",
            ExchangeError::Api { .. } => "api_error",
            ExchangeError::ParseError(_) => "parse_error",
            ExchangeError::SigningError(_) => "signing_error",
        }
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExchangeError::ConnectionError(
                "Request timeout. Please check your internet connection.".to_string(),
            )
        } else if err.is_connect() {
            ExchangeError::ConnectionError(
                "Failed to connect to HollaEx API. Please check your internet connection."
                    .to_string(),
            )
        } else if err.is_decode() {
            ExchangeError::ParseError(format!("Invalid response body: {}", err))
        } else if let Some(status) = err.status() {
            match status.as_u16() {
                429 => ExchangeError::RateLimitError(
                    "Too many requests to HollaEx API.".to_string(),
                ),
                code => ExchangeError::Api {
                    status: code,
                    message: status.to_string(),
                },
            }
        } else {
            ExchangeError::ConnectionError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(err: serde_json::Error) -> Self {
        ExchangeError::ParseError(format!("JSON parsing failed: {}", err))
    }
}

/// Startup configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let not_found = ToolError::ToolNotFound("nope".to_string());
        let invalid = ToolError::invalid("symbol", "is required");

        assert_ne!(not_found.code(), invalid.code());
        assert_eq!(not_found.code(), -32601);
        assert_eq!(invalid.code(), -32602);
        assert!(not_found.to_string().starts_with("Tool not found"));
        assert!(invalid.to_string().starts_with("Invalid input"));
    }

    #[test]
    fn test_invalid_input_lists_violations() {
        let err = ToolError::InvalidInput(vec![
            Violation::new("size", "must be greater than 0"),
            Violation::new("side", "must be one of: buy, sell"),
        ]);

        let message = err.to_string();
        assert!(message.contains("size: must be greater than 0"));
        assert!(message.contains("side: must be one of: buy, sell"));

        let data = err.data().unwrap();
        assert_eq!(data["violations"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_upstream_carries_status() {
        let err = ToolError::from(ExchangeError::Api {
            status: 400,
            message: "Insufficient balance".to_string(),
        });

        assert_eq!(err.code(), -32002);
        assert_eq!(err.data().unwrap()["status"], 400);
        assert!(err.to_string().contains("Insufficient balance"));
    }

    #[test]
    fn test_upstream_carries_reason() {
        let err = ToolError::from(ExchangeError::ConnectionError("refused".to_string()));
        let data = err.data().unwrap();

        assert_eq!(data["type"], "upstream_error");
        assert_eq!(data["reason"], "connection_error");
        assert!(data.get("status").is_none());
    }

    #[test]
    fn test_missing_credentials_code() {
        let err = ToolError::MissingCredentials("HOLLAEX_API_KEY not set".to_string());
        assert_eq!(err.code(), -32001);
        assert_eq!(err.error_type(), "missing_credentials");
    }
}
