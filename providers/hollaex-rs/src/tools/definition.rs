//! Tool definitions and invocation results

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use super::schema::ToolSchema;
use crate::error::ToolError;
use crate::hollaex::Exchange;

/// Named tool arguments, always a JSON object
pub type Params = Map<String, Value>;

/// Async tool body: exactly one delegated call plus response shaping
pub type Handler = for<'a> fn(&'a dyn Exchange, Params) -> BoxFuture<'a, Result<ToolOutput, ToolError>>;

/// Validation that spans several fields; runs before any delegate exists
pub type CrossCheck = fn(&Params) -> Result<(), ToolError>;

/// Whether a tool needs exchange credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Public market data
    Public,
    /// Signed account and trading endpoints
    Private,
}

/// A tool's declaration and its bound handler
///
/// Built once when the registry is created and never modified.
#[derive(Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub input: ToolSchema,
    pub output: ToolSchema,
    pub access: Access,
    /// State-changing on the exchange; such calls are never retried
    pub mutating: bool,
    pub check: Option<CrossCheck>,
    pub handler: Handler,
}

impl std::fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("access", &self.access)
            .field("mutating", &self.mutating)
            .finish()
    }
}

impl ToolDefinition {
    /// Listing entry as sent in `tools/list`
    ///
    /// Permissive output schemas are not advertised.
    pub fn listing(&self) -> Value {
        let mut entry = json!({
            "name": self.name,
            "title": self.title,
            "description": self.description,
            "inputSchema": self.input.to_json(),
        });
        if !self.output.is_permissive() {
            entry["outputSchema"] = self.output.to_json();
        }
        entry
    }

    /// Input schema as a JSON object, the shape MCP tool models expect
    pub fn input_schema_object(&self) -> Map<String, Value> {
        self.input.as_object().cloned().unwrap_or_default()
    }

    pub fn output_schema_object(&self) -> Option<Map<String, Value>> {
        self.output.as_object().cloned()
    }
}

/// Successful invocation: a short human-readable line plus the payload
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub summary: String,
    pub payload: Value,
}

impl ToolOutput {
    pub fn new(summary: impl Into<String>, payload: Value) -> Self {
        Self {
            summary: summary.into(),
            payload,
        }
    }

    /// `tools/call` result body: `{content: [text], structuredContent}`
    pub fn to_call_result(&self) -> Value {
        json!({
            "content": [{ "type": "text", "text": self.summary }],
            "structuredContent": self.payload,
            "isError": false,
        })
    }
}

/// Deserializes validated params into a typed request
///
/// Integral floats (`50.0`) pass JSON Schema `integer` checks, so they are
/// narrowed to integers before serde sees them.
pub fn parse_params<T: DeserializeOwned>(params: Params) -> Result<T, ToolError> {
    let value = integral_floats_as_ints(Value::Object(params));
    serde_json::from_value(value).map_err(|e| ToolError::invalid("", e.to_string()))
}

fn integral_floats_as_ints(value: Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() <= 9_007_199_254_740_992.0 => Value::from(f as i64),
            _ => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(integral_floats_as_ints).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, integral_floats_as_ints(v)))
                .collect(),
        ),
        other => other,
    }
}

/// Reads an optional string argument
pub fn str_param<'p>(params: &'p Params, key: &str) -> Option<&'p str> {
    params.get(key).and_then(Value::as_str)
}

/// Reads a scalar field from a delegate payload for summaries
pub fn payload_str(payload: &Value, key: &str) -> String {
    match payload.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "unknown".to_string(),
    }
}

/// Number of entries in a list payload (`[..]` or `{count, data: [..]}`)
pub fn payload_len(payload: &Value) -> usize {
    match payload {
        Value::Array(items) => items.len(),
        Value::Object(map) => map
            .get("data")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hollaex::OrdersQuery;

    fn params(value: Value) -> Params {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_call_result_shape() {
        let output = ToolOutput::new("Placed order 123", json!({ "id": "123" }));
        let result = output.to_call_result();

        assert_eq!(result["content"][0]["type"], "text");
        assert_eq!(result["content"][0]["text"], "Placed order 123");
        assert_eq!(result["structuredContent"]["id"], "123");
    }

    #[test]
    fn test_payload_helpers() {
        assert_eq!(payload_len(&json!([1, 2, 3])), 3);
        assert_eq!(payload_len(&json!({ "count": 10, "data": [1] })), 1);
        assert_eq!(payload_len(&json!("x")), 0);
        assert_eq!(payload_str(&json!({ "id": "abc" }), "id"), "abc");
        assert_eq!(payload_str(&json!({ "id": 42 }), "id"), "42");
        assert_eq!(payload_str(&json!({}), "id"), "unknown");
    }

    #[test]
    fn test_parse_params_error_is_invalid_input() {
        let result: Result<OrdersQuery, _> = parse_params(params(json!({ "limit": "ten" })));
        assert!(matches!(result, Err(ToolError::InvalidInput(_))));
    }

    #[test]
    fn test_parse_params_accepts_integral_floats() {
        let query: OrdersQuery = parse_params(params(json!({ "limit": 50.0, "page": 2 }))).unwrap();
        assert_eq!(query.limit, Some(50));
        assert_eq!(query.page, Some(2));

        let fractional: Result<OrdersQuery, _> = parse_params(params(json!({ "limit": 2.5 })));
        assert!(fractional.is_err());
    }
}
