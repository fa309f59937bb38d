//! Tool schemas
//!
//! Input and output shapes are Rust types deriving [`JsonSchema`]. Each
//! schema is generated once, inlined into a single draft-07 document for
//! `tools/list`, and compiled into a [`jsonschema::Validator`] that reports
//! every violation rather than stopping at the first one.

use std::fmt;
use std::sync::Arc;

use jsonschema::error::ValidationErrorKind;
use jsonschema::{ValidationError, Validator};
use schemars::generate::SchemaSettings;
use schemars::JsonSchema;
use serde_json::{Map, Value};

/// One schema violation, located by a dotted path (`meta.note`, `assets[2]`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    fn from_error(error: &ValidationError<'_>) -> Self {
        let path = dotted_path(&error.instance_path.to_string());
        match &error.kind {
            ValidationErrorKind::Required { property } => {
                let name = property
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| property.to_string());
                Violation::new(join(&path, &name), "is required")
            }
            _ => Violation::new(path, error.to_string()),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

struct Compiled {
    document: Map<String, Value>,
    validator: Result<Validator, String>,
}

/// A tool's input or output schema
///
/// `ToolSchema::any()` is permissive: it accepts every value and is not
/// advertised in listings.
#[derive(Clone)]
pub struct ToolSchema {
    compiled: Option<Arc<Compiled>>,
}

impl ToolSchema {
    /// Schema generated from `T`, with subschemas inlined
    pub fn of<T: JsonSchema>() -> Self {
        let schema = SchemaSettings::draft07()
            .with(|s| s.inline_subschemas = true)
            .into_generator()
            .into_root_schema_for::<T>();

        let document = match schema.to_value() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let validator = jsonschema::options()
            .should_validate_formats(true)
            .build(&Value::Object(document.clone()))
            .map_err(|e| e.to_string());

        if let Err(err) = &validator {
            tracing::error!(schema = T::schema_name().as_ref(), "Schema failed to compile: {}", err);
        }

        Self {
            compiled: Some(Arc::new(Compiled { document, validator })),
        }
    }

    pub fn any() -> Self {
        Self { compiled: None }
    }

    pub fn is_permissive(&self) -> bool {
        self.compiled.is_none()
    }

    /// The JSON Schema document; `{}` when permissive
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        self.compiled.as_ref().map(|c| &c.document)
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.as_object().cloned().unwrap_or_default())
    }

    /// Validates `value`, collecting every violation
    pub fn validate(&self, value: &Value) -> Vec<Violation> {
        let Some(compiled) = &self.compiled else {
            return Vec::new();
        };
        match &compiled.validator {
            Ok(validator) => validator
                .iter_errors(value)
                .map(|error| Violation::from_error(&error))
                .collect(),
            Err(err) => vec![Violation::new("", format!("schema unavailable: {}", err))],
        }
    }
}

impl fmt::Debug for ToolSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_object() {
            Some(document) => f.debug_tuple("ToolSchema").field(document).finish(),
            None => f.write_str("ToolSchema(any)"),
        }
    }
}

/// `/meta/note` -> `meta.note`, `/assets/2` -> `assets[2]`
fn dotted_path(pointer: &str) -> String {
    pointer
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .fold(String::new(), |path, segment| {
            if segment.parse::<usize>().is_ok() {
                format!("{}[{}]", path, segment)
            } else {
                join(&path, &segment)
            }
        })
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[allow(dead_code)]
    #[derive(Deserialize, JsonSchema)]
    struct Sample {
        /// Market symbol
        #[schemars(length(min = 1))]
        symbol: String,
        side: Side,
        #[schemars(extend("exclusiveMinimum" = 0))]
        size: f64,
        #[schemars(range(min = 1, max = 50))]
        limit: Option<u32>,
        #[schemars(length(min = 1))]
        assets: Option<Vec<String>>,
        #[schemars(extend("format" = "date-time"))]
        from: Option<String>,
    }

    #[allow(dead_code)]
    #[derive(Deserialize, JsonSchema)]
    #[serde(rename_all = "lowercase")]
    enum Side {
        Buy,
        Sell,
    }

    fn sample() -> ToolSchema {
        ToolSchema::of::<Sample>()
    }

    fn paths(violations: &[Violation]) -> Vec<String> {
        let mut paths: Vec<String> = violations.iter().map(|v| v.path.clone()).collect();
        paths.sort();
        paths
    }

    #[test]
    fn test_valid_input() {
        let value = json!({ "symbol": "btc-usdt", "side": "buy", "size": 1, "limit": 50 });
        assert!(sample().validate(&value).is_empty());
    }

    #[test]
    fn test_integral_float_counts_as_integer() {
        let value = json!({ "symbol": "btc-usdt", "side": "buy", "size": 1, "limit": 50.0 });
        assert!(sample().validate(&value).is_empty());

        let value = json!({ "symbol": "btc-usdt", "side": "buy", "size": 1, "limit": 2.5 });
        assert_eq!(paths(&sample().validate(&value)), vec!["limit"]);
    }

    #[test]
    fn test_collects_all_violations() {
        let value = json!({ "side": "hold", "size": 0, "limit": 51 });
        let violations = sample().validate(&value);

        assert_eq!(paths(&violations), vec!["limit", "side", "size", "symbol"]);
        assert!(violations.contains(&Violation::new("symbol", "is required")));
    }

    #[test]
    fn test_null_optional_is_absent() {
        let value = json!({ "symbol": "btc-usdt", "side": "sell", "size": 2, "limit": null });
        assert!(sample().validate(&value).is_empty());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let value = json!({ "symbol": "btc-usdt", "side": "sell", "size": 2, "color": "red" });
        assert!(sample().validate(&value).is_empty());
    }

    #[test]
    fn test_array_and_date_time() {
        let base = json!({ "symbol": "btc-usdt", "side": "sell", "size": 2 });

        let mut value = base.clone();
        value["assets"] = json!([]);
        value["from"] = json!("yesterday");
        assert_eq!(paths(&sample().validate(&value)), vec!["assets", "from"]);

        let mut value = base.clone();
        value["assets"] = json!(["btc", 1]);
        assert_eq!(paths(&sample().validate(&value)), vec!["assets[1]"]);

        let mut value = base;
        value["assets"] = json!(["btc"]);
        value["from"] = json!("2024-05-01T00:00:00Z");
        assert!(sample().validate(&value).is_empty());
    }

    #[test]
    fn test_root_must_be_object() {
        let violations = sample().validate(&json!([1, 2]));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "");
    }

    #[test]
    fn test_any_accepts_everything() {
        assert!(ToolSchema::any().validate(&json!(null)).is_empty());
        assert!(ToolSchema::any().validate(&json!([{ "a": 1 }])).is_empty());
        assert!(ToolSchema::any().is_permissive());
        assert_eq!(ToolSchema::any().to_json(), json!({}));
    }

    #[test]
    fn test_generated_document() {
        let rendered = sample().to_json();

        assert_eq!(rendered["type"], "object");
        let mut required: Vec<_> = rendered["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        required.sort();
        assert_eq!(required, vec!["side", "size", "symbol"]);
        assert_eq!(rendered["properties"]["symbol"]["description"], "Market symbol");
        assert_eq!(rendered["properties"]["size"]["exclusiveMinimum"].as_f64(), Some(0.0));
        assert_eq!(rendered["properties"]["limit"]["maximum"].as_f64(), Some(50.0));
        assert!(rendered.get("$defs").is_none());
        assert!(rendered.get("definitions").is_none());
    }

    #[test]
    fn test_dotted_path() {
        assert_eq!(dotted_path(""), "");
        assert_eq!(dotted_path("/limit"), "limit");
        assert_eq!(dotted_path("/meta/note"), "meta.note");
        assert_eq!(dotted_path("/assets/2"), "assets[2]");
    }
}
