//! Tool registry and dispatch
//!
//! The registry owns the fixed tool catalog and is the single place where
//! an invocation is validated, routed to the exchange delegate and logged.
//! Both transports hold it behind an `Arc` and call [`ToolRegistry::invoke`].

use std::sync::Arc;

use serde_json::Value;

use super::definition::{Access, Params, ToolDefinition, ToolOutput};
use super::{account, market, orders, quick_trade};
use crate::config::credentials::{API_KEY_VAR, API_SECRET_VAR};
use crate::config::ExchangeSettings;
use crate::error::ToolError;
use crate::hollaex::ExchangeFactory;

pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
    settings: Arc<ExchangeSettings>,
    factory: Arc<dyn ExchangeFactory>,
}

impl ToolRegistry {
    pub fn new(settings: Arc<ExchangeSettings>, factory: Arc<dyn ExchangeFactory>) -> Self {
        let tools = catalog();
        tracing::debug!(tools = tools.len(), "Tool registry initialized");
        Self {
            tools,
            settings,
            factory,
        }
    }

    /// All tools in catalog order
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Runs one tool call end to end
    ///
    /// Missing `params` are treated as an empty object. Nothing is sent to
    /// the exchange unless the input passes both the schema and the
    /// tool's cross-field check.
    pub async fn invoke(&self, name: &str, params: Option<Params>) -> Result<ToolOutput, ToolError> {
        let params = params.unwrap_or_default();
        tracing::debug!(tool = name, "Dispatching tool call");

        let result = self.dispatch(name, params.clone()).await;
        let logged = Value::Object(params);
        match &result {
            Ok(_) => {
                if self.get(name).is_some_and(|t| t.mutating) {
                    tracing::info!(tool = name, params = %logged, "Tool call succeeded");
                }
            }
            Err(err @ (ToolError::Upstream(_) | ToolError::Internal(_))) => {
                tracing::error!(
                    tool = name,
                    params = %logged,
                    code = err.code(),
                    "Tool call failed: {}",
                    err
                );
            }
            Err(err) => {
                tracing::warn!(tool = name, code = err.code(), "Tool call rejected: {}", err);
            }
        }
        result
    }

    async fn dispatch(&self, name: &str, params: Params) -> Result<ToolOutput, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::ToolNotFound(name.to_string()))?;

        let violations = tool.input.validate(&Value::Object(params.clone()));
        if !violations.is_empty() {
            return Err(ToolError::InvalidInput(violations));
        }

        if let Some(check) = tool.check {
            check(&params)?;
        }

        if tool.access == Access::Private && !self.settings.has_credentials() {
            return Err(ToolError::MissingCredentials(format!(
                "{} requires {} and {} to be set",
                tool.name, API_KEY_VAR, API_SECRET_VAR
            )));
        }

        let exchange = self.factory.connect(&self.settings)?;
        let output = (tool.handler)(exchange.as_ref(), params).await?;

        let violations = tool.output.validate(&output.payload);
        if !violations.is_empty() {
            let detail = violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ToolError::Internal(format!(
                "unexpected response shape from exchange: {}",
                detail
            )));
        }

        Ok(output)
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.len())
            .field("settings", &self.settings)
            .finish()
    }
}

fn catalog() -> Vec<ToolDefinition> {
    let mut tools = account::definitions();
    tools.extend(orders::definitions());
    tools.extend(market::definitions());
    tools.extend(quick_trade::definitions());
    tools
}
