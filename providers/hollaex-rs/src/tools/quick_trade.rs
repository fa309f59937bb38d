//! Quick trade (quote then execute-by-token)

use futures::future::BoxFuture;
use schemars::JsonSchema;

use super::definition::{parse_params, payload_str, Access, Params, ToolDefinition, ToolOutput};
use super::params::TokenParam;
use super::schema::ToolSchema;
use crate::error::ToolError;
use crate::hollaex::{Exchange, QuickTradeQuery};

/// A quote is passed through as-is; only its token is typed
#[allow(dead_code)]
#[derive(JsonSchema)]
pub struct QuoteShape {
    /// Token to pass to executeOrder
    token: Option<String>,
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "getQuickTradeQuote",
            title: "Get Quick Trade Quote",
            description: "Quotes a swap between two assets. Give exactly one of spendingAmount \
                          or receivingAmount; the returned token executes the quote.",
            input: ToolSchema::of::<QuickTradeQuery>(),
            output: ToolSchema::of::<QuoteShape>(),
            access: Access::Private,
            mutating: false,
            check: Some(exactly_one_amount),
            handler: get_quick_trade_quote,
        },
        ToolDefinition {
            name: "executeOrder",
            title: "Execute Quick Trade",
            description: "Executes a previously quoted swap by its token.",
            input: ToolSchema::of::<TokenParam>(),
            output: ToolSchema::any(),
            access: Access::Private,
            mutating: true,
            check: None,
            handler: execute_order,
        },
    ]
}

fn exactly_one_amount(params: &Params) -> Result<(), ToolError> {
    let present = |key: &str| params.get(key).is_some_and(|v| !v.is_null());
    match (present("spendingAmount"), present("receivingAmount")) {
        (true, false) | (false, true) => Ok(()),
        (true, true) => Err(ToolError::invalid(
            "",
            "only one of spendingAmount or receivingAmount may be given",
        )),
        (false, false) => Err(ToolError::invalid(
            "",
            "one of spendingAmount or receivingAmount is required",
        )),
    }
}

fn get_quick_trade_quote(exchange: &dyn Exchange, params: Params) -> BoxFuture<'_, Result<ToolOutput, ToolError>> {
    Box::pin(async move {
        let query: QuickTradeQuery = parse_params(params)?;
        let quote = exchange.get_quick_trade_quote(&query).await?;
        let summary = format!("Quote {}", payload_str(&quote, "token"));
        Ok(ToolOutput::new(summary, quote))
    })
}

fn execute_order(exchange: &dyn Exchange, params: Params) -> BoxFuture<'_, Result<ToolOutput, ToolError>> {
    Box::pin(async move {
        let TokenParam { token } = parse_params(params)?;
        let executed = exchange.execute_order(&token).await?;
        Ok(ToolOutput::new("Executed quick trade", executed))
    })
}
