//! Tool Parameter Types
//!
//! Inputs of the tools that take no more than a symbol, an id or a token.
//! Richer inputs are the request types in [`crate::hollaex::types`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for tools that take no arguments
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Common parameter for single-market tools
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SymbolParam {
    #[schemars(description = "Market symbol, e.g. btc-usdt", length(min = 1))]
    pub symbol: String,
}

/// Optional market filter
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct SymbolFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Market symbol; all markets when omitted", length(min = 1))]
    pub symbol: Option<String>,
}

/// Parameters for single-order lookups and cancellation
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderIdParam {
    #[schemars(description = "Order id", length(min = 1))]
    pub order_id: String,
}

/// Parameters for executing a quick trade quote
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TokenParam {
    #[schemars(description = "Token returned by getQuickTradeQuote", length(min = 1))]
    pub token: String,
}
