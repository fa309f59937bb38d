//! HollaEx API Request Types
//!
//! Typed request shapes for the HollaEx v2 REST API. Tool arguments are
//! deserialized straight into these types (camelCase on the tool side) and
//! rendered to the snake_case query or body the exchange expects. Their
//! `JsonSchema` derives are the tools' input schemas.
//! Responses are passed through as raw JSON.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Market,
    Limit,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Market => write!(f, "market"),
            OrderType::Limit => write!(f, "limit"),
        }
    }
}

/// Sort direction for paginated lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Body of `POST /order`
///
/// # Example Body
/// ```json
/// { "symbol": "btc-usdt", "side": "buy", "size": 1, "type": "limit", "price": 10000 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NewOrder {
    #[schemars(description = "Market symbol, e.g. btc-usdt", length(min = 1))]
    pub symbol: String,
    pub side: OrderSide,
    #[schemars(description = "Order size in the base asset", extend("exclusiveMinimum" = 0))]
    pub size: f64,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Limit price; required for limit orders, omitted for market orders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(extend("exclusiveMinimum" = 0))]
    pub price: Option<f64>,
    /// Stop (trigger) price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(extend("exclusiveMinimum" = 0))]
    pub stop: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<OrderMeta>,
}

/// Optional order flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OrderMeta {
    /// Reject the order if it would take liquidity
    #[serde(
        default,
        rename(serialize = "post_only", deserialize = "postOnly"),
        skip_serializing_if = "Option::is_none"
    )]
    pub post_only: Option<bool>,
    /// Free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Filters for `GET /orders`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrdersQuery {
    /// Market symbol
    pub symbol: Option<String>,
    pub side: Option<OrderSide>,
    /// Order status, e.g. new or filled
    pub status: Option<String>,
    /// Only open orders
    pub open: Option<bool>,
    /// Page size, 1 to 50
    #[schemars(range(min = 1, max = 50))]
    pub limit: Option<u32>,
    /// Page number, starting at 1
    #[schemars(range(min = 1))]
    pub page: Option<u32>,
    /// Field to sort by, e.g. created_at
    pub order_by: Option<String>,
    pub order: Option<SortOrder>,
    /// Earliest creation time (RFC 3339)
    pub start_date: Option<DateTime<FixedOffset>>,
    /// Latest creation time (RFC 3339)
    pub end_date: Option<DateTime<FixedOffset>>,
}

impl OrdersQuery {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_opt(&mut pairs, "symbol", self.symbol.as_ref());
        push_opt(&mut pairs, "side", self.side.map(|s| s.as_str()));
        push_opt(&mut pairs, "status", self.status.as_ref());
        push_opt(&mut pairs, "open", self.open);
        push_opt(&mut pairs, "limit", self.limit);
        push_opt(&mut pairs, "page", self.page);
        push_opt(&mut pairs, "order_by", self.order_by.as_ref());
        push_opt(&mut pairs, "order", self.order.map(|o| o.as_str()));
        push_opt(&mut pairs, "start_date", self.start_date.map(rfc3339));
        push_opt(&mut pairs, "end_date", self.end_date.map(rfc3339));
        pairs
    }
}

/// Filters for `GET /user/trades`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TradesQuery {
    /// Market symbol
    pub symbol: Option<String>,
    /// Page size, 1 to 50
    #[schemars(range(min = 1, max = 50))]
    pub limit: Option<u32>,
    /// Page number, starting at 1
    #[schemars(range(min = 1))]
    pub page: Option<u32>,
    /// Field to sort by, e.g. timestamp
    pub order_by: Option<String>,
    pub order: Option<SortOrder>,
    /// Earliest trade time (RFC 3339)
    pub start_date: Option<DateTime<FixedOffset>>,
    /// Latest trade time (RFC 3339)
    pub end_date: Option<DateTime<FixedOffset>>,
}

impl TradesQuery {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_opt(&mut pairs, "symbol", self.symbol.as_ref());
        push_opt(&mut pairs, "limit", self.limit);
        push_opt(&mut pairs, "page", self.page);
        push_opt(&mut pairs, "order_by", self.order_by.as_ref());
        push_opt(&mut pairs, "order", self.order.map(|o| o.as_str()));
        push_opt(&mut pairs, "start_date", self.start_date.map(rfc3339));
        push_opt(&mut pairs, "end_date", self.end_date.map(rfc3339));
        pairs
    }
}

/// Parameters for `GET /minicharts`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MiniChartsQuery {
    /// Asset codes, e.g. ["btc", "eth"]
    #[schemars(length(min = 1), inner(length(min = 1)))]
    pub assets: Vec<String>,
    /// Start of the window
    #[serde(default)]
    pub from: Option<String>,
    /// End of the window
    #[serde(default)]
    pub to: Option<String>,
    /// Quote asset, e.g. usdt
    #[serde(default)]
    pub quote: Option<String>,
}

impl MiniChartsQuery {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("assets", self.assets.join(","))];
        push_opt(&mut pairs, "from", self.from.as_ref());
        push_opt(&mut pairs, "to", self.to.as_ref());
        push_opt(&mut pairs, "quote", self.quote.as_ref());
        pairs
    }
}

/// Candle width accepted by `GET /chart`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ChartResolution {
    #[serde(rename = "1")]
    OneMinute,
    #[serde(rename = "5")]
    FiveMinutes,
    #[serde(rename = "15")]
    FifteenMinutes,
    #[serde(rename = "60")]
    OneHour,
    #[serde(rename = "240")]
    FourHours,
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    OneWeek,
}

impl ChartResolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartResolution::OneMinute => "1",
            ChartResolution::FiveMinutes => "5",
            ChartResolution::FifteenMinutes => "15",
            ChartResolution::OneHour => "60",
            ChartResolution::FourHours => "240",
            ChartResolution::OneDay => "1D",
            ChartResolution::OneWeek => "1W",
        }
    }
}

/// Parameters for `GET /chart` (OHLCV candles)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChartQuery {
    #[schemars(description = "Market symbol, e.g. btc-usdt", length(min = 1))]
    pub symbol: String,
    /// Candle width
    pub resolution: ChartResolution,
    /// Start, unix seconds
    #[schemars(range(min = 0))]
    pub from: i64,
    /// End, unix seconds
    #[schemars(range(min = 0))]
    pub to: i64,
}

impl ChartQuery {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("symbol", self.symbol.clone()),
            ("resolution", self.resolution.as_str().to_string()),
            ("from", self.from.to_string()),
            ("to", self.to.to_string()),
        ]
    }
}

/// Parameters for `GET /quick-trade`
///
/// Exactly one of the two amounts is expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuickTradeQuery {
    #[schemars(description = "Asset to spend, e.g. usdt", length(min = 1))]
    pub spending_currency: String,
    #[schemars(description = "Asset to receive, e.g. btc", length(min = 1))]
    pub receiving_currency: String,
    /// Amount to spend
    #[serde(default)]
    #[schemars(extend("exclusiveMinimum" = 0))]
    pub spending_amount: Option<f64>,
    /// Amount to receive
    #[serde(default)]
    #[schemars(extend("exclusiveMinimum" = 0))]
    pub receiving_amount: Option<f64>,
}

impl QuickTradeQuery {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("spending_currency", self.spending_currency.clone()),
            ("receiving_currency", self.receiving_currency.clone()),
        ];
        push_opt(&mut pairs, "spending_amount", self.spending_amount);
        push_opt(&mut pairs, "receiving_amount", self.receiving_amount);
        pairs
    }
}

fn rfc3339(at: DateTime<FixedOffset>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn push_opt<T: ToString>(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<T>) {
    if let Some(v) = value {
        pairs.push((key, v.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_market_order_omits_price() {
        let order: NewOrder = serde_json::from_value(json!({
            "symbol": "btc-usdt",
            "side": "sell",
            "size": 0.5,
            "type": "market"
        }))
        .unwrap();

        let body = serde_json::to_value(&order).unwrap();
        assert_eq!(body["type"], "market");
        assert!(body.get("price").is_none());
        assert!(body.get("meta").is_none());
    }

    #[test]
    fn test_order_meta_accepts_camel_case() {
        let order: NewOrder = serde_json::from_value(json!({
            "symbol": "btc-usdt",
            "side": "buy",
            "size": 1,
            "type": "limit",
            "price": 10000,
            "meta": { "postOnly": true, "note": "dca" }
        }))
        .unwrap();

        let body = serde_json::to_value(&order).unwrap();
        assert_eq!(body["meta"]["post_only"], true);
        assert_eq!(body["meta"]["note"], "dca");
    }

    #[test]
    fn test_orders_query_pairs_are_snake_case() {
        let query: OrdersQuery = serde_json::from_value(json!({
            "symbol": "eth-usdt",
            "orderBy": "created_at",
            "order": "desc",
            "limit": 50,
            "startDate": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        let pairs = query.query_pairs();
        assert!(pairs.contains(&("order_by", "created_at".to_string())));
        assert!(pairs.contains(&("order", "desc".to_string())));
        assert!(pairs.contains(&("limit", "50".to_string())));
        assert!(pairs.contains(&("start_date", "2024-01-01T00:00:00Z".to_string())));
        assert!(!pairs.iter().any(|(k, _)| *k == "page"));
    }

    #[test]
    fn test_minicharts_joins_assets() {
        let query = MiniChartsQuery {
            assets: vec!["btc".to_string(), "eth".to_string()],
            quote: Some("usdt".to_string()),
            ..Default::default()
        };
        assert_eq!(query.query_pairs()[0], ("assets", "btc,eth".to_string()));
    }
}
