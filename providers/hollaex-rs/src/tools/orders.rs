//! Order tools
//!
//! Placing, cancelling and looking up the authenticated user's orders,
//! plus the user's own trade history.

use chrono::DateTime;
use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde_json::Value;

use super::definition::{
    parse_params, payload_len, payload_str, str_param, Access, Params, ToolDefinition, ToolOutput,
};
use super::params::{OrderIdParam, SymbolFilter};
use super::schema::ToolSchema;
use crate::error::ToolError;
use crate::hollaex::{Exchange, NewOrder, OrderType, OrdersQuery, TradesQuery};

/// Shape of a single order as returned by the exchange
#[allow(dead_code)]
#[derive(JsonSchema)]
pub struct OrderShape {
    id: String,
    symbol: String,
    side: String,
    size: f64,
    #[serde(rename = "type")]
    order_type: String,
    status: String,
    price: Option<f64>,
    filled: Option<f64>,
    stop: Option<f64>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

/// One page of a paginated list
#[allow(dead_code)]
#[derive(JsonSchema)]
pub struct Page<T> {
    count: f64,
    data: Vec<T>,
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "placeOrder",
            title: "Place Order",
            description: "Places a new market or limit order. Limit orders require a price.",
            input: ToolSchema::of::<NewOrder>(),
            output: ToolSchema::of::<OrderShape>(),
            access: Access::Private,
            mutating: true,
            check: Some(limit_order_has_price),
            handler: place_order,
        },
        ToolDefinition {
            name: "cancelOrder",
            title: "Cancel Order",
            description: "Cancels a single open order by id.",
            input: ToolSchema::of::<OrderIdParam>(),
            output: ToolSchema::of::<OrderShape>(),
            access: Access::Private,
            mutating: true,
            check: None,
            handler: cancel_order,
        },
        ToolDefinition {
            name: "cancelAllOrders",
            title: "Cancel All Orders",
            description: "Cancels every open order, optionally restricted to one market.",
            input: ToolSchema::of::<SymbolFilter>(),
            output: ToolSchema::any(),
            access: Access::Private,
            mutating: true,
            check: None,
            handler: cancel_all_orders,
        },
        ToolDefinition {
            name: "getOrder",
            title: "Get Order",
            description: "Returns a single order by id.",
            input: ToolSchema::of::<OrderIdParam>(),
            output: ToolSchema::of::<OrderShape>(),
            access: Access::Private,
            mutating: false,
            check: None,
            handler: get_order,
        },
        ToolDefinition {
            name: "getOrders",
            title: "Get Orders",
            description: "Lists the user's orders with optional filters and pagination (limit 1 to 50).",
            input: ToolSchema::of::<OrdersQuery>(),
            output: ToolSchema::of::<Page<OrderShape>>(),
            access: Access::Private,
            mutating: false,
            check: Some(date_window_ordered),
            handler: get_orders,
        },
        ToolDefinition {
            name: "getUserTrades",
            title: "Get User Trades",
            description: "Lists the user's executed trades with optional filters and pagination (limit 1 to 50).",
            input: ToolSchema::of::<TradesQuery>(),
            output: ToolSchema::of::<Page<Value>>(),
            access: Access::Private,
            mutating: false,
            check: Some(date_window_ordered),
            handler: get_user_trades,
        },
    ]
}

fn limit_order_has_price(params: &Params) -> Result<(), ToolError> {
    let is_limit = str_param(params, "type") == Some("limit");
    let has_price = params.get("price").is_some_and(|p| !p.is_null());
    if is_limit && !has_price {
        return Err(ToolError::invalid("price", "is required for limit orders"));
    }
    Ok(())
}

fn date_window_ordered(params: &Params) -> Result<(), ToolError> {
    let parse = |key: &str| str_param(params, key).and_then(|s| DateTime::parse_from_rfc3339(s).ok());
    if let (Some(start), Some(end)) = (parse("startDate"), parse("endDate")) {
        if start > end {
            return Err(ToolError::invalid("startDate", "must not be later than endDate"));
        }
    }
    Ok(())
}

fn place_order(exchange: &dyn Exchange, params: Params) -> BoxFuture<'_, Result<ToolOutput, ToolError>> {
    Box::pin(async move {
        let mut order: NewOrder = parse_params(params)?;
        if order.order_type == OrderType::Market {
            order.price = None;
        }

        let placed = exchange.create_order(&order).await?;
        let summary = format!("Placed order {}", payload_str(&placed, "id"));
        Ok(ToolOutput::new(summary, placed))
    })
}

fn cancel_order(exchange: &dyn Exchange, params: Params) -> BoxFuture<'_, Result<ToolOutput, ToolError>> {
    Box::pin(async move {
        let OrderIdParam { order_id } = parse_params(params)?;
        let cancelled = exchange.cancel_order(&order_id).await?;
        let summary = format!("Cancelled order {}", payload_str(&cancelled, "id"));
        Ok(ToolOutput::new(summary, cancelled))
    })
}

fn cancel_all_orders(exchange: &dyn Exchange, params: Params) -> BoxFuture<'_, Result<ToolOutput, ToolError>> {
    Box::pin(async move {
        let filter: SymbolFilter = parse_params(params)?;
        let cancelled = exchange.cancel_all_orders(filter.symbol.as_deref()).await?;
        let summary = format!("Cancelled {} orders", payload_len(&cancelled));
        Ok(ToolOutput::new(summary, cancelled))
    })
}

fn get_order(exchange: &dyn Exchange, params: Params) -> BoxFuture<'_, Result<ToolOutput, ToolError>> {
    Box::pin(async move {
        let OrderIdParam { order_id } = parse_params(params)?;
        let order = exchange.get_order(&order_id).await?;
        let summary = format!("Retrieved order {}", payload_str(&order, "id"));
        Ok(ToolOutput::new(summary, order))
    })
}

fn get_orders(exchange: &dyn Exchange, params: Params) -> BoxFuture<'_, Result<ToolOutput, ToolError>> {
    Box::pin(async move {
        let query: OrdersQuery = parse_params(params)?;
        let orders = exchange.get_orders(&query).await?;
        let summary = format!("Retrieved {} orders", payload_len(&orders));
        Ok(ToolOutput::new(summary, orders))
    })
}

fn get_user_trades(exchange: &dyn Exchange, params: Params) -> BoxFuture<'_, Result<ToolOutput, ToolError>> {
    Box::pin(async move {
        let query: TradesQuery = parse_params(params)?;
        let trades = exchange.get_user_trades(&query).await?;
        let summary = format!("Retrieved {} trades", payload_len(&trades));
        Ok(ToolOutput::new(summary, trades))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: serde_json::Value) -> Params {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_limit_order_requires_price() {
        let limit = params(json!({ "symbol": "btc-usdt", "side": "buy", "size": 1, "type": "limit" }));
        let err = limit_order_has_price(&limit).unwrap_err();
        assert!(err.to_string().contains("price"));

        let market = params(json!({ "symbol": "btc-usdt", "side": "buy", "size": 1, "type": "market" }));
        assert!(limit_order_has_price(&market).is_ok());
    }

    #[test]
    fn test_date_window() {
        let reversed = params(json!({
            "startDate": "2024-02-01T00:00:00Z",
            "endDate": "2024-01-01T00:00:00Z"
        }));
        assert!(matches!(date_window_ordered(&reversed), Err(ToolError::InvalidInput(_))));

        let ordered = params(json!({
            "startDate": "2024-01-01T00:00:00Z",
            "endDate": "2024-01-01T00:00:00+00:00"
        }));
        assert!(date_window_ordered(&ordered).is_ok());
    }

    #[test]
    fn test_limit_bounds() {
        let tools = definitions();
        let get_orders = tools.iter().find(|t| t.name == "getOrders").unwrap();

        assert!(get_orders.input.validate(&json!({ "limit": 50 })).is_empty());
        assert!(get_orders.input.validate(&json!({ "limit": 50.0 })).is_empty());
        assert_eq!(get_orders.input.validate(&json!({ "limit": 51 })).len(), 1);
        assert_eq!(get_orders.input.validate(&json!({ "limit": 0 })).len(), 1);
        assert_eq!(get_orders.input.validate(&json!({ "page": 0 })).len(), 1);
    }

    #[test]
    fn test_order_schema_requires_core_fields() {
        let order = json!({
            "id": "123", "symbol": "btc-usdt", "side": "buy", "size": 1,
            "type": "limit", "status": "new", "price": 100, "extra": true
        });
        let schema = ToolSchema::of::<OrderShape>();
        assert!(schema.validate(&order).is_empty());

        let partial = json!({ "id": "123", "symbol": "btc-usdt" });
        assert_eq!(schema.validate(&partial).len(), 4);
    }
}
