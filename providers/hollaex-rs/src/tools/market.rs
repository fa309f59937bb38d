//! Public market data tools
//!
//! None of these need credentials; the delegate sends them unsigned.

use futures::future::BoxFuture;
use schemars::JsonSchema;

use super::definition::{parse_params, Access, Params, ToolDefinition, ToolOutput};
use super::params::{NoParams, SymbolFilter, SymbolParam};
use super::schema::ToolSchema;
use crate::error::ToolError;
use crate::hollaex::{ChartQuery, Exchange, MiniChartsQuery};

/// Ticker fields are typed when present; none are required
#[allow(dead_code)]
#[derive(JsonSchema)]
pub struct TickerShape {
    open: Option<f64>,
    close: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    last: Option<f64>,
    volume: Option<f64>,
    timestamp: Option<String>,
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "getTicker",
            title: "Get Ticker",
            description: "Returns the 24h ticker (open, close, high, low, last, volume) for one market.",
            input: ToolSchema::of::<SymbolParam>(),
            output: ToolSchema::of::<TickerShape>(),
            access: Access::Public,
            mutating: false,
            check: None,
            handler: get_ticker,
        },
        ToolDefinition {
            name: "getTickers",
            title: "Get Tickers",
            description: "Returns tickers for every market, keyed by symbol.",
            input: ToolSchema::of::<NoParams>(),
            output: ToolSchema::any(),
            access: Access::Public,
            mutating: false,
            check: None,
            handler: get_tickers,
        },
        ToolDefinition {
            name: "getOrderbook",
            title: "Get Orderbook",
            description: "Returns the current bids and asks for one market.",
            input: ToolSchema::of::<SymbolParam>(),
            output: ToolSchema::any(),
            access: Access::Public,
            mutating: false,
            check: None,
            handler: get_orderbook,
        },
        ToolDefinition {
            name: "getOrderbooks",
            title: "Get Orderbooks",
            description: "Returns bids and asks for every market, keyed by symbol.",
            input: ToolSchema::of::<NoParams>(),
            output: ToolSchema::any(),
            access: Access::Public,
            mutating: false,
            check: None,
            handler: get_orderbooks,
        },
        ToolDefinition {
            name: "getTrades",
            title: "Get Trades",
            description: "Returns recent public trades, optionally for a single market.",
            input: ToolSchema::of::<SymbolFilter>(),
            output: ToolSchema::any(),
            access: Access::Public,
            mutating: false,
            check: None,
            handler: get_trades,
        },
        ToolDefinition {
            name: "getMiniCharts",
            title: "Get Mini Charts",
            description: "Returns compact price history for a list of assets.",
            input: ToolSchema::of::<MiniChartsQuery>(),
            output: ToolSchema::any(),
            access: Access::Public,
            mutating: false,
            check: None,
            handler: get_mini_charts,
        },
        ToolDefinition {
            name: "getChart",
            title: "Get Chart",
            description: "Returns OHLCV candles for one market between two unix timestamps.",
            input: ToolSchema::of::<ChartQuery>(),
            output: ToolSchema::any(),
            access: Access::Public,
            mutating: false,
            check: Some(chart_window_ordered),
            handler: get_chart,
        },
    ]
}

fn chart_window_ordered(params: &Params) -> Result<(), ToolError> {
    let from = params.get("from").and_then(|v| v.as_f64());
    let to = params.get("to").and_then(|v| v.as_f64());
    match (from, to) {
        (Some(from), Some(to)) if from > to => Err(ToolError::invalid("from", "must not be later than to")),
        _ => Ok(()),
    }
}

fn get_ticker(exchange: &dyn Exchange, params: Params) -> BoxFuture<'_, Result<ToolOutput, ToolError>> {
    Box::pin(async move {
        let SymbolParam { symbol } = parse_params(params)?;
        let ticker = exchange.get_ticker(&symbol).await?;
        Ok(ToolOutput::new(format!("Ticker for {}", symbol), ticker))
    })
}

fn get_tickers(exchange: &dyn Exchange, _params: Params) -> BoxFuture<'_, Result<ToolOutput, ToolError>> {
    Box::pin(async move {
        let tickers = exchange.get_tickers().await?;
        Ok(ToolOutput::new("Retrieved tickers", tickers))
    })
}

fn get_orderbook(exchange: &dyn Exchange, params: Params) -> BoxFuture<'_, Result<ToolOutput, ToolError>> {
    Box::pin(async move {
        let SymbolParam { symbol } = parse_params(params)?;
        let book = exchange.get_orderbook(&symbol).await?;
        Ok(ToolOutput::new(format!("Orderbook for {}", symbol), book))
    })
}

fn get_orderbooks(exchange: &dyn Exchange, _params: Params) -> BoxFuture<'_, Result<ToolOutput, ToolError>> {
    Box::pin(async move {
        let books = exchange.get_orderbooks().await?;
        Ok(ToolOutput::new("Retrieved orderbooks", books))
    })
}

fn get_trades(exchange: &dyn Exchange, params: Params) -> BoxFuture<'_, Result<ToolOutput, ToolError>> {
    Box::pin(async move {
        let filter: SymbolFilter = parse_params(params)?;
        let trades = exchange.get_trades(filter.symbol.as_deref()).await?;
        Ok(ToolOutput::new("Retrieved public trades", trades))
    })
}

fn get_mini_charts(exchange: &dyn Exchange, params: Params) -> BoxFuture<'_, Result<ToolOutput, ToolError>> {
    Box::pin(async move {
        let query: MiniChartsQuery = parse_params(params)?;
        let charts = exchange.get_mini_charts(&query).await?;
        let summary = format!("Retrieved mini charts for {} assets", query.assets.len());
        Ok(ToolOutput::new(summary, charts))
    })
}

fn get_chart(exchange: &dyn Exchange, params: Params) -> BoxFuture<'_, Result<ToolOutput, ToolError>> {
    Box::pin(async move {
        let query: ChartQuery = parse_params(params)?;
        let candles = exchange.get_chart(&query).await?;
        Ok(ToolOutput::new(format!("Retrieved {} chart", query.symbol), candles))
    })
}
