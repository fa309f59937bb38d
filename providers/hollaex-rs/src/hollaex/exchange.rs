//! Exchange delegate abstraction
//!
//! Tool handlers talk to the exchange only through [`Exchange`]. A fresh
//! delegate is built for every invocation by an [`ExchangeFactory`], so no
//! two invocations share a mutable client.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ExchangeSettings;
use crate::error::ExchangeError;
use crate::hollaex::client::HollaexClient;
use crate::hollaex::types::{
    ChartQuery, MiniChartsQuery, NewOrder, OrdersQuery, QuickTradeQuery, TradesQuery,
};

pub type ExchangeResult = Result<Value, ExchangeError>;

/// Operations the tool catalog needs from an exchange client.
///
/// Payloads are returned as raw JSON and passed through to the caller.
#[async_trait]
pub trait Exchange: Send + Sync {
    async fn get_balance(&self) -> ExchangeResult;

    async fn get_user(&self) -> ExchangeResult;

    async fn create_order(&self, order: &NewOrder) -> ExchangeResult;

    async fn cancel_order(&self, order_id: &str) -> ExchangeResult;

    async fn cancel_all_orders(&self, symbol: Option<&str>) -> ExchangeResult;

    async fn get_order(&self, order_id: &str) -> ExchangeResult;

    async fn get_orders(&self, query: &OrdersQuery) -> ExchangeResult;

    async fn get_user_trades(&self, query: &TradesQuery) -> ExchangeResult;

    async fn get_ticker(&self, symbol: &str) -> ExchangeResult;

    async fn get_tickers(&self) -> ExchangeResult;

    async fn get_orderbook(&self, symbol: &str) -> ExchangeResult;

    async fn get_orderbooks(&self) -> ExchangeResult;

    async fn get_trades(&self, symbol: Option<&str>) -> ExchangeResult;

    async fn get_mini_charts(&self, query: &MiniChartsQuery) -> ExchangeResult;

    async fn get_chart(&self, query: &ChartQuery) -> ExchangeResult;

    async fn get_quick_trade_quote(&self, query: &QuickTradeQuery) -> ExchangeResult;

    async fn execute_order(&self, token: &str) -> ExchangeResult;
}

/// Builds a stateless delegate from process-wide settings
pub trait ExchangeFactory: Send + Sync {
    fn connect(&self, settings: &ExchangeSettings) -> Result<Box<dyn Exchange>, ExchangeError>;
}

/// Factory producing [`HollaexClient`] delegates
#[derive(Debug, Clone, Copy, Default)]
pub struct HollaexConnector;

impl ExchangeFactory for HollaexConnector {
    fn connect(&self, settings: &ExchangeSettings) -> Result<Box<dyn Exchange>, ExchangeError> {
        Ok(Box::new(HollaexClient::from_settings(settings)?))
    }
}
