//! Shared fixtures: a spying stub exchange and registry builders

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use hollaex_provider::config::{Credentials, ExchangeSettings};
use hollaex_provider::error::ExchangeError;
use hollaex_provider::hollaex::{
    ChartQuery, Exchange, ExchangeFactory, ExchangeResult, MiniChartsQuery, NewOrder, OrdersQuery,
    QuickTradeQuery, TradesQuery,
};
use hollaex_provider::tools::ToolRegistry;

/// What the stub answers with
#[derive(Clone)]
pub enum Reply {
    Value(Value),
    Api { status: u16, message: &'static str },
}

/// Call log shared between the factory and every exchange it builds
#[derive(Default)]
pub struct Calls {
    pub connects: AtomicUsize,
    pub calls: Mutex<Vec<String>>,
    pub orders: Mutex<Vec<NewOrder>>,
}

impl Calls {
    pub fn total(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn names(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

pub struct StubExchange {
    reply: Reply,
    calls: Arc<Calls>,
}

impl StubExchange {
    fn answer(&self, op: &str) -> ExchangeResult {
        self.calls.calls.lock().unwrap().push(op.to_string());
        match &self.reply {
            Reply::Value(v) => Ok(v.clone()),
            Reply::Api { status, message } => Err(ExchangeError::Api {
                status: *status,
                message: message.to_string(),
            }),
        }
    }
}

#[async_trait]
impl Exchange for StubExchange {
    async fn get_balance(&self) -> ExchangeResult {
        self.answer("get_balance")
    }
    async fn get_user(&self) -> ExchangeResult {
        self.answer("get_user")
    }
    async fn create_order(&self, order: &NewOrder) -> ExchangeResult {
        self.calls.orders.lock().unwrap().push(order.clone());
        self.answer("create_order")
    }
    async fn cancel_order(&self, _order_id: &str) -> ExchangeResult {
        self.answer("cancel_order")
    }
    async fn cancel_all_orders(&self, _symbol: Option<&str>) -> ExchangeResult {
        self.answer("cancel_all_orders")
    }
    async fn get_order(&self, _order_id: &str) -> ExchangeResult {
        self.answer("get_order")
    }
    async fn get_orders(&self, _query: &OrdersQuery) -> ExchangeResult {
        self.answer("get_orders")
    }
    async fn get_user_trades(&self, _query: &TradesQuery) -> ExchangeResult {
        self.answer("get_user_trades")
    }
    async fn get_ticker(&self, _symbol: &str) -> ExchangeResult {
        self.answer("get_ticker")
    }
    async fn get_tickers(&self) -> ExchangeResult {
        self.answer("get_tickers")
    }
    async fn get_orderbook(&self, _symbol: &str) -> ExchangeResult {
        self.answer("get_orderbook")
    }
    async fn get_orderbooks(&self) -> ExchangeResult {
        self.answer("get_orderbooks")
    }
    async fn get_trades(&self, _symbol: Option<&str>) -> ExchangeResult {
        self.answer("get_trades")
    }
    async fn get_mini_charts(&self, _query: &MiniChartsQuery) -> ExchangeResult {
        self.answer("get_mini_charts")
    }
    async fn get_chart(&self, _query: &ChartQuery) -> ExchangeResult {
        self.answer("get_chart")
    }
    async fn get_quick_trade_quote(&self, _query: &QuickTradeQuery) -> ExchangeResult {
        self.answer("get_quick_trade_quote")
    }
    async fn execute_order(&self, _token: &str) -> ExchangeResult {
        self.answer("execute_order")
    }
}

pub struct StubFactory {
    pub reply: Reply,
    pub calls: Arc<Calls>,
}

impl ExchangeFactory for StubFactory {
    fn connect(&self, _settings: &ExchangeSettings) -> Result<Box<dyn Exchange>, ExchangeError> {
        self.calls.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(StubExchange {
            reply: self.reply.clone(),
            calls: Arc::clone(&self.calls),
        }))
    }
}

pub fn settings(with_credentials: bool) -> ExchangeSettings {
    let mut settings = ExchangeSettings::default();
    settings.credentials = with_credentials.then(|| Credentials::new("key", "secret"));
    settings
}

/// Registry over a stub answering every call with `reply`
pub fn registry(reply: Reply, with_credentials: bool) -> (ToolRegistry, Arc<Calls>) {
    let calls = Arc::new(Calls::default());
    let factory = StubFactory {
        reply,
        calls: Arc::clone(&calls),
    };
    let registry = ToolRegistry::new(Arc::new(settings(with_credentials)), Arc::new(factory));
    (registry, calls)
}

pub fn order(id: &str) -> Value {
    json!({
        "id": id,
        "symbol": "btc-usdt",
        "side": "buy",
        "size": 1,
        "type": "limit",
        "price": 100,
        "status": "new",
        "filled": 0,
        "created_at": "2024-01-01T00:00:00.000Z"
    })
}

pub fn args(value: Value) -> Option<serde_json::Map<String, Value>> {
    value.as_object().cloned()
}
