//! HollaEx API Client
//!
//! The exchange delegate: a signed REST client behind the [`Exchange`] trait.

pub mod client;
pub mod exchange;
pub mod types;

// Re-export commonly used types
pub use client::HollaexClient;
pub use exchange::{Exchange, ExchangeFactory, ExchangeResult, HollaexConnector};
pub use types::{
    ChartQuery, ChartResolution, MiniChartsQuery, NewOrder, OrderMeta, OrderSide, OrderType,
    OrdersQuery, QuickTradeQuery, SortOrder, TradesQuery,
};
