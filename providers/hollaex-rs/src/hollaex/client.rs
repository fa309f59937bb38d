//! HollaEx HTTP Client
//!
//! HTTP client wrapper for the HollaEx v2 REST API.
//! Provides timeout configuration, user-agent headers, and request signing.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Url};
use serde_json::{json, Value};
use sha2::Sha256;

use crate::config::{Credentials, ExchangeSettings};
use crate::error::ExchangeError;
use crate::hollaex::exchange::{Exchange, ExchangeResult};
use crate::hollaex::types::{
    ChartQuery, MiniChartsQuery, NewOrder, OrdersQuery, QuickTradeQuery, TradesQuery,
};

type HmacSha256 = Hmac<Sha256>;

const USER_AGENT: &str = concat!("hollaex-provider/", env!("CARGO_PKG_VERSION"));

/// Whether an endpoint needs the `api-*` authentication headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Public,
    Signed,
}

/// HollaEx REST API HTTP client
///
/// Built per invocation from [`ExchangeSettings`]; holds no state besides
/// its configuration.
#[derive(Clone)]
pub struct HollaexClient {
    pub(crate) client: Client,
    /// REST origin (default: https://api.hollaex.com)
    pub(crate) api_url: String,
    /// Path prefix included in the signed path (default: /v2)
    pub(crate) base_path: String,
    pub(crate) credentials: Option<Credentials>,
    /// Seconds added to the current time for `api-expires`
    pub(crate) expires_after_secs: u64,
}

impl std::fmt::Debug for HollaexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HollaexClient")
            .field("api_url", &self.api_url)
            .field("base_path", &self.base_path)
            .field("credentials", &self.credentials.as_ref().map(|_| "***"))
            .field("expires_after_secs", &self.expires_after_secs)
            .finish()
    }
}

impl HollaexClient {
    /// Creates a client from the process-wide exchange settings
    ///
    /// # Errors
    /// Returns `ConnectionError` if the underlying HTTP client cannot be built
    pub fn from_settings(settings: &ExchangeSettings) -> Result<Self, ExchangeError> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                ExchangeError::ConnectionError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_url: settings.api_url.clone(),
            base_path: settings.base_path.clone(),
            credentials: settings.credentials.clone(),
            expires_after_secs: settings.expires_after_secs,
        })
    }

    /// Builds the full URL for an endpoint relative to the base path
    fn endpoint_url(
        &self,
        endpoint: &str,
        query: &[(&'static str, String)],
    ) -> Result<Url, ExchangeError> {
        let raw = format!("{}{}{}", self.api_url, self.base_path, endpoint);
        let mut url = Url::parse(&raw)
            .map_err(|e| ExchangeError::ConnectionError(format!("Invalid URL {}: {}", raw, e)))?;

        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }

    /// Unix timestamp (seconds) at which a signature stops being valid
    fn expires_at(&self) -> Result<i64, ExchangeError> {
        i64::try_from(self.expires_after_secs)
            .ok()
            .and_then(|window| chrono::Utc::now().timestamp().checked_add(window))
            .ok_or_else(|| {
                ExchangeError::SigningError(format!(
                    "Expiry window of {}s is out of range",
                    self.expires_after_secs
                ))
            })
    }

    /// Sends one request and returns the JSON payload
    ///
    /// No retries: mutating endpoints must not be replayed by this layer.
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&'static str, String)],
        body: Option<Value>,
        auth: Auth,
    ) -> ExchangeResult {
        let url = self.endpoint_url(endpoint, query)?;
        let body = body.map(|b| serde_json::to_string(&b)).transpose()?;

        tracing::debug!(method = %method, path = url.path(), "Sending HollaEx request");

        let mut request = self.client.request(method.clone(), url.clone());

        if auth == Auth::Signed {
            let credentials = self.credentials.as_ref().ok_or_else(|| {
                ExchangeError::SigningError("API credentials not configured".to_string())
            })?;
            let expires = self.expires_at()?;
            let signature = sign_request(
                credentials.api_secret.expose_secret(),
                method.as_str(),
                &signed_path(&url),
                expires,
                body.as_deref().unwrap_or(""),
            )?;

            request = request
                .header("api-key", credentials.api_key.expose_secret())
                .header("api-signature", signature)
                .header("api-expires", expires.to_string());
        }

        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.as_u16() == 429 {
            return Err(ExchangeError::RateLimitError(
                "Too many requests to HollaEx API.".to_string(),
            ));
        }

        let text = response.text().await?;

        if !status.is_success() {
            return Err(ExchangeError::Api {
                status: status.as_u16(),
                message: error_message(&text).unwrap_or_else(|| status.to_string()),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Path and query exactly as sent, which is what HollaEx signs
fn signed_path(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

/// Generates the HMAC-SHA256 `api-signature`
///
/// The signed message is `METHOD + path + expires + body`, hex encoded.
pub fn sign_request(
    secret: &str,
    method: &str,
    path: &str,
    expires: i64,
    body: &str,
) -> Result<String, ExchangeError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ExchangeError::SigningError(format!("Invalid secret key: {}", e)))?;

    mac.update(method.as_bytes());
    mac.update(path.as_bytes());
    mac.update(expires.to_string().as_bytes());
    mac.update(body.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Extracts `message` from a HollaEx error body
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl Exchange for HollaexClient {
    /// Calls GET /user/balance
    async fn get_balance(&self) -> ExchangeResult {
        self.request(Method::GET, "/user/balance", &[], None, Auth::Signed)
            .await
    }

    /// Calls GET /user
    async fn get_user(&self) -> ExchangeResult {
        self.request(Method::GET, "/user", &[], None, Auth::Signed).await
    }

    /// Calls POST /order
    async fn create_order(&self, order: &NewOrder) -> ExchangeResult {
        let body = serde_json::to_value(order)?;
        self.request(Method::POST, "/order", &[], Some(body), Auth::Signed)
            .await
    }

    /// Calls DELETE /order?order_id=
    async fn cancel_order(&self, order_id: &str) -> ExchangeResult {
        let query = [("order_id", order_id.to_string())];
        self.request(Method::DELETE, "/order", &query, None, Auth::Signed)
            .await
    }

    /// Calls DELETE /order/all, optionally scoped to one market
    async fn cancel_all_orders(&self, symbol: Option<&str>) -> ExchangeResult {
        let query: Vec<(&'static str, String)> = symbol
            .map(|s| vec![("symbol", s.to_string())])
            .unwrap_or_default();
        self.request(Method::DELETE, "/order/all", &query, None, Auth::Signed)
            .await
    }

    /// Calls GET /order?order_id=
    async fn get_order(&self, order_id: &str) -> ExchangeResult {
        let query = [("order_id", order_id.to_string())];
        self.request(Method::GET, "/order", &query, None, Auth::Signed)
            .await
    }

    /// Calls GET /orders
    async fn get_orders(&self, query: &OrdersQuery) -> ExchangeResult {
        self.request(
            Method::GET,
            "/orders",
            &query.query_pairs(),
            None,
            Auth::Signed,
        )
        .await
    }

    /// Calls GET /user/trades
    async fn get_user_trades(&self, query: &TradesQuery) -> ExchangeResult {
        self.request(
            Method::GET,
            "/user/trades",
            &query.query_pairs(),
            None,
            Auth::Signed,
        )
        .await
    }

    /// Calls GET /ticker?symbol=
    async fn get_ticker(&self, symbol: &str) -> ExchangeResult {
        let query = [("symbol", symbol.to_string())];
        self.request(Method::GET, "/ticker", &query, None, Auth::Public)
            .await
    }

    /// Calls GET /tickers
    async fn get_tickers(&self) -> ExchangeResult {
        self.request(Method::GET, "/tickers", &[], None, Auth::Public)
            .await
    }

    /// Calls GET /orderbook?symbol=
    async fn get_orderbook(&self, symbol: &str) -> ExchangeResult {
        let query = [("symbol", symbol.to_string())];
        self.request(Method::GET, "/orderbook", &query, None, Auth::Public)
            .await
    }

    /// Calls GET /orderbooks
    async fn get_orderbooks(&self) -> ExchangeResult {
        self.request(Method::GET, "/orderbooks", &[], None, Auth::Public)
            .await
    }

    /// Calls GET /trades
    async fn get_trades(&self, symbol: Option<&str>) -> ExchangeResult {
        let query: Vec<(&'static str, String)> = symbol
            .map(|s| vec![("symbol", s.to_string())])
            .unwrap_or_default();
        self.request(Method::GET, "/trades", &query, None, Auth::Public)
            .await
    }

    /// Calls GET /minicharts
    async fn get_mini_charts(&self, query: &MiniChartsQuery) -> ExchangeResult {
        self.request(
            Method::GET,
            "/minicharts",
            &query.query_pairs(),
            None,
            Auth::Public,
        )
        .await
    }

    /// Calls GET /chart
    async fn get_chart(&self, query: &ChartQuery) -> ExchangeResult {
        self.request(
            Method::GET,
            "/chart",
            &query.query_pairs(),
            None,
            Auth::Public,
        )
        .await
    }

    /// Calls GET /quick-trade
    async fn get_quick_trade_quote(&self, query: &QuickTradeQuery) -> ExchangeResult {
        self.request(
            Method::GET,
            "/quick-trade",
            &query.query_pairs(),
            None,
            Auth::Signed,
        )
        .await
    }

    /// Calls POST /order/execute with a quote token
    async fn execute_order(&self, token: &str) -> ExchangeResult {
        let body = json!({ "token": token });
        self.request(Method::POST, "/order/execute", &[], Some(body), Auth::Signed)
            .await
    }
}
