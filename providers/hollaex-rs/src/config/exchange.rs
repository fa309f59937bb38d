//! HollaEx exchange settings

use std::time::Duration;

use super::{Credentials, Lookup};

pub const DEFAULT_API_URL: &str = "https://api.hollaex.com";
pub const DEFAULT_BASE_PATH: &str = "/v2";
pub const DEFAULT_WS_URL: &str = "wss://api.hollaex.com/stream";
pub const DEFAULT_EXPIRES_AFTER_SECS: u64 = 60;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MAX_EXPIRES_AFTER_SECS: u64 = 86_400;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 3_600;

/// Immutable exchange configuration shared by every delegate
///
/// ## Environment Variables
///
/// - `HOLLAEX_API_URL`: REST origin (default: https://api.hollaex.com)
/// - `HOLLAEX_BASE_PATH`: API prefix, part of the signed path (default: /v2)
/// - `HOLLAEX_WS_URL`: streaming endpoint (default: wss://api.hollaex.com/stream)
/// - `HOLLAEX_API_KEY` / `HOLLAEX_API_SECRET`: credentials (optional)
/// - `HOLLAEX_API_EXPIRES_AFTER`: signature expiry window in seconds, 1 to 86400 (default: 60)
/// - `HOLLAEX_REQUEST_TIMEOUT_SECS`: delegate HTTP timeout, 1 to 3600 (default: 30)
#[derive(Debug, Clone)]
pub struct ExchangeSettings {
    pub api_url: String,
    pub base_path: String,
    pub ws_url: String,
    /// `None` when no complete key/secret pair is configured
    pub credentials: Option<Credentials>,
    pub expires_after_secs: u64,
    pub request_timeout: Duration,
}

impl ExchangeSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(&super::env_lookup)
    }

    /// Builds settings from an arbitrary lookup.
    ///
    /// Never fails: credentials are checked when a private tool runs, and
    /// malformed numbers fall back to their defaults with a warning.
    pub fn from_lookup(lookup: &Lookup<'_>) -> Self {
        let api_url = lookup("HOLLAEX_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let base_path = lookup("HOLLAEX_BASE_PATH")
            .map(|v| normalize_base_path(&v))
            .unwrap_or_else(|| DEFAULT_BASE_PATH.to_string());

        let ws_url = lookup("HOLLAEX_WS_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_WS_URL.to_string());

        let expires_after_secs = parse_or_default(
            lookup,
            "HOLLAEX_API_EXPIRES_AFTER",
            DEFAULT_EXPIRES_AFTER_SECS,
            MAX_EXPIRES_AFTER_SECS,
        );
        let timeout_secs = parse_or_default(
            lookup,
            "HOLLAEX_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
            MAX_REQUEST_TIMEOUT_SECS,
        );

        Self {
            api_url,
            base_path,
            ws_url,
            credentials: Credentials::from_lookup(lookup),
            expires_after_secs,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }
}

impl Default for ExchangeSettings {
    fn default() -> Self {
        Self::from_lookup(&|_: &str| None::<String>)
    }
}

fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Reads a number in `1..=max`; anything else falls back to `default`
fn parse_or_default(lookup: &Lookup<'_>, key: &str, default: u64, max: u64) -> u64 {
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(value) if (1..=max).contains(&value) => value,
            _ => {
                tracing::warn!(key, value = %raw, default, max, "Ignoring invalid value, using default");
                default
            }
        },
    }
}
