//! Transport Configuration
//!
//! Transport selection and HTTP listener settings.

use std::fmt;
use std::str::FromStr;

use super::Lookup;
use crate::error::ConfigError;

pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
pub const DEFAULT_HTTP_PORT: u16 = 3000;

/// Transport mode selection for the MCP server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportMode {
    /// Line-delimited JSON-RPC on stdin/stdout
    #[default]
    Stdio,
    /// JSON-RPC over HTTP POST
    Http,
}

impl FromStr for TransportMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdio" => Ok(TransportMode::Stdio),
            "http" => Ok(TransportMode::Http),
            _ => Err(ConfigError::InvalidValue {
                key: "MCP_TRANSPORT",
                value: s.to_string(),
                reason: "expected stdio or http".to_string(),
            }),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Stdio => write!(f, "stdio"),
            TransportMode::Http => write!(f, "http"),
        }
    }
}

/// Server configuration
///
/// ## Environment Variables
///
/// - `MCP_TRANSPORT`: `stdio` or `http` (default: stdio)
/// - `HTTP_HOST`: bind address for HTTP mode (default: 0.0.0.0)
/// - `PORT`: listen port for HTTP mode (default: 3000)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub mode: TransportMode,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&super::env_lookup)
    }

    /// Unlike exchange settings, bad transport values fail startup
    pub fn from_lookup(lookup: &Lookup<'_>) -> Result<Self, ConfigError> {
        let mode = match lookup("MCP_TRANSPORT") {
            Some(raw) => raw.parse::<TransportMode>()?,
            None => TransportMode::default(),
        };

        let host = lookup("HTTP_HOST")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_HTTP_HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => parse_port("PORT", &raw)?,
            None => DEFAULT_HTTP_PORT,
        };

        Ok(Self { mode, host, port })
    }

    /// Listener target as `host:port`; names and IPv6 literals resolve at bind time
    pub fn bind_target(&self) -> (String, u16) {
        let host = self
            .host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(&self.host);
        (host.to_string(), self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            mode: TransportMode::default(),
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

pub fn parse_port(key: &'static str, raw: &str) -> Result<u16, ConfigError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|e| ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ServerConfig::from_lookup(&|_: &str| None::<String>).expect("Failed to load config");

        assert_eq!(config.mode, TransportMode::Stdio);
        assert_eq!(config.bind_target(), ("0.0.0.0".to_string(), 3000));
    }

    #[test]
    fn test_http_mode() {
        let lookup = |key: &str| match key {
            "MCP_TRANSPORT" => Some("HTTP".to_string()),
            "HTTP_HOST" => Some("127.0.0.1".to_string()),
            "PORT" => Some("8080".to_string()),
            _ => None,
        };
        let config = ServerConfig::from_lookup(&lookup).unwrap();

        assert_eq!(config.mode, TransportMode::Http);
        assert_eq!(config.bind_target(), ("127.0.0.1".to_string(), 8080));
    }

    #[test]
    fn test_hostnames_and_ipv6_hosts() {
        let named = |key: &str| (key == "HTTP_HOST").then(|| "localhost".to_string());
        let config = ServerConfig::from_lookup(&named).unwrap();
        assert_eq!(config.bind_target(), ("localhost".to_string(), 3000));

        let v6 = |key: &str| (key == "HTTP_HOST").then(|| "[::1]".to_string());
        let config = ServerConfig::from_lookup(&v6).unwrap();
        assert_eq!(config.bind_target(), ("::1".to_string(), 3000));

        let bare_v6 = |key: &str| (key == "HTTP_HOST").then(|| "::".to_string());
        let config = ServerConfig::from_lookup(&bare_v6).unwrap();
        assert_eq!(config.bind_target(), ("::".to_string(), 3000));
    }

    #[test]
    fn test_invalid_values_fail() {
        let bad_mode = |key: &str| (key == "MCP_TRANSPORT").then(|| "grpc".to_string());
        assert!(ServerConfig::from_lookup(&bad_mode).is_err());

        let bad_port = |key: &str| (key == "PORT").then(|| "70000".to_string());
        assert!(ServerConfig::from_lookup(&bad_port).is_err());
    }
}
