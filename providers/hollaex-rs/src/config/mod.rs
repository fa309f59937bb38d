//! Configuration Management
//!
//! Process-wide configuration is read once at startup into immutable
//! structs. Every loader goes through a [`Lookup`] so tests can inject
//! fixtures without touching the process environment.

pub mod credentials;
pub mod exchange;
pub mod server;

pub use credentials::{Credentials, SecretString};
pub use exchange::ExchangeSettings;
pub use server::{ServerConfig, TransportMode};

/// Source of configuration values, keyed by environment variable name
pub type Lookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

/// Reads values from the process environment
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
