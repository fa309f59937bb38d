//! API Credential Management
//!
//! HollaEx API credentials loaded from the environment.
//! Credentials are never logged and are masked when displayed.

use std::fmt;

use super::Lookup;

pub const API_KEY_VAR: &str = "HOLLAEX_API_KEY";
pub const API_SECRET_VAR: &str = "HOLLAEX_API_SECRET";

/// Secure string wrapper that masks sensitive data in logs
///
/// Debug output shows only `SecretString(***)` and Display shows the
/// truncated form `first4...last4`.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: String) -> Self {
        SecretString(value)
    }

    /// Returns a reference to the inner string
    ///
    /// Only use this when building a signed request. Never log the result.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Returns a masked version of the secret for safe logging
    pub fn masked(&self) -> String {
        let s = &self.0;
        if s.chars().count() <= 8 {
            return "***".to_string();
        }
        let head: String = s.chars().take(4).collect();
        let tail: String = s.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
        format!("{}...{}", head, tail)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString(***)")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

/// HollaEx API credentials
#[derive(Clone, Debug)]
pub struct Credentials {
    /// API key sent in the `api-key` header
    pub api_key: SecretString,
    /// Secret used to compute `api-signature`
    pub api_secret: SecretString,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_secret: SecretString::new(api_secret.into()),
        }
    }

    /// Reads `HOLLAEX_API_KEY` and `HOLLAEX_API_SECRET`.
    ///
    /// Values are trimmed. Returns `None` unless both are present and
    /// non-empty; a half-configured pair is reported once as a warning.
    pub fn from_lookup(lookup: &Lookup<'_>) -> Option<Self> {
        let api_key = lookup(API_KEY_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let api_secret = lookup(API_SECRET_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        match (api_key, api_secret) {
            (Some(key), Some(secret)) => Some(Self::new(key, secret)),
            (None, None) => None,
            (Some(_), None) => {
                tracing::warn!("{} is set but {} is missing", API_KEY_VAR, API_SECRET_VAR);
                None
            }
            (None, Some(_)) => {
                tracing::warn!("{} is set but {} is missing", API_SECRET_VAR, API_KEY_VAR);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masking() {
        let secret = SecretString::new("abcdefghijklmnop".to_string());
        assert_eq!(secret.masked(), "abcd...mnop");
        assert_eq!(format!("{:?}", secret), "SecretString(***)");
        assert_eq!(SecretString::new("short".to_string()).masked(), "***");
    }

    #[test]
    fn test_from_lookup_requires_both() {
        let only_key = |key: &str| (key == API_KEY_VAR).then(|| "key".to_string());
        assert!(Credentials::from_lookup(&only_key).is_none());

        let both = |key: &str| match key {
            API_KEY_VAR => Some("  my-key ".to_string()),
            API_SECRET_VAR => Some("my-secret".to_string()),
            _ => None,
        };
        let creds = Credentials::from_lookup(&both).unwrap();
        assert_eq!(creds.api_key.expose_secret(), "my-key");
        assert_eq!(creds.api_secret.expose_secret(), "my-secret");
    }

    #[test]
    fn test_blank_values_are_absent() {
        let blank = |_: &str| Some("   ".to_string());
        assert!(Credentials::from_lookup(&blank).is_none());
    }
}
