//! Client configuration.

use std::fmt;
use std::time::Duration;

use crate::error::{IonqError, IonqResult};

/// IonQ production API base URL (versioned).
pub const DEFAULT_ENDPOINT: &str = "https://api.ionq.co/v0.3";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "IONQ_API_KEY";

/// Environment variable overriding the API endpoint.
pub const ENDPOINT_ENV: &str = "IONQ_ENDPOINT";

/// Connection settings for [`IonqClient`](crate::IonqClient).
#[derive(Clone)]
pub struct ClientConfig {
    /// Versioned API base URL, without trailing slash.
    pub endpoint: String,
    /// API key sent as `Authorization: apiKey <key>`.
    pub api_key: String,
    /// Overall timeout applied by the HTTP transport to each request.
    pub timeout: Duration,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Configuration for the production endpoint with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Read `IONQ_API_KEY` and, if set, `IONQ_ENDPOINT`.
    pub fn from_env() -> IonqResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> IonqResult<Self> {
        let api_key = lookup(API_KEY_ENV)
            .filter(|k| !k.is_empty())
            .ok_or(IonqError::MissingApiKey)?;

        let mut config = Self::new(api_key);
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|e| !e.is_empty()) {
            config = config.with_endpoint(endpoint);
        }
        Ok(config)
    }

    /// Target a different base URL (staging, a local test double, ...).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("key");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let config = ClientConfig::new("key").with_endpoint("http://localhost:8080/v0.3/");
        assert_eq!(config.endpoint, "http://localhost:8080/v0.3");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ClientConfig::new("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_from_lookup_missing_key() {
        let err = ClientConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, IonqError::MissingApiKey));

        let err = ClientConfig::from_lookup(|_| Some(String::new())).unwrap_err();
        assert!(matches!(err, IonqError::MissingApiKey));
    }

    #[test]
    fn test_from_lookup_with_endpoint() {
        let config = ClientConfig::from_lookup(|name| match name {
            API_KEY_ENV => Some("abc".into()),
            ENDPOINT_ENV => Some("https://staging.example/v0.3/".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.endpoint, "https://staging.example/v0.3");
    }

    #[test]
    fn test_from_lookup_default_endpoint() {
        let config = ClientConfig::from_lookup(|name| {
            (name == API_KEY_ENV).then(|| "abc".to_string())
        })
        .unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }
}
