//! Server configuration.
//!
//! Read from environment variables at startup. Every setting has a default
//! except the Gemini API key; without one the server falls back to the
//! deterministic policy estimator.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::estimate::{DEFAULT_MODEL, GeminiConfig};

/// Error in a configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}: {message}")]
pub struct ConfigError {
    var: &'static str,
    message: String,
}

/// Configuration for the fare server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Depot directory JSON file.
    pub depots_path: PathBuf,

    /// Rate card JSON file.
    pub rate_card_path: PathBuf,

    /// Gemini API key. `None` selects the policy estimator.
    pub gemini_api_key: Option<String>,

    /// Gemini model name.
    pub gemini_model: String,

    /// Override for the Gemini base URL.
    pub gemini_base_url: Option<String>,

    /// Upper bound on a blended estimate, including the provider call.
    pub estimate_timeout: Duration,

    /// Estimate cache settings.
    pub estimate_cache: CacheConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            depots_path: PathBuf::from("data/depots.json"),
            rate_card_path: PathBuf::from("data/rate_card.json"),
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: None,
            estimate_timeout: Duration::from_secs(20),
            estimate_cache: CacheConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through a variable lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(addr) = get("FARE_BIND_ADDR") {
            config.bind_addr = addr.parse().map_err(|e| ConfigError {
                var: "FARE_BIND_ADDR",
                message: format!("{e}"),
            })?;
        }

        if let Some(path) = get("FARE_DEPOTS_PATH") {
            config.depots_path = PathBuf::from(path);
        }

        if let Some(path) = get("FARE_RATE_CARD_PATH") {
            config.rate_card_path = PathBuf::from(path);
        }

        config.gemini_api_key = get("GEMINI_API_KEY");

        if let Some(model) = get("GEMINI_MODEL") {
            config.gemini_model = model;
        }

        config.gemini_base_url = get("GEMINI_BASE_URL");

        if let Some(secs) = get("FARE_ESTIMATE_TIMEOUT_SECS") {
            config.estimate_timeout =
                Duration::from_secs(parse_secs("FARE_ESTIMATE_TIMEOUT_SECS", &secs)?);
        }

        if let Some(secs) = get("FARE_ESTIMATE_CACHE_TTL_SECS") {
            config.estimate_cache.ttl =
                Duration::from_secs(parse_secs("FARE_ESTIMATE_CACHE_TTL_SECS", &secs)?);
        }

        Ok(config)
    }

    /// Gemini client settings, if an API key is configured.
    pub fn gemini_config(&self) -> Option<GeminiConfig> {
        let key = self.gemini_api_key.as_ref()?;
        let mut config = GeminiConfig::new(key)
            .with_model(&self.gemini_model)
            .with_timeout(self.estimate_timeout.as_secs().max(1));
        if let Some(url) = &self.gemini_base_url {
            config = config.with_base_url(url);
        }
        Some(config)
    }
}

fn parse_secs(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ConfigError {
            var,
            message: format!("expected a positive number of seconds, got {value:?}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| map.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let config = from_vars(&[]).unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.depots_path, PathBuf::from("data/depots.json"));
        assert_eq!(config.rate_card_path, PathBuf::from("data/rate_card.json"));
        assert_eq!(config.gemini_api_key, None);
        assert_eq!(config.gemini_model, DEFAULT_MODEL);
        assert_eq!(config.estimate_timeout, Duration::from_secs(20));
        assert!(config.gemini_config().is_none());
    }

    #[test]
    fn overrides() {
        let config = from_vars(&[
            ("FARE_BIND_ADDR", "0.0.0.0:8080"),
            ("FARE_DEPOTS_PATH", "/srv/depots.json"),
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-pro"),
            ("GEMINI_BASE_URL", "http://localhost:9000"),
            ("FARE_ESTIMATE_TIMEOUT_SECS", "5"),
            ("FARE_ESTIMATE_CACHE_TTL_SECS", "60"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.depots_path, PathBuf::from("/srv/depots.json"));
        assert_eq!(config.estimate_timeout, Duration::from_secs(5));
        assert_eq!(config.estimate_cache.ttl, Duration::from_secs(60));

        let gemini = config.gemini_config().unwrap();
        assert_eq!(gemini.api_key, "secret");
        assert_eq!(gemini.model, "gemini-pro");
        assert_eq!(gemini.base_url, "http://localhost:9000");
        assert_eq!(gemini.timeout_secs, 5);
    }

    #[test]
    fn blank_values_ignored() {
        let config = from_vars(&[("GEMINI_API_KEY", "  "), ("FARE_DEPOTS_PATH", "")]).unwrap();
        assert_eq!(config.gemini_api_key, None);
        assert_eq!(config.depots_path, PathBuf::from("data/depots.json"));
    }

    #[test]
    fn invalid_values_rejected() {
        let err = from_vars(&[("FARE_BIND_ADDR", "not-an-address")]).unwrap_err();
        assert!(err.to_string().starts_with("invalid FARE_BIND_ADDR"));

        for value in ["0", "-3", "soon"] {
            let err = from_vars(&[("FARE_ESTIMATE_TIMEOUT_SECS", value)]).unwrap_err();
            assert!(err.to_string().contains("FARE_ESTIMATE_TIMEOUT_SECS"), "{value}");
        }
    }
}
