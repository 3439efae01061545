//! Registry client configuration.
//!
//! Defaults point at the production reputation.ru endpoint. Override via
//! environment variables or explicit construction for testing.

use url::Url;
use zeroize::Zeroizing;

/// Production base URL of the registry API.
pub const DEFAULT_BASE_URL: &str = "https://api.reputation.ru/api";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default cap on in-flight search requests during a batch.
pub const DEFAULT_MAX_CONCURRENCY: usize = 16;

/// Configuration for connecting to the registry API.
///
/// Custom `Debug` implementation redacts the `api_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct RegistryConfig {
    /// Base URL of the registry API, including any path prefix.
    pub base_url: Url,
    /// Bearer token for API authentication.
    pub api_token: Zeroizing<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum number of concurrent search requests in a batch.
    pub max_concurrency: usize,
    /// Cap on how many phone numbers / e-mail addresses are retained per
    /// company record. `None` keeps the lists whole.
    pub max_list_fields: Option<usize>,
    /// Skip TLS certificate verification. Some registry gateways serve a
    /// broken certificate chain; off by default.
    pub accept_invalid_certs: bool,
}

impl std::fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("max_concurrency", &self.max_concurrency)
            .field("max_list_fields", &self.max_list_fields)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

impl RegistryConfig {
    /// Create a configuration with defaults for everything but the
    /// endpoint and credential.
    pub fn new(base_url: Url, api_token: impl Into<String>) -> Self {
        Self {
            base_url,
            api_token: Zeroizing::new(api_token.into()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            max_list_fields: None,
            accept_invalid_certs: false,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `REPUTATION_API_TOKEN` (required)
    /// - `REPUTATION_BASE_URL` (default: `https://api.reputation.ru/api`)
    /// - `REPUTATION_TIMEOUT_SECS` (default: 30)
    /// - `REPUTATION_MAX_CONCURRENCY` (default: 16)
    /// - `REPUTATION_MAX_LIST_FIELDS` (default: unlimited; non-positive
    ///   values mean unlimited)
    /// - `REPUTATION_ACCEPT_INVALID_CERTS` (default: false; `1` or `true`
    ///   to enable)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_token =
            std::env::var("REPUTATION_API_TOKEN").map_err(|_| ConfigError::MissingToken)?;

        let mut config = Self::new(env_url("REPUTATION_BASE_URL", DEFAULT_BASE_URL)?, api_token);

        if let Some(secs) = env_parse::<u64>("REPUTATION_TIMEOUT_SECS") {
            config.timeout_secs = secs;
        }
        if let Some(n) = env_parse::<usize>("REPUTATION_MAX_CONCURRENCY") {
            config.max_concurrency = n.max(1);
        }
        config.max_list_fields =
            env_parse::<i64>("REPUTATION_MAX_LIST_FIELDS").and_then(list_field_cap);
        config.accept_invalid_certs = std::env::var("REPUTATION_ACCEPT_INVALID_CERTS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(config)
    }
}

/// Normalize a user-supplied list cap: positive values cap the lists,
/// anything else means unlimited.
pub fn list_field_cap(n: i64) -> Option<usize> {
    usize::try_from(n).ok().filter(|n| *n > 0)
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

fn env_parse<T: std::str::FromStr>(var: &str) -> Option<T> {
    std::env::var(var).ok().and_then(|s| s.parse().ok())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("REPUTATION_API_TOKEN environment variable is required")]
    MissingToken,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("API token contains characters not permitted in an HTTP header")]
    MalformedToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_defaults() {
        let cfg = RegistryConfig::new(DEFAULT_BASE_URL.parse().unwrap(), "test-token");
        assert_eq!(cfg.api_token.as_str(), "test-token");
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(cfg.max_concurrency, DEFAULT_MAX_CONCURRENCY);
        assert_eq!(cfg.max_list_fields, None);
        assert!(!cfg.accept_invalid_certs);
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = RegistryConfig::new(DEFAULT_BASE_URL.parse().unwrap(), "super-secret");
        let rendered = format!("{cfg:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn list_field_cap_rejects_non_positive() {
        assert_eq!(list_field_cap(2), Some(2));
        assert_eq!(list_field_cap(0), None);
        assert_eq!(list_field_cap(-3), None);
    }

    #[test]
    fn env_url_uses_default_when_var_absent() {
        let url = env_url("REPFIND_NONEXISTENT_VAR_12345", "https://example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn env_url_rejects_invalid_url() {
        std::env::set_var("REPFIND_TEST_BAD_URL", "not a url");
        let result = env_url("REPFIND_TEST_BAD_URL", "https://example.com");
        std::env::remove_var("REPFIND_TEST_BAD_URL");
        assert!(result.is_err());
    }
}
