//! Explicit fetcher configuration.
//!
//! The fetcher never reads the process environment itself; callers build a
//! [`TibberConfig`] once (usually via [`TibberConfig::from_env`]) and hand it in.

use crate::ConfigError;

pub const TOKEN_VAR: &str = "TIBBER_API_TOKEN";
pub const ENDPOINT_VAR: &str = "TIBBER_API_URL";
pub const PAGE_SIZE_VAR: &str = "TIBBER_PAGE_SIZE";

pub const DEFAULT_ENDPOINT: &str = "https://api.tibber.com/v1-beta/gql";
/// One month of hours (31 * 24), the upstream per-request ceiling we stay under.
pub const DEFAULT_PAGE_SIZE: u32 = 744;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Clone, PartialEq, Eq)]
pub struct TibberConfig {
    pub api_token: String,
    pub endpoint: String,
    pub page_size: u32,
    pub timeout_ms: u64,
}

// Keeps the token out of logs and panic messages.
impl std::fmt::Debug for TibberConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TibberConfig")
            .field("api_token", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("page_size", &self.page_size)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl TibberConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            endpoint: String::from(DEFAULT_ENDPOINT),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Reads `TIBBER_API_TOKEN` (required), `TIBBER_API_URL` and `TIBBER_PAGE_SIZE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingCredential {
                variable: TOKEN_VAR,
            })?;

        let mut config = Self::new(token.trim());

        if let Some(endpoint) = lookup(ENDPOINT_VAR).filter(|value| !value.trim().is_empty()) {
            config = config.with_endpoint(endpoint.trim());
        }

        if let Some(raw) = lookup(PAGE_SIZE_VAR) {
            config.page_size = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigError::InvalidValue {
                    variable: PAGE_SIZE_VAR,
                    value: raw,
                })?;
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_token.trim().is_empty() {
            return Err(ConfigError::MissingCredential {
                variable: TOKEN_VAR,
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::invalid_argument(
                "page size must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_token_is_a_configuration_error() {
        let err = TibberConfig::from_lookup(lookup_from(&[])).expect_err("must fail");
        assert_eq!(err, ConfigError::MissingCredential { variable: TOKEN_VAR });
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let err = TibberConfig::from_lookup(lookup_from(&[(TOKEN_VAR, "  ")])).expect_err("must fail");
        assert!(matches!(err, ConfigError::MissingCredential { .. }));
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let config = TibberConfig::from_lookup(lookup_from(&[(TOKEN_VAR, "abc")])).expect("valid");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.page_size, 744);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn overrides_are_read() {
        let config = TibberConfig::from_lookup(lookup_from(&[
            (TOKEN_VAR, "abc"),
            (ENDPOINT_VAR, "http://localhost:8080/gql"),
            (PAGE_SIZE_VAR, "48"),
        ]))
        .expect("valid");
        assert_eq!(config.endpoint, "http://localhost:8080/gql");
        assert_eq!(config.page_size, 48);
    }

    #[test]
    fn rejects_zero_page_size_override() {
        let err = TibberConfig::from_lookup(lookup_from(&[(TOKEN_VAR, "abc"), (PAGE_SIZE_VAR, "0")]))
            .expect_err("must fail");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn debug_output_redacts_token() {
        let rendered = format!("{:?}", TibberConfig::new("secret-token"));
        assert!(!rendered.contains("secret-token"));
    }
}
