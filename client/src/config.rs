//! Client configuration
//!
//! Loaded from environment variables with defaults for local development.

use crate::error::ClientError;
use reqwest::Url;
use std::time::Duration;

/// Default backend location
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Menu client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin; `/api/menu` is appended to it
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration for the given backend origin
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Config(format!("invalid base url {base_url:?}: {e}")))?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Override the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// - `PARLOUR_API_URL` (default `http://localhost:3001`)
    /// - `PARLOUR_API_TIMEOUT_SECS` (default 10)
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if a variable is set but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("PARLOUR_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = match lookup("PARLOUR_API_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ClientError::Config(format!("PARLOUR_API_TIMEOUT_SECS={raw:?}: {e}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self::new(&base_url)?.with_timeout(Duration::from_secs(timeout)))
    }

    /// Absolute URL for an API path such as `/api/menu/3`
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.base_url.as_str(), "http://localhost:3001/");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("PARLOUR_API_URL", "https://parlour.test/shop/"),
            ("PARLOUR_API_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint("/api/menu"), "https://parlour.test/shop/api/menu");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_url = ClientConfig::from_lookup(lookup(&[("PARLOUR_API_URL", "not a url")]));
        assert!(matches!(bad_url, Err(ClientError::Config(_))));

        let bad_timeout =
            ClientConfig::from_lookup(lookup(&[("PARLOUR_API_TIMEOUT_SECS", "soon")]));
        assert!(matches!(bad_timeout, Err(ClientError::Config(_))));
    }
}
