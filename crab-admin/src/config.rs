//! Client configuration

use crate::{ClientError, ClientResult};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_SIZE: u32 = 50;

/// Configuration for talking to the tenant admin API
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// API base URL (e.g., "https://tenant.example.com/api")
    pub base_url: String,

    /// Bearer token attached to every request
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Authenticated user's ID, protected from bulk actions on the Users tab.
    /// Fetched from `/auth/me/` when not set.
    pub current_user_id: Option<i64>,

    /// Rows per page for list requests
    pub page_size: u32,

    /// Concurrent per-item requests during bulk actions (1 = sequential)
    pub bulk_concurrency: usize,

    /// Log level (e.g., "info", "debug")
    pub log_level: String,

    /// JSON log output
    pub log_json: bool,
}

impl AdminConfig {
    /// Create a new configuration with defaults
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            current_user_id: None,
            page_size: DEFAULT_PAGE_SIZE,
            bulk_concurrency: 1,
            log_level: "info".to_string(),
            log_json: false,
        }
    }

    /// Load configuration from environment variables (and `.env` if present)
    ///
    /// - `CRAB_ADMIN_URL` (required)
    /// - `CRAB_ADMIN_TOKEN`
    /// - `CRAB_ADMIN_TIMEOUT` (seconds, default 30)
    /// - `CRAB_ADMIN_USER_ID`
    /// - `CRAB_ADMIN_PAGE_SIZE` (default 50)
    /// - `CRAB_ADMIN_BULK_CONCURRENCY` (default 1)
    /// - `LOG_LEVEL` (default "info"), `LOG_JSON` ("true"/"1")
    pub fn from_env() -> ClientResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test map, ...)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let base_url = var("CRAB_ADMIN_URL")
            .ok_or_else(|| ClientError::Config("CRAB_ADMIN_URL must be set".into()))?;
        let mut config = Self::new(base_url);

        config.token = var("CRAB_ADMIN_TOKEN");
        if let Some(timeout) = var("CRAB_ADMIN_TIMEOUT") {
            config.timeout = parse_var("CRAB_ADMIN_TIMEOUT", &timeout)?;
        }
        if let Some(id) = var("CRAB_ADMIN_USER_ID") {
            config.current_user_id = Some(parse_var("CRAB_ADMIN_USER_ID", &id)?);
        }
        if let Some(size) = var("CRAB_ADMIN_PAGE_SIZE") {
            config.page_size = parse_var("CRAB_ADMIN_PAGE_SIZE", &size)?;
        }
        if let Some(limit) = var("CRAB_ADMIN_BULK_CONCURRENCY") {
            config.bulk_concurrency = parse_var::<usize>("CRAB_ADMIN_BULK_CONCURRENCY", &limit)?.max(1);
        }
        if let Some(level) = var("LOG_LEVEL") {
            config.log_level = level;
        }
        config.log_json = var("LOG_JSON").is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

        Ok(config)
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the authenticated user's ID
    pub fn with_current_user(mut self, id: i64) -> Self {
        self.current_user_id = Some(id);
        self
    }

    /// Set the page size
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Set bulk concurrency (clamped to at least 1)
    pub fn with_bulk_concurrency(mut self, limit: usize) -> Self {
        self.bulk_concurrency = limit.max(1);
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::new(self)
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000/api")
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> ClientResult<T> {
    value
        .parse()
        .map_err(|_| ClientError::Config(format!("{key} has invalid value '{value}'")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = AdminConfig::from_lookup(lookup(&[("CRAB_ADMIN_URL", "http://pos.test/api")])).unwrap();
        assert_eq!(config.base_url, "http://pos.test/api");
        assert_eq!(config.timeout, 30);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.bulk_concurrency, 1);
        assert!(config.token.is_none());
        assert!(config.current_user_id.is_none());
        assert!(!config.log_json);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = AdminConfig::from_lookup(lookup(&[
            ("CRAB_ADMIN_URL", "http://pos.test/api"),
            ("CRAB_ADMIN_TOKEN", "abc"),
            ("CRAB_ADMIN_TIMEOUT", "5"),
            ("CRAB_ADMIN_USER_ID", "42"),
            ("CRAB_ADMIN_BULK_CONCURRENCY", "0"),
            ("LOG_JSON", "TRUE"),
        ]))
        .unwrap();
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, 5);
        assert_eq!(config.current_user_id, Some(42));
        assert_eq!(config.bulk_concurrency, 1);
        assert!(config.log_json);
    }

    #[test]
    fn test_missing_url_and_bad_number() {
        assert!(matches!(
            AdminConfig::from_lookup(lookup(&[])),
            Err(ClientError::Config(_))
        ));
        let err = AdminConfig::from_lookup(lookup(&[
            ("CRAB_ADMIN_URL", "http://pos.test"),
            ("CRAB_ADMIN_USER_ID", "me"),
        ]))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: CRAB_ADMIN_USER_ID has invalid value 'me'"
        );
    }
}
