//! StoreConfig - Endpoint, paging and persistence settings.

use std::time::Duration;

use crate::catalog::view::DEFAULT_PAGE_SIZE;

pub const DEFAULT_API_BASE_URL: &str = "https://fakestoreapi.com";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_PERSIST_KEY: &str = "persist:root";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Catalog host; products are read from `<api_base_url>/products`.
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// Products revealed per "load more"; at least 1.
    pub page_size: usize,
    /// Blob store key holding the persisted cart.
    pub persist_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            page_size: DEFAULT_PAGE_SIZE,
            persist_key: DEFAULT_PERSIST_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Defaults overridden by `STOREFRONT_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each
    /// `STOREFRONT_*` key. Unparseable values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("STOREFRONT_API_BASE_URL").filter(|v| !v.is_empty()) {
            config.api_base_url = url;
        }
        let timeout_ms = lookup("STOREFRONT_REQUEST_TIMEOUT_MS");
        if let Some(ms) = parse_positive("STOREFRONT_REQUEST_TIMEOUT_MS", timeout_ms) {
            config.request_timeout = Duration::from_millis(ms as u64);
        }
        let page_size = lookup("STOREFRONT_PAGE_SIZE");
        if let Some(size) = parse_positive("STOREFRONT_PAGE_SIZE", page_size) {
            config.page_size = size;
        }
        if let Some(key) = lookup("STOREFRONT_PERSIST_KEY").filter(|v| !v.is_empty()) {
            config.persist_key = key;
        }

        config
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the page size. Zero is raised to 1.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    pub fn with_persist_key(mut self, key: impl Into<String>) -> Self {
        self.persist_key = key.into();
        self
    }
}

fn parse_positive(name: &str, value: Option<String>) -> Option<usize> {
    let value = value?;
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            tracing::warn!(variable = name, value = %value, "ignoring invalid setting");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_public_catalog() {
        let config = StoreConfig::default();
        assert_eq!(config.api_base_url, "https://fakestoreapi.com");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.page_size, 5);
        assert_eq!(config.persist_key, "persist:root");
    }

    #[test]
    fn lookup_overrides_defaults() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("STOREFRONT_API_BASE_URL", "http://localhost:8080"),
            ("STOREFRONT_REQUEST_TIMEOUT_MS", "250"),
            ("STOREFRONT_PAGE_SIZE", "20"),
            ("STOREFRONT_PERSIST_KEY", "persist:test"),
        ]));
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.request_timeout, Duration::from_millis(250));
        assert_eq!(config.page_size, 20);
        assert_eq!(config.persist_key, "persist:test");
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("STOREFRONT_PAGE_SIZE", "0"),
            ("STOREFRONT_REQUEST_TIMEOUT_MS", "soon"),
            ("STOREFRONT_API_BASE_URL", ""),
        ]));
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn builder_clamps_page_size() {
        let config = StoreConfig::default().with_page_size(0);
        assert_eq!(config.page_size, 1);
    }
}
