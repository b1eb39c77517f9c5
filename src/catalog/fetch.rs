//! Catalog fetch - the single remote read feeding the catalog slice.
//!
//! A fetch is an explicit async task that resolves to a [`FetchOutcome`].
//! The outcome is handed to the synchronous reducer by the caller (see
//! `Store::complete_fetch`). There is no cancellation: if two fetches
//! overlap, whichever outcome is applied last wins.
//!
//! ## Example
//!
//! ```ignore
//! use storefront_state::{fetch_products, HttpProductSource, Store, StoreConfig};
//!
//! let source = HttpProductSource::from_config(&StoreConfig::default())?;
//! store.begin_fetch();
//! let outcome = fetch_products(&source).await;
//! store.complete_fetch(outcome);
//! ```

use std::fmt;
use std::future::Future;

use super::Product;

/// The only fetch failure message shown to users.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch products";

/// Error type for catalog reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport failure: DNS, connect, timeout, TLS.
    Network(String),
    /// The endpoint answered with a non-success status.
    Status(u16),
    /// The body was not a list of products.
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "catalog request failed: {}", msg),
            FetchError::Status(code) => write!(f, "catalog endpoint returned status {}", code),
            FetchError::Decode(msg) => write!(f, "catalog response could not be decoded: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// Result of one catalog fetch, ready for the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loaded(Vec<Product>),
    Failed(String),
}

impl FetchOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, FetchOutcome::Loaded(_))
    }
}

/// Anything that can return the full product collection.
pub trait ProductSource {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Product>, FetchError>> + Send;
}

/// Run one fetch against `source`, collapsing every failure into
/// [`FETCH_FAILED_MESSAGE`].
pub async fn fetch_products<S: ProductSource>(source: &S) -> FetchOutcome {
    match source.fetch_all().await {
        Ok(products) => {
            tracing::debug!(count = products.len(), "catalog fetched");
            FetchOutcome::Loaded(products)
        }
        Err(err) => {
            tracing::warn!(error = %err, "catalog fetch failed");
            FetchOutcome::Failed(FETCH_FAILED_MESSAGE.to_string())
        }
    }
}

#[cfg(feature = "http")]
pub use http::HttpProductSource;

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use super::{FetchError, ProductSource};
    use crate::catalog::Product;
    use crate::config::StoreConfig;

    /// Reads `GET <base_url>/products` as a JSON array of products.
    ///
    /// No query parameters are sent; filtering and paging happen client-side.
    #[derive(Debug, Clone)]
    pub struct HttpProductSource {
        client: reqwest::Client,
        base_url: String,
    }

    impl HttpProductSource {
        pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| FetchError::Network(e.to_string()))?;
            Ok(Self {
                client,
                base_url: base_url.into(),
            })
        }

        pub fn from_config(config: &StoreConfig) -> Result<Self, FetchError> {
            Self::new(config.api_base_url.clone(), config.request_timeout)
        }

        pub fn products_url(&self) -> String {
            format!("{}/products", self.base_url.trim_end_matches('/'))
        }
    }

    impl ProductSource for HttpProductSource {
        async fn fetch_all(&self) -> Result<Vec<Product>, FetchError> {
            let response = self
                .client
                .get(self.products_url())
                .send()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }

            response
                .json::<Vec<Product>>()
                .await
                .map_err(|e| FetchError::Decode(e.to_string()))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn products_url_ignores_trailing_slash() {
            let source =
                HttpProductSource::new("https://fakestoreapi.com/", Duration::from_secs(1)).unwrap();
            assert_eq!(source.products_url(), "https://fakestoreapi.com/products");
        }
    }
}
