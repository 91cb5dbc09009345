//! Product catalogue API client
//!
//! Fetches the full product list from a catalogue endpoint with a single GET
//! and decodes it into `Product` records.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use super::{decode_products, Product};

/// Default catalogue endpoint
pub const DEFAULT_PRODUCTS_URL: &str = "https://fakestoreapi.com/products";

/// Default per-request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when fetching the product list
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("Unexpected HTTP status: {0}")]
    Status(reqwest::StatusCode),

    /// Failed to parse JSON response
    #[error("Failed to parse product list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for fetching products from the catalogue endpoint
#[derive(Debug, Clone)]
pub struct ProductsClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Endpoint URL (allows override for testing)
    base_url: String,
    /// Timeout applied to each request
    timeout: Duration,
}

impl Default for ProductsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductsClient {
    /// Create a new ProductsClient pointed at the public catalogue
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_PRODUCTS_URL)
    }

    /// Create a new ProductsClient with a custom endpoint URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The endpoint this client fetches from
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full product list
    ///
    /// # Returns
    /// * `Ok(Vec<Product>)` - The decoded product list
    /// * `Err(FetchError)` - If the request fails, the status is not 2xx, or the body does not decode
    pub async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        tracing::info!(url = %self.base_url, "fetching products");

        let response = self
            .http_client
            .get(&self.base_url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let text = response.text().await?;
        let products = decode_products(&text)?;

        tracing::debug!(count = products.len(), "decoded product list");
        Ok(products)
    }
}
