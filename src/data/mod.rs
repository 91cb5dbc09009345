//! Core data model for shopcache
//!
//! This module contains the `Product` record and the JSON codec used both for
//! the catalogue endpoint's response body and for the cached snapshot on disk.

pub mod products;

pub use products::{FetchError, ProductsClient, DEFAULT_PRODUCTS_URL};

use serde::{Deserialize, Serialize};

/// A single catalogue entry
///
/// Field names match the JSON wire format exactly. Extra fields sent by the
/// endpoint (such as `rating`) are ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier for the product
    pub id: i64,
    /// Display name
    pub title: String,
    /// Unit price
    pub price: f64,
    /// Long-form description
    pub description: String,
    /// Category name, e.g. "men's clothing"
    pub category: String,
    /// URL of the product image
    pub image: String,
}

/// Encodes a product list as a JSON array
pub fn encode_products(products: &[Product]) -> Result<String, serde_json::Error> {
    serde_json::to_string(products)
}

/// Decodes a JSON array into a product list
///
/// A single malformed record fails the whole payload.
pub fn decode_products(json: &str) -> Result<Vec<Product>, serde_json::Error> {
    serde_json::from_str(json)
}
