//! Product list loading with a persisted last-known-good snapshot
//!
//! `ProductLoader` does the I/O: it prefers the snapshot stored on disk, falls back
//! to the catalogue endpoint, and persists what it fetched. `ProductCache` owns the
//! in-memory list and is the only thing that mutates it. Loads started in the
//! background through `spawn_load` hand their result back as a `PendingLoad`, and
//! the owner applies it from its own context with `apply`.

use std::io;

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::cache::CacheManager;
use crate::data::{decode_products, encode_products, FetchError, Product, ProductsClient};

/// Storage key holding the last successfully loaded product list
pub const PRODUCTS_KEY: &str = "products";

/// Where a snapshot came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Served from the persisted snapshot without touching the network
    Cache,
    /// Fetched from the catalogue endpoint
    Network,
}

/// A complete product list ready to replace the in-memory state
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub source: LoadSource,
    pub products: Vec<Product>,
}

/// Errors that can occur while loading products
#[derive(Debug, Error)]
pub enum LoadError {
    /// Neither the cache nor the endpoint produced a product list
    #[error("Failed to fetch products: {0}")]
    Fetch(#[from] FetchError),

    /// The background load task panicked or was cancelled
    #[error("Load task did not complete: {0}")]
    Aborted(String),
}

/// Resolves product snapshots from storage and the network
///
/// Holds no product state of its own, so it can be cloned into background tasks.
#[derive(Debug, Clone)]
pub struct ProductLoader {
    /// Persistent storage; `None` disables caching entirely
    storage: Option<CacheManager>,
    /// Catalogue endpoint client
    client: ProductsClient,
}

impl ProductLoader {
    /// Creates a loader over the given storage and client
    pub fn new(storage: Option<CacheManager>, client: ProductsClient) -> Self {
        Self { storage, client }
    }

    /// The storage backing this loader, if any
    pub fn storage(&self) -> Option<&CacheManager> {
        self.storage.as_ref()
    }

    /// The catalogue client
    pub fn client(&self) -> &ProductsClient {
        &self.client
    }

    /// Reads the persisted snapshot
    ///
    /// A missing entry and an entry that fails to decode both yield `None`.
    pub fn read_cached(&self) -> Option<Vec<Product>> {
        let storage = self.storage.as_ref()?;
        let Some(raw) = storage.read_raw(PRODUCTS_KEY) else {
            tracing::debug!("no cached products");
            return None;
        };

        match decode_products(&raw) {
            Ok(products) => {
                tracing::debug!(count = products.len(), "cache hit");
                Some(products)
            }
            Err(e) => {
                tracing::warn!(error = %e, "cached products are unreadable, ignoring");
                None
            }
        }
    }

    /// Fetches from the endpoint, persisting the result on success
    ///
    /// Storage write failures are logged and do not fail the fetch.
    pub async fn fetch_fresh(&self) -> Result<Snapshot, LoadError> {
        let products = self.client.fetch_products().await?;
        self.save(&products);

        Ok(Snapshot {
            source: LoadSource::Network,
            products,
        })
    }

    /// Resolves a snapshot: persisted copy first, then the network
    pub async fn resolve(&self) -> Result<Snapshot, LoadError> {
        if let Some(products) = self.read_cached() {
            return Ok(Snapshot {
                source: LoadSource::Cache,
                products,
            });
        }

        self.fetch_fresh().await
    }

    /// Encodes `products` and writes them to storage, overwriting any prior value
    ///
    /// Succeeds trivially when the loader has no storage.
    pub fn try_save(&self, products: &[Product]) -> io::Result<()> {
        let Some(storage) = self.storage.as_ref() else {
            return Ok(());
        };

        let json =
            encode_products(products).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        storage.write_raw(PRODUCTS_KEY, &json)
    }

    /// Like `try_save`, but failures are only logged
    pub fn save(&self, products: &[Product]) {
        if let Err(e) = self.try_save(products) {
            tracing::warn!(error = %e, "failed to persist products");
        }
    }

    /// Removes the persisted snapshot
    ///
    /// Returns whether anything was removed.
    pub fn clear(&self) -> io::Result<bool> {
        match self.storage.as_ref() {
            Some(storage) => storage.remove(PRODUCTS_KEY),
            None => Ok(false),
        }
    }
}

/// Handle to a load running on a background task
///
/// Resolves exactly once, through `wait`.
#[derive(Debug)]
pub struct PendingLoad {
    handle: JoinHandle<Result<Snapshot, LoadError>>,
}

impl PendingLoad {
    /// Waits for the load to finish and returns its outcome
    pub async fn wait(self) -> Result<Snapshot, LoadError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(LoadError::Aborted(e.to_string())),
        }
    }
}

/// Identifies an observer registered with `ProductCache::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn Fn(&[Product]) + Send>;

/// Owns the in-memory product list
///
/// The list is either empty (nothing loaded yet) or the complete result of the most
/// recent successful load. It is only ever replaced wholesale.
pub struct ProductCache {
    loader: ProductLoader,
    products: Vec<Product>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl std::fmt::Debug for ProductCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductCache")
            .field("loader", &self.loader)
            .field("products", &self.products.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ProductCache {
    /// Creates an empty cache backed by `loader`
    pub fn new(loader: ProductLoader) -> Self {
        Self {
            loader,
            products: Vec::new(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The current snapshot
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product in the current snapshot
    pub fn find(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// The loader this cache resolves snapshots with
    pub fn loader(&self) -> &ProductLoader {
        &self.loader
    }

    /// Registers a callback invoked with the new list after every successful load
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: Fn(&[Product]) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes a previously registered callback
    ///
    /// Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Loads products, preferring the persisted snapshot
    ///
    /// On failure the in-memory list and storage are left untouched.
    pub async fn load(&mut self) -> Result<LoadSource, LoadError> {
        let result = self.loader.resolve().await;
        self.apply(result)
    }

    /// Fetches from the endpoint, ignoring any persisted snapshot
    ///
    /// The persisted snapshot is only replaced if the fetch succeeds.
    pub async fn refresh(&mut self) -> Result<LoadSource, LoadError> {
        let result = self.loader.fetch_fresh().await;
        self.apply(result)
    }

    /// Starts a load on a background task
    ///
    /// Nothing in this cache changes until the outcome is passed to `apply`.
    /// Must be called from within a tokio runtime.
    pub fn spawn_load(&self) -> PendingLoad {
        let loader = self.loader.clone();
        PendingLoad {
            handle: tokio::spawn(async move { loader.resolve().await }),
        }
    }

    /// Applies the outcome of a load
    ///
    /// A snapshot replaces the current list and notifies observers; an error is
    /// passed through with no state change, leaving reporting to the caller.
    pub fn apply(&mut self, result: Result<Snapshot, LoadError>) -> Result<LoadSource, LoadError> {
        match result {
            Ok(snapshot) => {
                self.replace(snapshot.products);
                Ok(snapshot.source)
            }
            Err(e) => {
                tracing::debug!(error = %e, "product load failed");
                Err(e)
            }
        }
    }

    /// Persists `products`, ignoring failures
    pub fn save(&self, products: &[Product]) {
        self.loader.save(products);
    }

    /// Persists `products`, reporting failures
    pub fn try_save(&self, products: &[Product]) -> io::Result<()> {
        self.loader.try_save(products)
    }

    /// Removes the persisted snapshot so the next load goes to the network
    pub fn clear(&self) -> io::Result<bool> {
        self.loader.clear()
    }

    fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
        for (_, observer) in &self.observers {
            observer(&self.products);
        }
    }
}
