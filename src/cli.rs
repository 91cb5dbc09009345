//! Command-line interface parsing for shopcache
//!
//! This module handles parsing of CLI arguments using clap and turns them into a
//! `Config` that knows how to build the storage, client and product cache.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::cache::CacheManager;
use crate::data::{ProductsClient, DEFAULT_PRODUCTS_URL};
use crate::store::{ProductCache, ProductLoader};

/// Error types for CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    /// No product with the requested id in the loaded list
    #[error("Unknown product id: {0}")]
    UnknownProduct(i64),
}

/// shopcache - Browse a product catalogue with an offline copy
#[derive(Parser, Debug)]
#[command(name = "shopcache")]
#[command(about = "Load a product catalogue, keeping the last good copy on disk")]
#[command(version)]
pub struct Cli {
    /// Directory for the cached snapshot (defaults to the XDG cache directory)
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Catalogue endpoint returning a JSON array of products
    #[arg(long, value_name = "URL", default_value = DEFAULT_PRODUCTS_URL)]
    pub url: String,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Never read or write the cached snapshot
    #[arg(long, conflicts_with = "cache_dir")]
    pub no_cache: bool,

    /// Show debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands; `list` runs when none is given
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print every product
    List,
    /// Print one product in full
    Show {
        /// Product id
        id: i64,
    },
    /// Fetch from the endpoint even if a cached copy exists
    Refresh,
    /// Delete the cached copy
    Clear,
    /// Describe the cached copy
    Status,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Catalogue endpoint
    pub url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Where the snapshot lives; `None` disables caching
    pub cache_dir: Option<PathBuf>,
    /// What to do
    pub command: Command,
    /// Whether debug logging was requested
    pub verbose: bool,
}

impl Config {
    /// Creates a Config from parsed CLI arguments.
    ///
    /// Without `--cache-dir` the XDG cache directory is used; if that cannot be
    /// determined, caching is disabled.
    pub fn from_cli(cli: &Cli) -> Self {
        let cache_dir = if cli.no_cache {
            None
        } else {
            cli.cache_dir
                .clone()
                .or_else(|| CacheManager::new().map(|cache| cache.cache_dir().to_path_buf()))
        };

        Config {
            url: cli.url.clone(),
            timeout: Duration::from_secs(cli.timeout),
            cache_dir,
            command: cli.command.unwrap_or(Command::List),
            verbose: cli.verbose,
        }
    }

    /// Storage for the configured cache directory
    pub fn storage(&self) -> Option<CacheManager> {
        self.cache_dir.clone().map(CacheManager::with_dir)
    }

    /// HTTP client for the configured endpoint
    pub fn client(&self) -> ProductsClient {
        ProductsClient::with_base_url(self.url.clone()).with_timeout(self.timeout)
    }

    /// An empty product cache wired to this configuration
    pub fn product_cache(&self) -> ProductCache {
        ProductCache::new(ProductLoader::new(self.storage(), self.client()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["shopcache"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.url, "https://fakestoreapi.com/products");
        assert_eq!(cli.timeout, 10);
        assert!(!cli.no_cache);
    }

    #[test]
    fn test_cli_parse_show_with_id() {
        let cli = Cli::parse_from(["shopcache", "show", "42"]);
        assert_eq!(cli.command, Some(Command::Show { id: 42 }));
    }

    #[test]
    fn test_cli_parse_global_options() {
        let cli = Cli::parse_from([
            "shopcache",
            "--cache-dir",
            "/tmp/shop",
            "--url",
            "http://localhost:8080/items",
            "--timeout",
            "3",
            "-v",
            "refresh",
        ]);
        assert_eq!(cli.cache_dir, Some(PathBuf::from("/tmp/shop")));
        assert_eq!(cli.url, "http://localhost:8080/items");
        assert_eq!(cli.timeout, 3);
        assert!(cli.verbose);
        assert_eq!(cli.command, Some(Command::Refresh));
    }

    #[test]
    fn test_cli_rejects_zero_timeout() {
        assert!(Cli::try_parse_from(["shopcache", "--timeout", "0"]).is_err());
    }

    #[test]
    fn test_cli_rejects_no_cache_with_cache_dir() {
        assert!(Cli::try_parse_from(["shopcache", "--no-cache", "--cache-dir", "/tmp/x"]).is_err());
    }

    #[test]
    fn test_cli_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["shopcache", "show", "abc"]).is_err());
    }

    #[test]
    fn test_config_defaults_to_list() {
        let cli = Cli::parse_from(["shopcache", "--cache-dir", "/tmp/shop"]);
        let config = Config::from_cli(&cli);
        assert_eq!(config.command, Command::List);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.cache_dir, Some(PathBuf::from("/tmp/shop")));
    }

    #[test]
    fn test_config_no_cache_disables_storage() {
        let cli = Cli::parse_from(["shopcache", "--no-cache", "status"]);
        let config = Config::from_cli(&cli);
        assert!(config.cache_dir.is_none());
        assert!(config.storage().is_none());
        assert!(config.product_cache().loader().storage().is_none());
    }

    #[test]
    fn test_config_builds_client_for_url() {
        let cli = Cli::parse_from(["shopcache", "--url", "http://127.0.0.1:1/p"]);
        let config = Config::from_cli(&cli);
        assert_eq!(config.client().base_url(), "http://127.0.0.1:1/p");
    }

    #[test]
    fn test_unknown_product_error_message() {
        let err = CliError::UnknownProduct(99);
        assert_eq!(err.to_string(), "Unknown product id: 99");
    }
}
