//! Cache manager for persisting snapshots to disk
//!
//! Provides a `CacheManager` that stores JSON text in files, one file per key.
//! Entries never expire; a write simply replaces the previous value.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Manages reading and writing cached values to disk
///
/// The cache manager stores data as JSON files in an XDG-compliant cache directory
/// (`~/.cache/shopcache/` on Linux). A missing or unreadable file reads as `None`;
/// decoding the stored text is left to the caller.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Creates a new CacheManager using XDG-compliant cache directory
    ///
    /// Uses `~/.cache/shopcache/` on Linux, or equivalent XDG path on other platforms.
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "shopcache")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a new CacheManager with a custom cache directory
    ///
    /// Useful for testing or when a specific cache location is needed.
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Directory where cache files live
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path to a cache file for the given key
    pub fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Reads the stored text for `key`, or `None` if nothing is stored
    pub fn read_raw(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.cache_path(key)).ok()
    }

    /// Stores `value` under `key`, overwriting any previous value
    pub fn write_raw(&self, key: &str, value: &str) -> io::Result<()> {
        self.ensure_dir()?;
        fs::write(self.cache_path(key), value)
    }

    /// Deletes the entry for `key`
    ///
    /// Returns `Ok(false)` when there was nothing to delete.
    pub fn remove(&self, key: &str) -> io::Result<bool> {
        match fs::remove_file(self.cache_path(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Last modification time of the entry for `key`, if it exists
    pub fn modified_at(&self, key: &str) -> Option<DateTime<Utc>> {
        let modified = fs::metadata(self.cache_path(key)).ok()?.modified().ok()?;
        Some(DateTime::<Utc>::from(modified))
    }
}
