//! Cache module for storing snapshots to disk
//!
//! This module provides a cache manager that persists values to the filesystem as
//! JSON, one file per key. There is no expiry: the last value written for a key is
//! served until it is overwritten or removed.

mod manager;

pub use manager::CacheManager;
