//! shopcache library
//!
//! Loads a product catalogue from a remote endpoint, serving the last good copy
//! from disk when one exists. Exposed as a library for the binary and for
//! integration tests.

pub mod cache;
pub mod cli;
pub mod data;
pub mod render;
pub mod store;
