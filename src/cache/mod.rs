//! Short-lived storage for API responses.
//!
//! The accessors in [`crate::registry::github`] only see the [`LicenseCache`]
//! trait. Which implementation backs it is decided once in `main`:
//!
//! - [`NoCache`] — every lookup misses.
//! - [`memory::MemoryCache`] — lives as long as the process.
//! - [`disk::DiskCache`] — JSON files under the user cache directory, shared
//!   between runs.

use std::time::Duration;

use serde_json::Value;

pub mod disk;
pub mod memory;

/// Default lifetime of a cached response.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

pub trait LicenseCache: Send + Sync {
    /// Return the value stored under `key`, or `None` if there is none or it
    /// has expired.
    fn get(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key` for `ttl`, replacing any previous entry.
    fn put(&self, key: &str, value: Value, ttl: Duration);
}

/// A cache that never holds anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

impl LicenseCache for NoCache {
    fn get(&self, _key: &str) -> Option<Value> {
        None
    }

    fn put(&self, _key: &str, _value: Value, _ttl: Duration) {}
}
