//! External cache-store abstraction
//!
//! The API client persists two kinds of values across process restarts: the
//! current access token per audience, and decoded GraphQL responses. Both go
//! through the [`CacheStore`] trait so the embedding application can plug in
//! any durable or distributed cache (Redis, memcached, a database table) by
//! implementing four operations with per-entry expiry.
//!
//! [`MemoryCacheStore`] is the default in-process implementation, suitable
//! for tests and single-instance deployments.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

pub mod memory;

pub use memory::MemoryCacheStore;

/// TTL-aware key-value store used for tokens and cached GraphQL results.
///
/// Keys are opaque strings under the API client's control; values are JSON.
/// Implementations must treat expired entries as absent.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Retrieve a value by key. Returns `None` if absent or expired.
    async fn get(&self, key: &str) -> Option<Value>;

    /// Check whether a live (non-expired) entry exists for the key.
    async fn has(&self, key: &str) -> bool;

    /// Store a value under the key, expiring after `ttl`.
    async fn set(&self, key: &str, value: Value, ttl: Duration);

    /// Remove the entry for the key, if any.
    async fn delete(&self, key: &str);
}
