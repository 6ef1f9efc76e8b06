//! In-memory cache store implementation

use std::collections::HashMap;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use super::CacheStore;
use crate::time::{Clock, SystemClock};

/// Entry stored with its absolute expiry time
#[derive(Debug, Clone)]
struct StoreEntry {
    value: Value,
    expires_at: SystemTime,
}

/// Thread-safe in-memory [`CacheStore`] with lazy expiry.
///
/// Expired entries are dropped on the next read touching the store. Generic
/// over [`Clock`] so TTL behavior can be driven by a `MockClock` in tests.
pub struct MemoryCacheStore<C: Clock = SystemClock> {
    entries: RwLock<HashMap<String, StoreEntry>>,
    clock: C,
}

impl MemoryCacheStore<SystemClock> {
    /// Create a store backed by the system clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryCacheStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryCacheStore<C> {
    /// Create a store with a custom clock (for testing)
    pub fn with_clock(clock: C) -> Self {
        Self { entries: RwLock::new(HashMap::new()), clock }
    }

    fn prune(&self) {
        let now = self.clock.system_time();
        self.entries.write().retain(|_, entry| entry.expires_at > now);
    }
}

#[async_trait]
impl<C: Clock> CacheStore for MemoryCacheStore<C> {
    async fn get(&self, key: &str) -> Option<Value> {
        self.prune();
        self.entries.read().get(key).map(|entry| entry.value.clone())
    }

    async fn has(&self, key: &str) -> bool {
        self.prune();
        self.entries.read().contains_key(key)
    }

    async fn set(&self, key: &str, value: Value, ttl: Duration) {
        let entry = StoreEntry { value, expires_at: self.clock.system_time() + ttl };
        self.entries.write().insert(key.to_string(), entry);
    }

    async fn delete(&self, key: &str) {
        self.entries.write().remove(key);
    }
}
