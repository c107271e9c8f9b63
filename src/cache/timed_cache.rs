//! Time-based cache with TTL (Time To Live) support.
//!
//! This module provides a thread-safe map whose entries expire after a fixed
//! duration. It backs the per-session flash slots.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_live(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.inserted_at) < ttl
    }
}

/// A thread-safe cache with time-based expiration.
///
/// Entries older than the TTL are never returned. Clones share the same
/// underlying map.
#[derive(Clone)]
pub struct TimedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    cache: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    ttl: Duration,
}

impl<K, V> TimedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a new TimedCache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Insert a value, replacing any previous value and restarting its clock.
    pub fn insert(&self, key: K, value: V) {
        let entry = CacheEntry {
            value,
            inserted_at: Instant::now(),
        };

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key, entry);
        }
    }

    /// Get a value from the cache if it exists and hasn't expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();

        if let Ok(cache) = self.cache.read() {
            if let Some(entry) = cache.get(key) {
                if entry.is_live(now, self.ttl) {
                    return Some(entry.value.clone());
                }
            }
        }

        None
    }

    /// Remove the entry for `key` and return its value if it hadn't expired.
    ///
    /// Removal and read happen under one write lock, so two concurrent
    /// callers can never both receive the same value.
    pub fn take(&self, key: &K) -> Option<V> {
        let now = Instant::now();

        let mut cache = self.cache.write().ok()?;
        cache
            .remove(key)
            .filter(|entry| entry.is_live(now, self.ttl))
            .map(|entry| entry.value)
    }

    /// Remove a specific key from the cache.
    pub fn remove(&self, key: &K) {
        if let Ok(mut cache) = self.cache.write() {
            cache.remove(key);
        }
    }

    /// Remove all expired entries from the cache.
    ///
    /// Expired entries are already invisible to `get()` and `take()`; this
    /// only frees their memory.
    pub fn cleanup_expired(&self) {
        let now = Instant::now();

        if let Ok(mut cache) = self.cache.write() {
            cache.retain(|_, entry| entry.is_live(now, self.ttl));
        }
    }

    /// Get the number of entries in the cache (including expired ones).
    pub fn len(&self) -> usize {
        if let Ok(cache) = self.cache.read() {
            cache.len()
        } else {
            0
        }
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the TTL duration for this cache.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<K, V> std::fmt::Debug for TimedCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.len())
            .finish()
    }
}
