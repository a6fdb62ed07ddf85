//! In-memory TTL cache backed by `DashMap`, plus a caching store wrapper.
//!
//! The engine is stateless; caching lives at the storage boundary only.
//! Cached values are serialized mediator documents keyed by id, so a
//! process serving repeated conflict checks does not re-query the store
//! for the same mediators.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;

use crate::store::{MediatorStore, StoreError};
use crate::types::{Mediator, MediatorId};

/// A single cached value with its expiration time.
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// Thread-safe in-memory cache with time-to-live expiration.
///
/// Entries are stored as serialized JSON strings. Expired entries are
/// lazily evicted on the next `get` call for that key.
pub struct MemoryCache {
    store: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl MemoryCache {
    /// Creates a new cache with the given time-to-live for entries.
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: DashMap::new(),
            ttl,
        }
    }

    /// Returns the cached value for `key`, or `None` if missing or expired.
    pub fn get(&self, key: &str) -> Option<String> {
        let entry = self.store.get(key)?;
        if Instant::now() > entry.expires_at {
            drop(entry);
            self.store.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    /// Inserts or overwrites a cache entry. The entry expires after the configured TTL.
    pub fn set(&self, key: String, value: String) {
        self.store.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Removes all entries from the cache.
    pub fn clear(&self) {
        self.store.clear();
    }
}

/// Store wrapper that caches fetched mediators by id.
///
/// Cache hits bypass the inner store entirely; misses are gathered into a
/// single batch fetch. Candidate-pool fetches pass through uncached (the
/// pool changes with imports and is read far less often).
pub struct CachedStore<S> {
    inner: S,
    cache: MemoryCache,
}

impl<S: MediatorStore> CachedStore<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            cache: MemoryCache::new(ttl),
        }
    }
}

fn cache_key(id: &str) -> String {
    format!("mediator:{}", id)
}

impl<S: MediatorStore> MediatorStore for CachedStore<S> {
    fn fetch_mediators_by_ids(&self, ids: &[MediatorId]) -> Result<Vec<Mediator>, StoreError> {
        let mut resolved: HashMap<MediatorId, Mediator> = HashMap::new();
        let mut misses: Vec<MediatorId> = Vec::new();

        for id in ids {
            if resolved.contains_key(id) || misses.contains(id) {
                continue;
            }
            match self.cache.get(&cache_key(id)) {
                // A cached value that no longer deserializes is treated as
                // a miss and refetched.
                Some(json) => match serde_json::from_str::<Mediator>(&json) {
                    Ok(m) => {
                        debug!(mediator_id = %id, "mediator cache hit");
                        resolved.insert(id.clone(), m);
                    }
                    Err(_) => misses.push(id.clone()),
                },
                None => misses.push(id.clone()),
            }
        }

        if !misses.is_empty() {
            for m in self.inner.fetch_mediators_by_ids(&misses)? {
                self.cache.set(cache_key(&m.id), serde_json::to_string(&m)?);
                resolved.insert(m.id.clone(), m);
            }
        }

        // Preserve requested order, one entry per distinct resolved id.
        let mut seen = HashSet::new();
        Ok(ids
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .filter_map(|id| resolved.get(id).cloned())
            .collect())
    }

    fn fetch_candidates(&self) -> Result<Vec<Mediator>, StoreError> {
        self.inner.fetch_candidates()
    }
}
