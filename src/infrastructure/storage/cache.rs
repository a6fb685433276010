// In-memory TTL cache implementation using DashMap
use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    // `stored_at + ttl` overflows for very large TTLs.
    fn is_live(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) < self.ttl
    }
}

/// Thread-safe key/value store with per-entry expiry
///
/// Expiry is checked on every read, so an expired entry is invisible even if
/// no sweep has run yet. `sweep` only reclaims memory. Racing `set` calls on
/// the same key resolve last-write-wins.
#[derive(Debug)]
pub struct TtlCache<V> {
    name: &'static str,
    map: DashMap<String, CacheEntry<V>>,
    default_ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(name: &'static str, default_ttl: Duration) -> Self {
        Self {
            name,
            map: DashMap::new(),
            default_ttl,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        {
            let entry = self.map.get(key)?;
            if entry.is_live(now) {
                return Some(entry.value.clone());
            }
        }
        // Expired: drop it now rather than waiting for the sweep. Re-check
        // under the write lock in case a fresh value landed in between.
        self.map.remove_if(key, |_, entry| !entry.is_live(now));
        None
    }

    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.map.insert(
            key.into(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
                ttl,
            },
        );
    }

    /// Store with this domain's default TTL.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.set(key, value, self.default_ttl);
    }

    /// Remove every expired entry; returns how many were dropped.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let before = self.map.len();
        self.map.retain(|_, entry| entry.is_live(now));
        before.saturating_sub(self.map.len())
    }

    pub fn clear(&self) {
        self.map.clear();
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
