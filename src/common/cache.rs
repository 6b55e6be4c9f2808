//! In-memory cache for storing key-value pairs.
//!
//! Uses moka's high-performance concurrent cache implementation.

use std::time::Duration;

use moka::sync::Cache;

/// Thread-safe in-memory cache with a capacity and an entry time-to-live.
///
/// Used for catalog responses (`MemCache<String, serde_json::Value>`) so
/// reopening a panel does not hit the backend again.
#[derive(Clone)]
pub struct MemCache<K, V> {
    entries: Cache<K, V>,
}

impl<K, V> MemCache<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Allocate a new [`MemCache`] whose entries expire after `ttl`.
    pub fn new(
        capacity: usize,
        ttl: Duration,
    ) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity as u64).time_to_live(ttl).build(),
        }
    }

    pub fn set(
        &self,
        key: K,
        value: V,
    ) {
        self.entries.insert(key, value);
    }

    pub fn get(
        &self,
        key: &K,
    ) -> Option<V> {
        self.entries.get(key)
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let cache: MemCache<String, u32> = MemCache::new(8, Duration::from_secs(60));
        cache.set("a".into(), 1);
        assert_eq!(cache.get(&"a".into()), Some(1));
        assert_eq!(cache.get(&"b".into()), None);
    }

    #[test]
    fn test_entries_expire() {
        let cache: MemCache<String, u32> = MemCache::new(8, Duration::from_millis(1));
        cache.set("a".into(), 1);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.get(&"a".into()), None);
    }
}
