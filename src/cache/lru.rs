//! Size-bounded cache store with least-recently-used eviction, backed by
//! the `lru` crate.

use super::service::Cache;
use lru::LruCache;
use std::hash::Hash;
use std::num::NonZeroUsize;

#[derive(Debug)]
pub struct LruCacheImpl<K, V>
where
    K: Hash + Eq + Send + Sync + std::fmt::Debug,
    V: Send + Sync + std::fmt::Debug,
{
    cache: LruCache<K, V>,
}

impl<K, V> LruCacheImpl<K, V>
where
    K: Hash + Eq + Send + Sync + std::fmt::Debug,
    V: Send + Sync + std::fmt::Debug,
{
    /// Creates a store holding at most `size` entries. A zero size is
    /// bumped to one entry.
    pub fn new(size: usize) -> Self {
        let capacity = NonZeroUsize::new(size).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
        }
    }
}

impl<K, V> Cache<K, V> for LruCacheImpl<K, V>
where
    K: Hash + Eq + Send + Sync + std::fmt::Debug,
    V: Send + Sync + std::fmt::Debug,
{
    fn add(&mut self, key: K, value: V) -> bool {
        self.cache.put(key, value).is_some()
    }

    fn purge(&mut self) {
        self.cache.clear();
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        self.cache.get(key)
    }

    fn remove(&mut self, key: &K) -> bool {
        self.cache.pop(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_get_remove() {
        let mut cache = LruCacheImpl::<String, i32>::new(2);

        assert!(!cache.add("key1".to_string(), 1));
        assert_eq!(cache.get(&"key1".to_string()), Some(&1));

        assert!(cache.remove(&"key1".to_string()));
        assert_eq!(cache.get(&"key1".to_string()), None);
    }

    #[test]
    fn capacity_evicts_least_recently_used() {
        let mut cache = LruCacheImpl::<String, i32>::new(2);

        cache.add("key1".to_string(), 1);
        cache.add("key2".to_string(), 2);
        cache.add("key3".to_string(), 3);

        assert_eq!(cache.get(&"key1".to_string()), None);
        assert_eq!(cache.get(&"key2".to_string()), Some(&2));
        assert_eq!(cache.get(&"key3".to_string()), Some(&3));
    }

    #[test]
    fn access_refreshes_recency() {
        let mut cache = LruCacheImpl::<String, i32>::new(2);

        cache.add("key1".to_string(), 1);
        cache.add("key2".to_string(), 2);

        cache.get(&"key1".to_string());
        cache.add("key3".to_string(), 3);

        assert_eq!(cache.get(&"key1".to_string()), Some(&1));
        assert_eq!(cache.get(&"key2".to_string()), None);
        assert_eq!(cache.get(&"key3".to_string()), Some(&3));
    }
}
