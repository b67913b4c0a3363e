//! # Response cache for resolved flags
//!
//! A small cache layer used by the web-style provider to short-circuit
//! repeated evaluations of the same flag with the same context.
//!
//! Entries are keyed by flag key plus a hash of the evaluation context.
//! The backing store is pluggable through the [`Cache`] trait:
//!
//! * [`CacheType::Lru`] - size-bounded, least recently used eviction
//! * [`CacheType::InMemory`] - plain unbounded map
//! * [`CacheType::Disabled`] - no caching
//!
//! ## Example
//!
//! ```rust
//! use flagd_openfeature::cache::{CacheSettings, CacheType};
//! use std::time::Duration;
//!
//! let settings = CacheSettings {
//!     cache_type: CacheType::Lru,
//!     max_size: 1000,
//!     ttl: Some(Duration::from_secs(60)),
//! };
//! ```

use open_feature::{EvaluationContext, EvaluationContextFieldValue};
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub enum CacheType {
    Lru,
    InMemory,
    Disabled,
}

impl<'a> From<&'a str> for CacheType {
    fn from(s: &'a str) -> Self {
        match s.to_lowercase().as_str() {
            "lru" => CacheType::Lru,
            "mem" => CacheType::InMemory,
            "disabled" => CacheType::Disabled,
            _ => CacheType::Lru,
        }
    }
}

impl std::fmt::Display for CacheType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheType::Lru => write!(f, "lru"),
            CacheType::InMemory => write!(f, "mem"),
            CacheType::Disabled => write!(f, "disabled"),
        }
    }
}

/// Settings controlling cache behavior.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Backing store. Default: LRU.
    pub cache_type: CacheType,
    /// Maximum number of entries. Default: 1000.
    pub max_size: usize,
    /// Optional time-to-live for entries. Default: 60 seconds.
    pub ttl: Option<Duration>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        let cache_type = std::env::var("FLAGD_CACHE")
            .map(|s| CacheType::from(s.as_str()))
            .unwrap_or(CacheType::Lru);

        let max_size = std::env::var("FLAGD_MAX_CACHE_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1000);

        // Without a TTL, entries outlive flag configuration changes in the
        // daemon for the whole provider lifetime.
        let ttl = std::env::var("FLAGD_CACHE_TTL")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .or_else(|| Some(Duration::from_secs(60)));

        Self {
            cache_type,
            max_size,
            ttl,
        }
    }
}

#[derive(Debug)]
struct CacheEntry<V>
where
    V: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    value: V,
    created_at: Instant,
}

/// Backing-store contract for cached resolutions.
pub trait Cache<K, V>: Send + Sync + std::fmt::Debug {
    /// Inserts a key-value pair, returning whether a previous entry was replaced.
    fn add(&mut self, key: K, value: V) -> bool;
    /// Drops all entries.
    #[allow(dead_code)]
    fn purge(&mut self);
    /// Looks up a value by key.
    fn get(&mut self, key: &K) -> Option<&V>;
    /// Removes one key, returning whether it was present.
    fn remove(&mut self, key: &K) -> bool;
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
struct CacheKey {
    flag_key: String,
    context_hash: u64,
}

impl CacheKey {
    fn new(flag_key: &str, context: &EvaluationContext) -> Self {
        Self {
            flag_key: flag_key.to_string(),
            context_hash: hash_context(context),
        }
    }
}

fn hash_context(context: &EvaluationContext) -> u64 {
    let mut hasher = DefaultHasher::new();
    context.targeting_key.hash(&mut hasher);
    for (key, value) in &context.custom_fields {
        key.hash(&mut hasher);
        hash_context_field(value, &mut hasher);
    }
    hasher.finish()
}

fn hash_context_field(value: &EvaluationContextFieldValue, hasher: &mut DefaultHasher) {
    match value {
        EvaluationContextFieldValue::String(s) => s.hash(hasher),
        EvaluationContextFieldValue::Bool(b) => b.hash(hasher),
        EvaluationContextFieldValue::Int(i) => i.hash(hasher),
        EvaluationContextFieldValue::Float(f) => f.to_bits().hash(hasher),
        EvaluationContextFieldValue::DateTime(dt) => dt.to_string().hash(hasher),
        // Opaque payloads hash by their debug rendering; collisions only
        // cost a spurious cache miss.
        EvaluationContextFieldValue::Struct(s) => format!("{:?}", s).hash(hasher),
    }
}

type SharedCache<V> = Arc<RwLock<Box<dyn Cache<CacheKey, CacheEntry<V>>>>>;

/// Cache front-end holding the configured store and TTL policy.
///
/// A disabled cache carries no store at all: gets miss, adds are dropped.
#[derive(Debug)]
pub struct CacheService<V>
where
    V: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    ttl: Option<Duration>,
    store: Option<SharedCache<V>>,
}

impl<V> CacheService<V>
where
    V: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    pub fn new(settings: CacheSettings) -> Self {
        let store: Option<Box<dyn Cache<CacheKey, CacheEntry<V>>>> = match settings.cache_type {
            CacheType::Lru => Some(Box::new(crate::cache::lru::LruCacheImpl::new(
                settings.max_size,
            ))),
            CacheType::InMemory => Some(Box::new(crate::cache::in_memory::InMemoryCache::new())),
            CacheType::Disabled => None,
        };

        Self {
            ttl: settings.ttl,
            store: store.map(|s| Arc::new(RwLock::new(s))),
        }
    }

    pub async fn get(&self, flag_key: &str, context: &EvaluationContext) -> Option<V> {
        let store = self.store.as_ref()?;
        let cache_key = CacheKey::new(flag_key, context);
        let mut store = store.write().await;

        let entry = store.get(&cache_key)?;
        if let Some(ttl) = self.ttl
            && entry.created_at.elapsed() > ttl
        {
            store.remove(&cache_key);
            return None;
        }
        Some(entry.value.clone())
    }

    pub async fn add(&self, flag_key: &str, context: &EvaluationContext, value: V) -> bool {
        let Some(store) = &self.store else {
            return false;
        };
        let entry = CacheEntry {
            value,
            created_at: Instant::now(),
        };
        store
            .write()
            .await
            .add(CacheKey::new(flag_key, context), entry)
    }

    pub async fn purge(&self) {
        if let Some(store) = &self.store {
            store.write().await.purge();
        }
    }
}
