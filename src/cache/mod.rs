pub mod in_memory;
pub mod lru;
pub mod service;

pub use service::{Cache, CacheService, CacheSettings, CacheType};
