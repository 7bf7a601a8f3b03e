//! Cache provider contract.
//!
//! The polymorphic boundary through which serving layers consume a cache
//! without knowing its eviction policy: a provider hands out fresh entries,
//! stores them under string keys, and returns them on lookup. Alternative
//! policies (frequency-based, segmented, ...) can implement the same trait
//! and be swapped in by configuration without touching callers.
//!
//! [`LruCacheProvider`] is the recency-based implementation, backed by a
//! [`ConcurrentLruCache`] so a pool of request-handling threads can share one
//! provider instance behind an `Arc`.
//!
//! # Example
//!
//! ```rust,ignore
//! use cachemod_lru::provider::{CacheProvider, LruCacheProvider, ProviderConfig};
//! use std::sync::Arc;
//!
//! let provider: LruCacheProvider<Arc<Vec<u8>>> =
//!     LruCacheProvider::init("responses", ProviderConfig::default());
//!
//! let mut body = Vec::new();
//! body.extend_from_slice(b"hello");
//! provider.put_entry("GET /index".to_string(), Arc::new(body));
//!
//! if let Some(entry) = provider.get_entry("GET /index") {
//!     // entry stays valid even if the key is evicted right after
//! }
//! ```

extern crate alloc;

use crate::concurrent::ConcurrentLruCache;
use crate::config::{ConcurrentCacheConfig, ConcurrentLruCacheConfig, LruCacheConfig};
use alloc::string::String;
use core::num::NonZeroUsize;

/// Configuration consumed by a provider at `init` time.
///
/// Supplied by an external configuration-loading layer; the provider reads no
/// configuration sources itself.
#[derive(Debug, Clone, Copy)]
pub struct ProviderConfig {
    /// Maximum number of entries the provider's cache can hold.
    pub capacity: NonZeroUsize,
    /// Concurrency hint: number of independent lock stripes.
    pub segments: usize,
}

impl Default for ProviderConfig {
    /// Default sizing: 1000 entries with a concurrency hint of 16.
    fn default() -> Self {
        Self {
            capacity: NonZeroUsize::new(1000).unwrap(),
            segments: 16,
        }
    }
}

impl From<ProviderConfig> for ConcurrentLruCacheConfig {
    fn from(config: ProviderConfig) -> Self {
        ConcurrentCacheConfig {
            base: LruCacheConfig {
                capacity: config.capacity,
            },
            segments: config.segments,
        }
    }
}

/// The four-operation contract callers use polymorphically across eviction
/// strategies.
///
/// Entries are opaque to the provider: it stores and returns them without
/// inspecting their contents. `put_entry` takes the entry by value, so an
/// absent/null entry is unrepresentable — callers cache whatever value they
/// hand over, including an unpopulated one fresh from `instantiate_entry`.
pub trait CacheProvider {
    /// The cached payload type.
    type Entry: Clone;

    /// Returns a fresh, empty entry for the caller to populate before
    /// [`put_entry`](Self::put_entry). Has no effect on cache state.
    fn instantiate_entry(&self) -> Self::Entry;

    /// Looks up a key. A hit promotes the entry to most-recently-used and
    /// returns an owned handle that stays valid regardless of later
    /// evictions; a miss returns `None` and is not an error.
    fn get_entry(&self, key: &str) -> Option<Self::Entry>;

    /// Stores an entry under `key`, replacing any previous entry for that
    /// key, and evicts the least-recently-used entry if the insert grew the
    /// cache past capacity.
    fn put_entry(&self, key: String, entry: Self::Entry);

    /// Current number of live entries.
    fn size(&self) -> usize;
}

/// Recency-based cache provider.
///
/// Owns a named [`ConcurrentLruCache`] keyed by `String`. The value type is
/// generic; wrap large payloads in `Arc` so the owned handles returned by
/// `get_entry` are cheap.
#[derive(Debug)]
pub struct LruCacheProvider<V>
where
    V: Clone + Default + Send,
{
    cache_name: String,
    cache: ConcurrentLruCache<String, V>,
}

impl<V> LruCacheProvider<V>
where
    V: Clone + Default + Send,
{
    /// Initializes a provider with empty state.
    ///
    /// Capacity and the concurrency hint are fixed for the provider's
    /// lifetime.
    pub fn init(cache_name: &str, config: ProviderConfig) -> Self {
        Self {
            cache_name: String::from(cache_name),
            cache: ConcurrentLruCache::init(config.into(), None),
        }
    }

    /// Returns the name this provider was initialized with.
    pub fn cache_name(&self) -> &str {
        &self.cache_name
    }

    /// Escape hatch for diagnostics and tests: the underlying concurrent
    /// cache. Introspection only; not part of the logical contract.
    pub fn cache(&self) -> &ConcurrentLruCache<String, V> {
        &self.cache
    }
}

impl<V> CacheProvider for LruCacheProvider<V>
where
    V: Clone + Default + Send,
{
    type Entry = V;

    fn instantiate_entry(&self) -> V {
        V::default()
    }

    fn get_entry(&self, key: &str) -> Option<V> {
        self.cache.get(key)
    }

    fn put_entry(&self, key: String, entry: V) {
        self.cache.put(key, entry);
    }

    fn size(&self) -> usize {
        self.cache.len()
    }
}
