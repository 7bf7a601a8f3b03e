//! Configuration for the Least Recently Used (LRU) cache.
//!
//! # Sizing Guidelines
//!
//! `capacity` is the maximum number of entries. Each entry carries a fixed
//! overhead beyond the key and value themselves (two list links, the
//! duplicated key in the index, roughly 64-128 bytes), so for a memory budget
//! size the capacity as:
//!
//! ```text
//! capacity = memory_budget / (average_entry_size + overhead_per_entry)
//! ```
//!
//! # Examples
//!
//! ```
//! use cachemod_lru::config::LruCacheConfig;
//! use cachemod_lru::LruCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(10_000).unwrap(),
//! };
//! let cache: LruCache<String, Vec<u8>> = LruCache::init(config, None);
//! ```

use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// LRU evicts the least recently accessed entry once the cache exceeds
/// capacity.
///
/// # Fields
///
/// - `capacity`: maximum number of entries the cache can hold, fixed for the
///   cache's lifetime. `NonZeroUsize` rules out a zero capacity at the type
///   level, which is how the "capacity must be >= 1" configuration rule is
///   reported: at construction, not at runtime.
#[derive(Clone, Copy)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
