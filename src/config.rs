//! Cache Configuration Module
//!
//! Configuration structures for the LRU cache engine. Config structs have all
//! public fields for simple instantiation:
//!
//! - **Simple**: just create the struct with all fields set
//! - **Type safety**: all parameters must be provided at construction, and
//!   the capacity is a `NonZeroUsize` — an empty-capacity cache is a
//!   configuration error that cannot be expressed at all
//!
//! # Examples
//!
//! ```
//! use cachemod_lru::config::LruCacheConfig;
//! use cachemod_lru::LruCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//! let cache: LruCache<String, i32> = LruCache::init(config, None);
//! ```

pub mod lru;

pub use lru::LruCacheConfig;

/// Generic configuration wrapper for concurrent caches.
///
/// Wraps a base cache configuration and adds the `segments` field controlling
/// the number of independent lock stripes used for sharding.
///
/// # Fields
///
/// - `base`: the underlying single-threaded cache configuration. Its
///   `capacity` applies to the **entire cache**, distributed across all
///   segments, not per segment.
/// - `segments`: number of independent segments (more segments = less lock
///   contention, at the cost of recency order being tracked per segment)
///
/// # Example
///
/// ```ignore
/// use cachemod_lru::config::{ConcurrentCacheConfig, ConcurrentLruCacheConfig, LruCacheConfig};
/// use core::num::NonZeroUsize;
///
/// let config: ConcurrentLruCacheConfig = ConcurrentCacheConfig {
///     base: LruCacheConfig {
///         capacity: NonZeroUsize::new(10_000).unwrap(),
///     },
///     segments: 16,
/// };
/// ```
#[cfg(feature = "concurrent")]
#[derive(Clone, Copy)]
pub struct ConcurrentCacheConfig<C> {
    /// Base configuration for the underlying cache algorithm.
    pub base: C,
    /// Number of segments for sharding (more segments = less contention)
    pub segments: usize,
}

#[cfg(feature = "concurrent")]
impl<C: core::fmt::Debug> core::fmt::Debug for ConcurrentCacheConfig<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConcurrentCacheConfig")
            .field("base", &self.base)
            .field("segments", &self.segments)
            .finish()
    }
}

#[cfg(feature = "concurrent")]
/// Configuration for a concurrent LRU cache.
/// Type alias for `ConcurrentCacheConfig<LruCacheConfig>`.
pub type ConcurrentLruCacheConfig = ConcurrentCacheConfig<LruCacheConfig>;
