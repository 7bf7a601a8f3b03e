//! Concurrent LRU Cache Implementation
//!
//! A thread-safe LRU cache using lock striping (segmented storage). This is
//! the multi-threaded counterpart to [`LruCache`](crate::LruCache).
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                      ConcurrentLruCache                              │
//! │                                                                      │
//! │  hash(key) % N  ──▶  Segment Selection                               │
//! │                                                                      │
//! │  ┌──────────────┐ ┌──────────────┐     ┌──────────────┐              │
//! │  │  Segment 0   │ │  Segment 1   │ ... │  Segment N-1 │              │
//! │  │  ┌────────┐  │ │  ┌────────┐  │     │  ┌────────┐  │              │
//! │  │  │ Mutex  │  │ │  │ Mutex  │  │     │  │ Mutex  │  │              │
//! │  │  └────┬───┘  │ │  └────┬───┘  │     │  └────┬───┘  │              │
//! │  │       │      │ │       │      │     │       │      │              │
//! │  │  ┌────▼────┐ │ │  ┌────▼────┐ │     │  ┌────▼────┐ │              │
//! │  │  │ index + │ │ │  │ index + │ │     │  │ index + │ │              │
//! │  │  │ recency │ │ │  │ recency │ │     │  │ recency │ │              │
//! │  │  │  list   │ │ │  │  list   │ │     │  │  list   │ │              │
//! │  │  └─────────┘ │ │  └─────────┘ │     │  └─────────┘ │              │
//! │  └──────────────┘ └──────────────┘     └──────────────┘              │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Within a segment the mutex makes each operation atomic: the hash index and
//! the recency list are mutated together, so no thread ever observes a key
//! indexing a node that has left the list. The insert-or-update race on a
//! single key resolves inside one lock acquisition — exactly one node is
//! created and the last writer's value wins.
//!
//! # When to Use
//!
//! **Use ConcurrentLruCache when:**
//! - Multiple threads need cache access
//! - You need better throughput than `Mutex<LruCache>`
//! - Keys distribute evenly (hot keys in one segment will still contend)
//!
//! **Consider alternatives when:**
//! - Single-threaded access only → use `LruCache`
//! - You need strict global LRU ordering → use `Mutex<LruCache>`

extern crate alloc;

use crate::lru::LruSegment;
use crate::metrics::CacheMetrics;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A thread-safe LRU cache with segmented storage for high concurrency.
///
/// Keys are partitioned across segments by hash; each segment owns an
/// independent index + recency list pair behind its own lock. The cache is
/// `Send + Sync` and is normally shared via `Arc`.
///
/// # Type Parameters
///
/// - `K`: key type, `Hash + Eq + Clone + Send`
/// - `V`: value type, `Clone + Send`. `get` returns an owned clone so the
///   caller's value stays valid even if the entry is evicted right after the
///   lock is released — wrap large payloads in `Arc` to keep clones cheap.
/// - `S`: hash builder, defaults to `DefaultHashBuilder`
///
/// # Note on LRU Semantics
///
/// Recency is tracked **per segment**, not globally: an entry in one segment
/// can be evicted while another segment holds entries accessed less recently
/// in wall-clock time. For workloads with a reasonable key distribution this
/// approximation is the standard lock-striping trade-off.
pub struct ConcurrentLruCache<K, V, S = DefaultHashBuilder> {
    segments: Box<[Mutex<LruSegment<K, V, S>>]>,
    hash_builder: S,
}

impl<K, V> ConcurrentLruCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
{
    /// Creates a concurrent LRU cache from a configuration with an optional
    /// hasher.
    ///
    /// The configured capacity is split evenly across segments. When the
    /// capacity is smaller than the requested segment count the stripe count
    /// is reduced, keeping the total at or below the configured capacity.
    ///
    /// # Panics
    ///
    /// Panics if `config.segments` is zero.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use cachemod_lru::ConcurrentLruCache;
    /// use cachemod_lru::config::{ConcurrentCacheConfig, ConcurrentLruCacheConfig, LruCacheConfig};
    /// use core::num::NonZeroUsize;
    ///
    /// let config: ConcurrentLruCacheConfig = ConcurrentCacheConfig {
    ///     base: LruCacheConfig {
    ///         capacity: NonZeroUsize::new(10_000).unwrap(),
    ///     },
    ///     segments: 16,
    /// };
    /// let cache: ConcurrentLruCache<String, i32> = ConcurrentLruCache::init(config, None);
    /// ```
    pub fn init(
        config: crate::config::ConcurrentLruCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> Self {
        Self::init_with_hasher(config, hasher.unwrap_or_default())
    }

    /// Creates a concurrent LRU cache with the default segment count.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::with_segments(capacity, crate::concurrent::default_segment_count())
    }

    /// Creates a concurrent LRU cache with an explicit segment count.
    ///
    /// # Panics
    ///
    /// Panics if `segments` is zero.
    pub fn with_segments(capacity: NonZeroUsize, segments: usize) -> Self {
        Self::init(
            crate::config::ConcurrentCacheConfig {
                base: crate::config::LruCacheConfig { capacity },
                segments,
            },
            None,
        )
    }
}

impl<K, V, S> ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Clone + Send,
{
    /// Creates a concurrent LRU cache with a custom hash builder.
    ///
    /// Use this for deterministic hashing or DoS-resistant hashers. The
    /// builder is cloned into each segment and also selects the segment.
    ///
    /// # Panics
    ///
    /// Panics if `config.segments` is zero.
    pub fn init_with_hasher(
        config: crate::config::ConcurrentLruCacheConfig,
        hash_builder: S,
    ) -> Self {
        assert!(config.segments > 0, "segments must be > 0");

        // More stripes than entries would raise the total above the
        // configured capacity, so cap the stripe count at the capacity.
        let segment_count = config.segments.min(config.base.capacity.get());
        let segment_capacity = config.base.capacity.get() / segment_count;
        let segment_cap = NonZeroUsize::new(segment_capacity.max(1)).unwrap();

        let segments: Vec<_> = (0..segment_count)
            .map(|_| Mutex::new(LruSegment::with_hasher(segment_cap, hash_builder.clone())))
            .collect();

        Self {
            segments: segments.into_boxed_slice(),
            hash_builder,
        }
    }

    /// Returns the segment index for the given key.
    #[inline]
    fn segment_index<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        (self.hash_builder.hash_one(key) as usize) % self.segments.len()
    }

    /// Returns the total capacity across all segments.
    pub fn capacity(&self) -> usize {
        self.segments.iter().map(|s| s.lock().cap().get()).sum()
    }

    /// Returns the number of segments in the cache.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the total number of entries across all segments.
    ///
    /// Locks each segment in turn, so under heavy concurrency the result may
    /// be slightly stale by the time it is read.
    pub fn len(&self) -> usize {
        self.segments.iter().map(|s| s.lock().len()).sum()
    }

    /// Returns `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.lock().is_empty())
    }

    /// Retrieves a value from the cache.
    ///
    /// Returns an owned **clone** so the lock is released before the caller
    /// touches the value; the clone remains valid even if the entry is
    /// evicted immediately afterwards. On a hit the entry is promoted to the
    /// MRU position within its segment, so this read mutates eviction order.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.segment_index(key);
        let mut segment = self.segments[idx].lock();
        segment.get(key).cloned()
    }

    /// Retrieves a value and applies a function to it while holding the lock.
    ///
    /// More efficient than [`get`](Self::get) when only part of the value is
    /// needed, as it avoids cloning. The lock is released after `f` returns,
    /// so keep `f` short.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        let idx = self.segment_index(key);
        let mut segment = self.segments[idx].lock();
        segment.get(key).map(f)
    }

    /// Applies a function to a mutable reference of the cached value.
    ///
    /// Allows in-place modification without removing the entry.
    pub fn get_mut_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&mut V) -> R,
    {
        let idx = self.segment_index(key);
        let mut segment = self.segments[idx].lock();
        segment.get_mut(key).map(f)
    }

    /// Inserts or updates a key.
    ///
    /// An existing key gets its value replaced and is promoted to the MRU
    /// position without eviction. A new key is appended; if the segment then
    /// exceeds its capacity, its LRU entry is evicted.
    ///
    /// # Returns
    ///
    /// - `Some((old_key, old_value))` when a value was replaced or evicted
    /// - `None` when the insert fit without eviction
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        let idx = self.segment_index(&key);
        let mut segment = self.segments[idx].lock();
        segment.put(key, value)
    }

    /// Removes a key from the cache, returning its value if it was present.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.segment_index(key);
        let mut segment = self.segments[idx].lock();
        segment.remove(key)
    }

    /// Checks if the cache contains a key without promoting it or recording
    /// a hit.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.segment_index(key);
        let segment = self.segments[idx].lock();
        segment.contains_key(key)
    }

    /// Removes all entries from all segments.
    ///
    /// Acquires the segment locks sequentially, not atomically across the
    /// whole cache.
    pub fn clear(&self) {
        for segment in self.segments.iter() {
            segment.lock().clear();
        }
    }

    /// Records a cache miss for metrics tracking.
    ///
    /// Call this after a failed `get` once the object has been fetched from
    /// the origin.
    pub fn record_miss(&self, object_size: u64) {
        // Metrics are aggregated across segments so any segment will do.
        if let Some(segment) = self.segments.first() {
            segment.lock().record_miss(object_size);
        }
    }
}

impl<K, V, S> CacheMetrics for ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Clone + Send,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut aggregated = BTreeMap::new();

        for segment in self.segments.iter() {
            let segment_metrics = segment.lock().metrics().metrics();
            for (key, value) in segment_metrics {
                *aggregated.entry(key).or_insert(0.0) += value;
            }
        }

        aggregated
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentLRU"
    }
}

// SAFETY: all segment access goes through the per-segment Mutex, so the cache
// can be sent and shared across threads when K and V are Send.
unsafe impl<K: Send, V: Send, S: Send> Send for ConcurrentLruCache<K, V, S> {}
unsafe impl<K: Send, V: Send, S: Send + Sync> Sync for ConcurrentLruCache<K, V, S> {}

impl<K, V, S> core::fmt::Debug for ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Clone + Send,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConcurrentLruCache")
            .field("segment_count", &self.segments.len())
            .field("total_len", &self.len())
            .finish()
    }
}
