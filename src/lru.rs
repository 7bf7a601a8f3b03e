//! Least Recently Used (LRU) cache engine.
//!
//! The engine pairs a hash index (key to list node) with a
//! [`RecencyList`](crate::list::RecencyList) ordered from least- to
//! most-recently-used. Every operation is O(1):
//!
//! - `get` resolves the index and promotes the hit node to the MRU position,
//!   so a read has a *write* side effect on eviction order.
//! - `put` of a new key appends a node at the MRU end, indexes it, and then
//!   runs the eviction loop; `put` of an existing key updates the value in
//!   place and promotes the node, never evicting (the size did not grow).
//! - Eviction pops the LRU head and drops its key from the index under the
//!   same `&mut self`, so no caller can observe an indexed key whose node has
//!   already been unlinked.
//!
//! # Thread Safety
//!
//! `LruCache` itself is not thread-safe; all mutation flows through
//! `&mut self`, which is exactly what makes insert-or-update a single atomic
//! decision point once the cache is wrapped in a lock. For concurrent access
//! use [`ConcurrentLruCache`](crate::ConcurrentLruCache), which shards keys
//! across independently locked `LruSegment`s.

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::list::{Node, RecencyList};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::mem;
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Internal LRU segment containing the actual cache algorithm.
///
/// This is shared between `LruCache` (single-threaded) and
/// `ConcurrentLruCache` (one segment per lock stripe). All algorithm logic is
/// implemented here to avoid code duplication.
///
/// The key is stored twice: once as the index key and once inside the list
/// node, so the eviction loop can remove the index entry knowing only the
/// peeked list head.
///
/// # Safety
///
/// The `map` field holds raw pointers into `list`. A pointer is valid as long
/// as:
/// - it was obtained from `list.push_back()`
/// - the node has not been removed from the list
/// - the segment has not been dropped
pub(crate) struct LruSegment<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: RecencyList<(K, V)>,
    map: HashMap<K, *mut Node<(K, V)>, S>,
    metrics: LruCacheMetrics,
}

// SAFETY: LruSegment owns all data and raw pointers point only to nodes owned
// by `list`. Concurrent access is safe when wrapped in a synchronization
// primitive.
unsafe impl<K: Send, V: Send, S: Send> Send for LruSegment<K, V, S> {}

// SAFETY: all mutation requires &mut self; shared references cannot race.
unsafe impl<K: Send, V: Send, S: Sync> Sync for LruSegment<K, V, S> {}

impl<K: Hash + Eq, V: Clone, S: BuildHasher> LruSegment<K, V, S> {
    pub(crate) fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        let map_capacity = cap.get().next_power_of_two();
        LruSegment {
            config: LruCacheConfig { capacity: cap },
            list: RecencyList::new(),
            map: HashMap::with_capacity_and_hasher(map_capacity, hash_builder),
            metrics: LruCacheMetrics::new(cap.get() as u64 * 1024),
        }
    }

    #[inline]
    pub(crate) fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub(crate) fn metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    fn estimate_object_size(&self, _key: &K, _value: &V) -> u64 {
        mem::size_of::<K>() as u64 + mem::size_of::<V>() as u64 + 64
    }

    /// Looks up `key` and, on a hit, promotes the node to most-recently-used.
    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if let Some(node) = self.map.get(key).copied() {
            unsafe {
                // SAFETY: node comes from our map, so it is live in our list
                self.list.move_to_back(node);
                let (k, v) = (*node).get_value();
                let object_size = self.estimate_object_size(k, v);
                self.metrics.core.record_hit(object_size);
                Some(v)
            }
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn record_miss(&mut self, object_size: u64) {
        self.metrics.core.record_miss(object_size);
    }

    /// Presence probe: no promotion, no metrics.
    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.get(key).copied()?;
        unsafe {
            // SAFETY: node comes from our map, so it is live in our list
            self.list.move_to_back(node);
            let (k, v) = (*node).get_value_mut();
            let object_size = self.estimate_object_size(k, v);
            self.metrics.core.record_hit(object_size);
            Some(v)
        }
    }

    /// Inserts or updates `key`.
    ///
    /// An existing key keeps its node: the value is swapped in place and the
    /// node is promoted, returning the previous pair and never evicting. A
    /// new key appends a node, indexes it, then runs the eviction loop;
    /// the evicted pair, if any, is returned.
    pub(crate) fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        if let Some(&node) = self.map.get(&key) {
            unsafe {
                // SAFETY: node comes from our map, so it is live in our list
                self.list.move_to_back(node);
                let (old_key, old_value) = self.list.update(node, (key, value), true).0?;
                return Some((old_key, old_value));
            }
        }

        let object_size = self.estimate_object_size(&key, &value);
        let node = self.list.push_back((key.clone(), value));
        self.map.insert(key, node);
        self.metrics.core.record_insertion(object_size);

        self.evict_over_capacity()
    }

    /// Evicts LRU victims until the segment is back within capacity.
    ///
    /// The victim's key leaves the index before (and under the same borrow
    /// as) its node leaves the list, so index and list never diverge at an
    /// observable point.
    fn evict_over_capacity(&mut self) -> Option<(K, V)> {
        let mut evicted = None;
        while self.map.len() > self.cap().get() {
            let victim = match self.list.front() {
                Some(node) => node,
                None => break,
            };
            unsafe {
                // SAFETY: victim was peeked from our list and is live
                let victim_key = &(*victim).get_value().0;
                self.map.remove(victim_key);
            }
            match self.list.pop_front() {
                Some(node) => {
                    // SAFETY: pop_front detached the node and its value is
                    // initialized
                    let (key, value) = unsafe { node.into_value() };
                    let evicted_size = self.estimate_object_size(&key, &value);
                    self.metrics.core.record_eviction(evicted_size);
                    evicted = Some((key, value));
                }
                None => break,
            }
        }
        evicted
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        let node = self.map.remove(key)?;
        unsafe {
            // SAFETY: node came from our map and was live until this removal
            let (k, v) = (*node).get_value();
            let object_size = self.estimate_object_size(k, v);
            let value = v.clone();
            self.list.remove(node);
            self.metrics.core.record_eviction(object_size);
            Some(value)
        }
    }

    pub(crate) fn clear(&mut self) {
        self.metrics.core.cache_size_bytes = 0;
        self.map.clear();
        self.list.clear();
    }
}

impl<K, V, S> core::fmt::Debug for LruSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LruSegment")
            .field("capacity", &self.config.capacity)
            .field("len", &self.map.len())
            .finish()
    }
}

/// A fixed-capacity Least Recently Used cache.
///
/// Supports O(1) insertion, retrieval, and update. Once the configured
/// capacity is exceeded, the least recently used entry is evicted to make
/// room. Capacity is fixed at construction and is a `NonZeroUsize`: a cache
/// that can hold nothing is unrepresentable.
///
/// # Examples
///
/// ```
/// use cachemod_lru::LruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing an entry promotes it to most-recently-used.
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Inserting beyond capacity evicts the least recently used entry.
/// cache.put("cherry", 3);
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
#[derive(Debug)]
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    segment: LruSegment<K, V, S>,
}

impl<K: Hash + Eq, V: Clone> LruCache<K, V, DefaultHashBuilder> {
    /// Creates a cache from a configuration with an optional hasher.
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self {
            segment: LruSegment::with_hasher(config.capacity, hasher.unwrap_or_default()),
        }
    }

    /// Creates a cache holding at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> Self {
        Self::init(LruCacheConfig { capacity: cap }, None)
    }
}

impl<K: Hash + Eq, V: Clone, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a cache with the specified capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        Self {
            segment: LruSegment::with_hasher(cap, hash_builder),
        }
    }

    /// Returns the maximum number of entries the cache can hold.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.segment.cap()
    }

    /// Returns the current number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.segment.len()
    }

    /// Returns true if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Looks up a key, promoting it to most-recently-used on a hit.
    ///
    /// A miss is a normal result, not an error. Note that a hit reorders the
    /// recency list, so `get` is not pure with respect to eviction order.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key)
    }

    /// Records a cache miss for metrics tracking.
    ///
    /// Call this after a failed `get` once the object has been fetched from
    /// the origin.
    #[inline]
    pub fn record_miss(&mut self, object_size: u64) {
        self.segment.record_miss(object_size);
    }

    /// Like [`get`](Self::get) but returns a mutable reference.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get_mut(key)
    }

    /// Returns `true` if `key` is present, without promoting it or touching
    /// metrics.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.contains_key(key)
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: BuildHasher> LruCache<K, V, S> {
    /// Inserts or updates a key.
    ///
    /// Returns the replaced pair on update, the evicted pair when the insert
    /// pushed the cache over capacity, or `None` when there was room.
    /// Updating an existing key never evicts.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.segment.put(key, value)
    }

    /// Removes a key, returning its value if it was present.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.remove(key)
    }

    /// Removes all entries.
    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }
}

impl<K: Hash + Eq, V: Clone, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.metrics().algorithm_name()
    }
}
