//! Concurrent Cache Implementation
//!
//! Thread-safe LRU caching using the shared-segment pattern:
//!
//! - the key space is partitioned across multiple segments via hash-based
//!   sharding
//! - each segment is protected by its own `parking_lot::Mutex`
//! - an operation locks only the segment its key hashes to, so traffic on
//!   unrelated keys never serializes on a single global lock
//!
//! ## Why Mutex Instead of RwLock?
//!
//! An LRU `get()` is inherently a write: every hit moves the entry to the
//! most-recently-used end of the recency list. With no read-only fast path an
//! `RwLock` would still take the exclusive lock on every access, so a plain
//! `Mutex` is the honest (and cheaper) choice. Concurrency comes from the
//! segmentation instead: keys that hash to different segments proceed fully
//! in parallel.
//!
//! ## Recency semantics
//!
//! LRU order is maintained **per segment**. Two concurrent accesses to keys
//! in different segments may be reordered relative to wall-clock time; the
//! resulting order always reflects some valid interleaving of the access
//! sequence, which is what eviction correctness requires. Per-key operations
//! are linearizable through the segment mutex: concurrent `put`s of the same
//! brand-new key resolve to exactly one node with the last writer's value.
//!
//! # Example
//!
//! ```rust,ignore
//! use cachemod_lru::ConcurrentLruCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentLruCache::init(config, None));
//!
//! let handles: Vec<_> = (0..4).map(|t| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for i in 0..1000 {
//!             let key = format!("key_{}_{}", t, i);
//!             cache.put(key.clone(), i);
//!             let _ = cache.get(&key);
//!         }
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! ```

mod lru;

pub use self::lru::ConcurrentLruCache;

/// Returns the default number of segments.
///
/// Matches the engine's default concurrency hint and keeps memory overhead
/// (one mutex per segment) modest.
#[inline]
pub fn default_segment_count() -> usize {
    16
}
