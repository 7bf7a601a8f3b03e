#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Single-threaded cache
//!
//! ```rust
//! use cachemod_lru::LruCache;
//! use cachemod_lru::config::LruCacheConfig;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(2).unwrap(),
//! };
//! let mut cache = LruCache::init(config, None);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");      // "a" becomes most recently used
//! cache.put("c", 3);    // "b" evicted (least recently used)
//! assert!(cache.get(&"b").is_none());
//! ```
//!
//! ## Concurrent cache
//!
//! Enable the `concurrent` feature for the thread-safe version:
//!
//! ```toml
//! [dependencies]
//! cachemod-lru = { version = "0.1", features = ["concurrent"] }
//! ```
//!
//! ```rust,ignore
//! use cachemod_lru::ConcurrentLruCache;
//! use std::num::NonZeroUsize;
//! use std::sync::Arc;
//!
//! let cache = Arc::new(ConcurrentLruCache::new(NonZeroUsize::new(10_000).unwrap()));
//!
//! // Safe to share across threads
//! let cache_clone = Arc::clone(&cache);
//! std::thread::spawn(move || {
//!     cache_clone.put("key".to_string(), 42);
//! });
//! ```
//!
//! Concurrent caches use **lock striping** for high throughput:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │              ConcurrentLruCache (16 segments)                      │
//! │                                                                    │
//! │  ┌─────────┐ ┌─────────┐ ┌─────────┐     ┌─────────┐              │
//! │  │Segment 0│ │Segment 1│ │Segment 2│ ... │Segment15│              │
//! │  │ [Mutex] │ │ [Mutex] │ │ [Mutex] │     │ [Mutex] │              │
//! │  └─────────┘ └─────────┘ └─────────┘     └─────────┘              │
//! │       ▲           ▲           ▲               ▲                   │
//! │       │           │           │               │                   │
//! │  hash(k1)%16  hash(k2)%16  hash(k3)%16   hash(kN)%16              │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Provider contract
//!
//! Serving layers that should not depend on a concrete eviction policy go
//! through the [`provider`] module instead:
//!
//! ```rust,ignore
//! use cachemod_lru::provider::{CacheProvider, LruCacheProvider, ProviderConfig};
//! use std::sync::Arc;
//!
//! let provider: LruCacheProvider<Arc<Vec<u8>>> =
//!     LruCacheProvider::init("responses", ProviderConfig::default());
//!
//! let entry = provider.instantiate_entry();
//! provider.put_entry("GET /index".to_string(), entry);
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: Least Recently Used cache implementation
//! - [`config`]: Configuration structures
//! - [`metrics`]: Metrics collection for cache performance monitoring
//! - [`concurrent`]: Thread-safe, lock-striped cache (requires `concurrent` feature)
//! - [`provider`]: Policy-agnostic cache provider contract (requires `concurrent` feature)

#![no_std]

/// Doubly linked recency list with in-place editing capabilities.
///
/// This module provides a memory-efficient doubly linked list that allows for
/// efficient insertion, removal, and reordering operations.
///
/// **Note**: This module is internal infrastructure and should not be used directly
/// by library consumers. It exposes unsafe raw pointer operations that require
/// careful invariant maintenance. Use the high-level cache implementations instead.
pub(crate) mod list;

/// Cache configuration structures.
pub mod config;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used items when
/// the capacity is reached.
pub mod lru;

/// Cache metrics system.
///
/// Provides a metrics collection and reporting system exposed through a common
/// interface, so monitoring code does not care which cache variant it is
/// observing.
pub mod metrics;

/// Concurrent cache implementation.
///
/// Provides a thread-safe cache using segmented storage for high-performance
/// multi-threaded access. The key space is partitioned across multiple
/// segments, with each segment protected by its own lock.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

/// Cache provider contract.
///
/// The polymorphic boundary serving layers use to consume a cache without
/// depending on its eviction policy.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod provider;

pub use lru::LruCache;

pub use metrics::CacheMetrics;

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentLruCache;

#[cfg(feature = "concurrent")]
pub use provider::{CacheProvider, LruCacheProvider, ProviderConfig};
