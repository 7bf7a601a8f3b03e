//! LRU Cache Metrics
//!
//! Metrics specific to the LRU eviction policy. LRU currently tracks only the
//! core metrics, but the wrapper keeps the reporting surface uniform so
//! policy-specific counters can be added without changing callers.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;

/// LRU metrics (extends [`CoreCacheMetrics`]).
#[derive(Debug, Clone)]
pub struct LruCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,
}

impl LruCacheMetrics {
    /// Creates a new metrics instance with the specified maximum cache size.
    pub fn new(max_cache_size_bytes: u64) -> Self {
        Self {
            core: CoreCacheMetrics::new(max_cache_size_bytes),
        }
    }

    /// Converts LRU metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        self.core.to_btreemap()
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
