//! Concurrent Cache Benchmarks
//!
//! Benchmarks for measuring concurrent cache performance across different
//! access patterns and segment configurations.

use cachemod_lru::config::{ConcurrentCacheConfig, ConcurrentLruCacheConfig, LruCacheConfig};
use cachemod_lru::ConcurrentLruCache;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;

const CACHE_SIZE: usize = 10_000;
const OPS_PER_THREAD: usize = 1_000;
const NUM_THREADS: usize = 8;

fn lru_config(capacity: usize, segments: usize) -> ConcurrentLruCacheConfig {
    ConcurrentCacheConfig {
        base: LruCacheConfig {
            capacity: NonZeroUsize::new(capacity).unwrap(),
        },
        segments,
    }
}

/// Benchmark concurrent read operations
fn concurrent_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent Reads");
    group.throughput(Throughput::Elements((NUM_THREADS * OPS_PER_THREAD) as u64));

    let cache: Arc<ConcurrentLruCache<usize, usize>> =
        Arc::new(ConcurrentLruCache::init(lru_config(CACHE_SIZE, 16), None));
    for i in 0..CACHE_SIZE {
        cache.put(i, i);
    }

    group.bench_function("LRU", |b| {
        b.iter(|| {
            let cache = Arc::clone(&cache);
            run_concurrent_reads(cache, NUM_THREADS, OPS_PER_THREAD);
        });
    });

    group.finish();
}

/// Benchmark concurrent write operations
fn concurrent_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent Writes");
    group.throughput(Throughput::Elements((NUM_THREADS * OPS_PER_THREAD) as u64));

    group.bench_function("LRU", |b| {
        let cache: Arc<ConcurrentLruCache<usize, usize>> =
            Arc::new(ConcurrentLruCache::init(lru_config(CACHE_SIZE, 16), None));
        b.iter(|| {
            let cache = Arc::clone(&cache);
            run_concurrent_writes(cache, NUM_THREADS, OPS_PER_THREAD);
        });
    });

    group.finish();
}

/// Benchmark mixed read/write operations (80% reads, 20% writes)
fn concurrent_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent Mixed (80/20)");
    group.throughput(Throughput::Elements((NUM_THREADS * OPS_PER_THREAD) as u64));

    group.bench_function("LRU", |b| {
        let cache: Arc<ConcurrentLruCache<usize, usize>> =
            Arc::new(ConcurrentLruCache::init(lru_config(CACHE_SIZE, 16), None));
        for i in 0..CACHE_SIZE {
            cache.put(i, i);
        }
        b.iter(|| {
            let cache = Arc::clone(&cache);
            run_concurrent_mixed(cache, NUM_THREADS, OPS_PER_THREAD);
        });
    });

    group.finish();
}

/// Benchmark different segment counts
fn segment_count_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("Segment Count Comparison");
    group.throughput(Throughput::Elements((NUM_THREADS * OPS_PER_THREAD) as u64));

    for segments in [1, 4, 8, 16, 32, 64] {
        group.bench_with_input(
            BenchmarkId::new("segments", segments),
            &segments,
            |b, &seg_count| {
                let cache: Arc<ConcurrentLruCache<usize, usize>> = Arc::new(
                    ConcurrentLruCache::init(lru_config(CACHE_SIZE, seg_count), None),
                );
                // Pre-populate
                for i in 0..CACHE_SIZE {
                    cache.put(i, i);
                }
                b.iter(|| {
                    let cache = Arc::clone(&cache);
                    run_concurrent_mixed(cache, NUM_THREADS, OPS_PER_THREAD);
                });
            },
        );
    }

    group.finish();
}

fn run_concurrent_reads(
    cache: Arc<ConcurrentLruCache<usize, usize>>,
    num_threads: usize,
    ops_per_thread: usize,
) {
    let mut handles = Vec::with_capacity(num_threads);
    for t in 0..num_threads {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..ops_per_thread {
                let key = (t * ops_per_thread + i) % CACHE_SIZE;
                black_box(cache.get(&key));
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

fn run_concurrent_writes(
    cache: Arc<ConcurrentLruCache<usize, usize>>,
    num_threads: usize,
    ops_per_thread: usize,
) {
    let mut handles = Vec::with_capacity(num_threads);
    for t in 0..num_threads {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..ops_per_thread {
                let key = t * ops_per_thread + i;
                cache.put(key, key);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

// 80% reads, 20% writes
fn run_concurrent_mixed(
    cache: Arc<ConcurrentLruCache<usize, usize>>,
    num_threads: usize,
    ops_per_thread: usize,
) {
    let mut handles = Vec::with_capacity(num_threads);
    for t in 0..num_threads {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..ops_per_thread {
                let key = (t * ops_per_thread + i) % CACHE_SIZE;
                if i % 5 == 0 {
                    cache.put(key, key);
                } else {
                    black_box(cache.get(&key));
                }
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

criterion_group!(
    benches,
    concurrent_reads,
    concurrent_writes,
    concurrent_mixed,
    segment_count_comparison
);
criterion_main!(benches);
