use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::num::NonZeroUsize;
use tiny_containers::config::LruCacheConfig;
use tiny_containers::{LruCache, TinyVec};

// Helper to create caches with the init pattern
fn make_lru<K: std::hash::Hash + Eq + Clone, V>(cap: usize) -> LruCache<K, V> {
    let config = LruCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    LruCache::init(config, None)
}

/// Coin flips shared by every churn benchmark: true means "pop if non-empty".
fn churn_pattern(len: usize) -> Vec<bool> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    (0..len).map(|_| rng.gen_bool(0.5)).collect()
}

pub fn vector_benchmark(c: &mut Criterion) {
    const CHURN_OPS: usize = 64 * 1024;
    let pattern = churn_pattern(CHURN_OPS);
    let mut group = c.benchmark_group("Vector Operations");

    group.bench_function("TinyVec push 1024", |b| {
        b.iter(|| {
            let mut v = TinyVec::new();
            for i in 0..1024u32 {
                v.push(black_box(i));
            }
            v
        });
    });

    group.bench_function("Vec push 1024", |b| {
        b.iter(|| {
            let mut v = Vec::with_capacity(1);
            for i in 0..1024u32 {
                v.push(black_box(i));
            }
            v
        });
    });

    group.bench_function("TinyVec random churn", |b| {
        b.iter(|| {
            let mut v: TinyVec<u8> = TinyVec::new();
            for (i, &pop) in pattern.iter().enumerate() {
                if pop && !v.is_empty() {
                    black_box(v.remove_last().ok());
                } else {
                    v.push((i & 0xFF) as u8);
                }
            }
            v
        });
    });

    group.bench_function("Vec random churn", |b| {
        b.iter(|| {
            let mut v: Vec<u8> = Vec::with_capacity(1);
            for (i, &pop) in pattern.iter().enumerate() {
                if pop && !v.is_empty() {
                    black_box(v.pop());
                } else {
                    v.push((i & 0xFF) as u8);
                }
            }
            v
        });
    });

    {
        let source: TinyVec<u64> = (0..4096).collect();
        group.bench_function("TinyVec clone 4096", |b| {
            b.iter(|| black_box(&source).clone());
        });
    }

    group.finish();
}

pub fn cache_benchmark(c: &mut Criterion) {
    const CACHE_SIZE: usize = 1000;
    let mut group = c.benchmark_group("Cache Operations");

    {
        let mut cache = make_lru(CACHE_SIZE);
        for i in 0..CACHE_SIZE {
            cache.put(i, i);
        }

        group.bench_function("LRU get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LRU get miss", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i + CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LRU put existing", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.put(i % CACHE_SIZE, i));
                }
            });
        });

        let mut next = CACHE_SIZE;
        group.bench_function("LRU put evicting", |b| {
            b.iter(|| {
                for _ in 0..100 {
                    next += 1;
                    black_box(cache.put(next, next));
                }
            });
        });
    }

    {
        let mut cache = lru::LruCache::new(NonZeroUsize::new(CACHE_SIZE).unwrap());
        for i in 0..CACHE_SIZE {
            cache.put(i, i);
        }

        group.bench_function("lru crate get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i % CACHE_SIZE)));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, vector_benchmark, cache_benchmark);
criterion_main!(benches);
