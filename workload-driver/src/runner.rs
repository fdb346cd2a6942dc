// Replays generated workloads against each container

use crate::models::{
    CacheContainer, CacheRequest, RequestKind, RunStats, VectorContainer, VectorStep,
};
use std::hint::black_box;
use std::num::NonZeroUsize;
use std::time::Instant;
use tiny_containers::{LruCache, TinyVec};

/// A growable byte array the churn workload can drive
pub trait ChurnVector {
    fn push_byte(&mut self, value: u8);
    fn pop_byte(&mut self) -> Option<u8>;
    fn len(&self) -> usize;
    fn capacity(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ChurnVector for TinyVec<u8> {
    fn push_byte(&mut self, value: u8) {
        self.push(value);
    }

    fn pop_byte(&mut self) -> Option<u8> {
        self.remove_last().ok()
    }

    fn len(&self) -> usize {
        TinyVec::len(self)
    }

    fn capacity(&self) -> usize {
        TinyVec::capacity(self)
    }
}

impl ChurnVector for Vec<u8> {
    fn push_byte(&mut self, value: u8) {
        self.push(value);
    }

    fn pop_byte(&mut self) -> Option<u8> {
        self.pop()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn capacity(&self) -> usize {
        Vec::capacity(self)
    }
}

/// A bounded cache the request workload can drive
pub trait ChurnCache {
    fn lookup(&mut self, key: u64) -> Option<u64>;
    /// Stores `key`, returning true if another entry was evicted to make room
    fn store(&mut self, key: u64, value: u64) -> bool;
    fn len(&self) -> usize;
}

impl ChurnCache for LruCache<u64, u64> {
    fn lookup(&mut self, key: u64) -> Option<u64> {
        self.get(&key).copied()
    }

    fn store(&mut self, key: u64, value: u64) -> bool {
        self.put(key, value).is_some()
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }
}

impl ChurnCache for lru::LruCache<u64, u64> {
    fn lookup(&mut self, key: u64) -> Option<u64> {
        self.get(&key).copied()
    }

    fn store(&mut self, key: u64, value: u64) -> bool {
        let evicts = self.len() == self.cap().get() && !self.contains(&key);
        self.put(key, value);
        evicts
    }

    fn len(&self) -> usize {
        lru::LruCache::len(self)
    }
}

/// Runs the vector churn steps against one container
pub fn run_vector(container: VectorContainer, steps: &[VectorStep]) -> RunStats {
    let name = container.as_str();
    match container {
        VectorContainer::TinyVec => replay_vector(name, TinyVec::<u8>::new(), steps),
        VectorContainer::StdVec => replay_vector(name, Vec::<u8>::new(), steps),
    }
}

fn replay_vector<V: ChurnVector>(name: &'static str, mut v: V, steps: &[VectorStep]) -> RunStats {
    let mut stats = RunStats::new(name, steps.len());
    let start = Instant::now();

    for step in steps {
        if step.pop && !v.is_empty() {
            if let Some(value) = v.pop_byte() {
                stats.pops += 1;
                stats.observe(u64::from(value));
            }
        } else {
            v.push_byte(step.value);
            stats.pushes += 1;
        }
    }
    black_box(&v);

    stats.duration = start.elapsed();
    stats.final_len = v.len();
    stats.final_capacity = v.capacity();
    stats
}

/// Runs the request stream against one cache container
pub fn run_cache(
    container: CacheContainer,
    capacity: NonZeroUsize,
    requests: &[CacheRequest],
) -> RunStats {
    let name = container.as_str();
    match container {
        CacheContainer::TinyLru => {
            replay_cache(name, LruCache::<u64, u64>::new(capacity), requests)
        }
        CacheContainer::LruCrate => {
            replay_cache(name, lru::LruCache::<u64, u64>::new(capacity), requests)
        }
    }
}

fn replay_cache<C: ChurnCache>(
    name: &'static str,
    mut cache: C,
    requests: &[CacheRequest],
) -> RunStats {
    let mut stats = RunStats::new(name, requests.len());
    let start = Instant::now();

    for (i, request) in requests.iter().enumerate() {
        let value = i as u64;
        match request.kind {
            RequestKind::Get => match cache.lookup(request.key) {
                Some(found) => {
                    stats.hits += 1;
                    stats.observe(found);
                }
                None => {
                    stats.misses += 1;
                    if cache.store(request.key, value) {
                        stats.evictions += 1;
                    }
                }
            },
            RequestKind::Put => {
                if cache.store(request.key, value) {
                    stats.evictions += 1;
                }
            }
        }
    }

    stats.duration = start.elapsed();
    stats.final_len = cache.len();
    stats
}
