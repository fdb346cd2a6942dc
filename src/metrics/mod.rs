//! Cache Metrics System
//!
//! The library is `no_std` and does no logging. What a cache does is observable
//! through counters instead: every cache keeps a metrics struct that it updates
//! as it runs and reports through the [`CacheMetrics`] trait.
//!
//! Metrics are reported as a `BTreeMap<String, f64>` so that keys always come out
//! in the same (alphabetical) order, which keeps printed tables and CSV exports
//! stable between runs.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lru;

pub use lru::LruCacheMetrics;

/// Counters shared by every cache
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups (`get`/`get_mut`) made to the cache
    pub requests: u64,

    /// Number of lookups that found their key
    pub cache_hits: u64,

    /// Number of `put` calls that created a new entry
    pub insertions: u64,

    /// Number of `put` calls that replaced the value of an existing entry
    pub updates: u64,

    /// Number of entries dropped to make room for a new key
    pub evictions: u64,

    /// Number of entries taken out explicitly (`remove`, `pop_lru`)
    pub removals: u64,
}

impl CoreCacheMetrics {
    /// Creates a zeroed set of counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found its key
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup for a key that is not cached
    ///
    /// Misses are not stored separately; they are `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a new entry being written to the cache
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records an existing entry having its value replaced
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records an entry evicted due to capacity constraints
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records an entry removed at the caller's request
    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    /// Number of lookups that did not find their key
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Calculates the cache hit rate
    ///
    /// # Returns
    /// A value between 0.0 and 1.0, or 0.0 if no requests have been made
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Calculates the cache miss rate
    ///
    /// # Returns
    /// A value between 0.0 and 1.0, or 0.0 if no requests have been made
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Convert core metrics to BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        // Counters
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("removals".to_string(), self.removals as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("updates".to_string(), self.updates as f64);

        // Rates (0.0 to 1.0)
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.requests > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// Uniform metrics reporting for caches
///
/// Lets a caller (the workload driver, a test) pull numbers out of any cache
/// without knowing its concrete type.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification, e.g. "LRU"
    fn algorithm_name(&self) -> &'static str;
}
