// Data models for workload runs

use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// One step of a vector churn workload.
///
/// The step carries a coin flip rather than a concrete operation: a pop is
/// only performed when the vector is non-empty, otherwise the step pushes.
/// Every container replaying the same steps therefore performs the same
/// sequence of operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorStep {
    /// Whether this step asks for a pop
    pub pop: bool,
    /// Byte pushed when the step ends up pushing
    pub value: u8,
}

/// Kind of cache request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Look the key up; on a miss, insert it (read-through)
    Get,
    /// Write the key unconditionally
    Put,
}

/// A single cache request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheRequest {
    pub key: u64,
    pub kind: RequestKind,
}

/// Workload families the driver knows how to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workload {
    /// Random push/pop churn on a byte vector
    Vector,
    /// Read-through gets and puts on a bounded cache
    Cache,
}

impl Workload {
    pub fn as_str(&self) -> &'static str {
        match self {
            Workload::Vector => "vector",
            Workload::Cache => "cache",
        }
    }
}

/// Vector implementations the driver can exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VectorContainer {
    /// `tiny_containers::TinyVec`
    TinyVec,
    /// `std::vec::Vec` baseline
    StdVec,
}

impl VectorContainer {
    pub fn as_str(&self) -> &'static str {
        match self {
            VectorContainer::TinyVec => "TinyVec",
            VectorContainer::StdVec => "Vec",
        }
    }

    /// Containers to run, implementation first
    pub fn selected(baseline: bool) -> Vec<VectorContainer> {
        if baseline {
            vec![VectorContainer::TinyVec, VectorContainer::StdVec]
        } else {
            vec![VectorContainer::TinyVec]
        }
    }
}

impl fmt::Display for VectorContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cache implementations the driver can exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CacheContainer {
    /// `tiny_containers::LruCache`
    TinyLru,
    /// `lru::LruCache` baseline (external crate for comparison)
    LruCrate,
}

impl CacheContainer {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheContainer::TinyLru => "TinyLru",
            CacheContainer::LruCrate => "lru",
        }
    }

    /// Containers to run, implementation first
    pub fn selected(baseline: bool) -> Vec<CacheContainer> {
        if baseline {
            vec![CacheContainer::TinyLru, CacheContainer::LruCrate]
        } else {
            vec![CacheContainer::TinyLru]
        }
    }
}

impl fmt::Display for CacheContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameters of a vector churn workload
#[derive(Debug, Clone)]
pub struct VectorWorkloadConfig {
    /// Number of steps
    pub ops: usize,
    /// Seed for the step generator
    pub seed: u64,
}

/// Parameters of a cache workload
#[derive(Debug, Clone)]
pub struct CacheWorkloadConfig {
    /// Number of requests
    pub ops: usize,
    /// Cache capacity (number of entries)
    pub capacity: usize,
    /// Size of the key space
    pub keys: u64,
    /// Number of keys in the hot set (the lowest key ids)
    pub hot_keys: u64,
    /// Percentage of requests that target the hot set
    pub hot_traffic_percent: u8,
    /// Percentage of requests that are explicit puts
    pub put_percent: u8,
    /// Seed for the request generator
    pub seed: u64,
}

/// Outcome of replaying one workload against one container
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Display name of the container that ran
    pub container: &'static str,
    pub ops: usize,
    pub duration: Duration,
    // Vector counters
    pub pushes: u64,
    pub pops: u64,
    pub final_capacity: usize,
    // Cache counters
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub final_len: usize,
    /// Order-sensitive digest of every value observed; equal digests mean two
    /// containers behaved identically on the same stream.
    pub checksum: u64,
}

impl RunStats {
    pub fn new(container: &'static str, ops: usize) -> Self {
        Self {
            container,
            ops,
            ..Default::default()
        }
    }

    /// Hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration.as_secs_f64()
    }

    pub fn ops_per_sec(&self) -> f64 {
        let secs = self.duration_secs();
        if secs > 0.0 {
            self.ops as f64 / secs
        } else {
            0.0
        }
    }

    pub fn avg_ns(&self) -> f64 {
        if self.ops > 0 {
            self.duration.as_nanos() as f64 / self.ops as f64
        } else {
            0.0
        }
    }

    /// Folds one observed value into the checksum
    pub fn observe(&mut self, value: u64) {
        self.checksum = self
            .checksum
            .wrapping_mul(0x100_0000_01b3)
            .wrapping_add(value);
    }
}

/// One row of the CSV export
#[derive(Debug, Serialize)]
pub struct CsvResultRow {
    pub workload: String,
    pub container: String,
    pub ops: usize,
    pub duration_ns: u64,
    pub ops_per_sec: f64,
    pub avg_ns: f64,
    pub pushes: u64,
    pub pops: u64,
    pub final_capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub evictions: u64,
    pub final_len: usize,
    pub checksum: u64,
}
