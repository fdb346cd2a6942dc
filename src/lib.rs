#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Quick Reference
//!
//! | Container | Description | Storage |
//! |-----------|-------------|---------|
//! | [`TinyVec`] | Growable contiguous array | One raw allocation, doubled when full |
//! | [`LruCache`] | Bounded map with LRU eviction | Hash index plus an index-addressed recency list |
//!
//! ## Performance Characteristics
//!
//! | Operation | TinyVec | LruCache |
//! |-----------|---------|----------|
//! | append / put | amortized O(1) | O(1) expected |
//! | remove_last / remove | O(1) | O(1) expected |
//! | index / get | O(1) | O(1) expected |
//! | resize / clear | O(n) | O(n) |
//!
//! ## Code Examples
//!
//! ### TinyVec
//!
//! ```rust
//! use tiny_containers::{TinyVec, TinyVecError};
//!
//! let mut v = TinyVec::new();
//! assert_eq!(v.capacity(), 1);
//!
//! v.push(10);
//! v.push(20);
//! v.push(30);
//! assert_eq!(v.capacity(), 4);
//! assert_eq!(v[1], 20);
//!
//! assert_eq!(v.at(3), Err(TinyVecError::OutOfRange { index: 3, len: 3 }));
//! assert_eq!(v.remove_last(), Ok(30));
//!
//! // Moving out leaves an empty vector without storage behind
//! let moved = v.take();
//! assert_eq!(moved.as_slice(), &[10, 20]);
//! assert_eq!(v.capacity(), 0);
//! ```
//!
//! ### LRU (Least Recently Used)
//!
//! ```rust
//! use tiny_containers::LruCache;
//! use tiny_containers::config::LruCacheConfig;
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
//! ## Modules
//!
//! - [`vector`]: the growable array and its owning iterator
//! - [`error`]: errors reported by fallible array operations
//! - [`lru`]: Least Recently Used cache implementation
//! - [`config`]: Configuration structures for the cache
//! - [`metrics`]: Metrics collection for cache monitoring

#![no_std]

extern crate alloc;

#[cfg(any(feature = "std", not(feature = "hashbrown")))]
extern crate std;

/// Growable array with manually managed storage.
///
/// Provides [`TinyVec`], which allocates one contiguous region through the
/// global allocator and constructs and drops elements in it explicitly.
pub mod vector;

/// Error types for fallible array operations.
pub mod error;

/// Doubly linked list stored in an index-addressed arena.
///
/// **Note**: This module is internal infrastructure for the cache and is not
/// part of the public API.
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
/// The library does no logging; caches expose counters through the
/// [`CacheMetrics`](metrics::CacheMetrics) trait instead.
pub mod metrics;

pub use error::TinyVecError;
pub use lru::LruCache;
pub use vector::TinyVec;
