//! Least Recently Used (LRU) Cache Implementation
//!
//! This module provides a bounded cache with O(1) expected-time lookups and
//! insertions that evicts the least recently used entry once it is full.
//!
//! # Algorithm
//!
//! Entries live in a recency list: the front holds the most recently used
//! entry and the back the least recently used one. A hash index maps each key
//! to the list handle of its entry. A hit moves the entry to the front; an
//! insertion into a full cache first drops the entry at the back.
//!
//! ```text
//!   index (HashMap<K, Handle>)          recency list
//!   ┌──────┬────────┐        front (MRU)                 back (LRU)
//!   │ "c"  │ slot 3 │──┐      ┌───────┐   ┌───────┐   ┌───────┐
//!   │ "a"  │ slot 1 │──┼────▶ │ c, 30 │◀─▶│ a, 10 │◀─▶│ b, 20 │
//!   │ "b"  │ slot 2 │──┘      └───────┘   └───────┘   └───────┘
//!   └──────┴────────┘
//! ```
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**: get, put, remove and pop_lru are O(1) expected.
//! - **Space Complexity**: O(n) in the capacity. The list and index grow on
//!   demand; removed slots are reused, so the footprint never exceeds what the
//!   largest population needed.
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. For concurrent access, wrap the
//! cache in a synchronization primitive such as `Mutex`. The cache holds no raw
//! pointers, so it is `Send` and `Sync` whenever its keys, values and hasher are.

use crate::config::LruCacheConfig;
use crate::list::{self, Handle, List};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity and supports O(1) operations for
/// inserting, retrieving, and updating entries. When a new key arrives while
/// the cache is full, the least recently used entry is evicted first, so the
/// cache never holds more than `cap()` entries.
///
/// # Examples
///
/// ```
/// use tiny_containers::LruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
///
/// // Add items to the cache
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// assert_eq!(cache.put("cherry", 3), Some(("banana", 2)));
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: List<(K, V)>,
    map: HashMap<K, Handle, S>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a new LRU cache that holds at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::with_hasher(cap, DefaultHashBuilder::default())
    }

    /// Creates a new LRU cache from a configuration.
    ///
    /// `hasher` defaults to a freshly seeded [`DefaultHashBuilder`] when `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiny_containers::config::LruCacheConfig;
    /// use tiny_containers::LruCache;
    /// use core::num::NonZeroUsize;
    ///
    /// let config = LruCacheConfig {
    ///     capacity: NonZeroUsize::new(100).unwrap(),
    /// };
    /// let cache: LruCache<String, i32> = LruCache::init(config, None);
    /// assert!(cache.is_empty());
    /// ```
    pub fn init(
        config: LruCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::init_with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a new LRU cache with the specified capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        Self::init_with_hasher(LruCacheConfig { capacity: cap }, hash_builder)
    }

    /// Creates a new LRU cache from a configuration and a custom hash builder.
    ///
    /// Use this for deterministic hashing or DoS-resistant hashers.
    pub fn init_with_hasher(config: LruCacheConfig, hash_builder: S) -> Self {
        let cap = config.capacity;
        LruCache {
            config,
            list: List::new(cap),
            map: HashMap::with_capacity_and_hasher(cap.get(), hash_builder),
            metrics: LruCacheMetrics::new(cap.get() as u64),
        }
    }

    /// Returns the maximum number of entries the cache can hold.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    /// Returns the number of entries currently in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the cache contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the metrics collected so far.
    #[inline]
    pub fn metrics_snapshot(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    /// Looks up `key`, marking its entry as the most recently used.
    ///
    /// Counts a hit when the key is present and a miss otherwise.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(handle) => {
                self.list.move_to_front(handle);
                self.metrics.core.record_hit();
                self.list.get_value(handle).map(|(_, v)| v)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    /// Mutable counterpart of [`get`](Self::get), with the same recency and
    /// counter behavior.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(handle) => {
                self.list.move_to_front(handle);
                self.metrics.core.record_hit();
                self.list.get_value_mut(handle).map(|(_, v)| v)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    /// Returns the value for `key` without touching recency or counters.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.map.get(key).copied()?;
        self.list.get_value(handle).map(|(_, v)| v)
    }

    /// Returns `true` if `key` is cached. Does not touch recency or counters.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Inserts or updates an entry and marks it as the most recently used.
    ///
    /// Updating an existing key replaces its value in place and never evicts.
    /// Inserting a new key into a full cache evicts the least recently used
    /// entry first and returns it.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        if let Some(handle) = self.map.get(&key).copied() {
            self.list.move_to_front(handle);
            self.list.update(handle, (key, value));
            self.metrics.core.record_update();
            return None;
        }

        let evicted = if self.list.is_full() {
            let evicted = self.take_lru();
            if evicted.is_some() {
                self.metrics.core.record_eviction();
            }
            evicted
        } else {
            None
        };

        if let Some(handle) = self.list.add((key.clone(), value)) {
            self.map.insert(key, handle);
            self.metrics.core.record_insertion();
        }

        evicted
    }

    /// Removes `key` from the cache, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.map.remove(key)?;
        let (_, value) = self.list.remove(handle)?;
        self.metrics.core.record_removal();
        Some(value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.take_lru()?;
        self.metrics.core.record_removal();
        Some(entry)
    }

    fn take_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.remove_last()?;
        self.map.remove(&key);
        Some((key, value))
    }

    /// Removes every entry. Capacity and metrics are kept.
    pub fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }

    /// Iterates over the entries from most to least recently used.
    ///
    /// Iteration does not change recency.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.list.len())
            .finish()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// Iterator over the entries of an [`LruCache`], most recently used first.
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.inner.len())
            .finish()
    }
}
