//! Cache Configuration Module
//!
//! Configuration structs have all public fields for simple instantiation: build
//! the struct, then hand it to the cache's `init` constructor.
//!
//! | Config | Cache | Description |
//! |--------|-------|-------------|
//! | `LruCacheConfig` | [`LruCache`](crate::LruCache) | Least Recently Used |
//!
//! # Examples
//!
//! ```
//! use tiny_containers::config::LruCacheConfig;
//! use tiny_containers::LruCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(2).unwrap(),
//! };
//! let mut cache = LruCache::init(config, None);
//! cache.put("a", 1);
//! assert_eq!(cache.get(&"a"), Some(&1));
//! ```

pub mod lru;

pub use lru::LruCacheConfig;
