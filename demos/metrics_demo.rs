//! Cache Metrics Demonstration
//!
//! Runs a small workload through an LRU cache and prints what its metrics
//! report, including the deterministic key ordering of the metrics map.

use core::num::NonZeroUsize;
use tiny_containers::{config::LruCacheConfig, lru::LruCache, metrics::CacheMetrics};

fn main() {
    println!("🚀 Cache Metrics Demonstration");
    println!("==============================\n");

    // Small capacity to force evictions
    let capacity = NonZeroUsize::new(3).unwrap();

    println!("📊 Workload:");
    println!("   • Capacity: {} items", capacity.get());
    println!("   • Insert 3 items → access patterns → misses → insert 2 more\n");

    let cache = run_workload(capacity);

    display_metrics(&cache);
    display_residents(&cache);
    demonstrate_deterministic_ordering(&cache);
}

/// Run the standard workload against an LRU cache
fn run_workload(capacity: NonZeroUsize) -> LruCache<&'static str, i32> {
    println!("🔄 Running LRU workload...");
    let config = LruCacheConfig { capacity };
    let mut cache = LruCache::init(config, None);

    cache.put("apple", 1);
    cache.put("banana", 2);
    cache.put("cherry", 3);

    // apple becomes most recently used
    cache.get(&"apple");
    cache.get(&"apple");
    cache.get(&"banana");

    // Lookups for keys that were never cached
    cache.get(&"fig");
    cache.get(&"grape");

    // cherry and then apple are evicted
    for (key, value) in [("date", 4), ("elderberry", 5)] {
        if let Some((evicted, old)) = cache.put(key, value) {
            println!("   • inserting {key:<10} evicted {evicted} = {old}");
        }
    }

    println!("   ✅ Workload completed");
    cache
}

/// Display the core counters of a cache
fn display_metrics(cache: &dyn CacheMetrics) {
    println!("\n📈 {} METRICS", cache.algorithm_name());
    println!("================\n");

    let metrics = cache.metrics();
    println!(
        "{:<8} {:<8} {:<10} {:<12} {:<8}",
        "Hits", "Misses", "Evictions", "Hit Rate %", "Requests"
    );
    println!("{}", "-".repeat(50));

    let hits = metrics.get("cache_hits").unwrap_or(&0.0);
    let misses = metrics.get("cache_misses").unwrap_or(&0.0);
    let evictions = metrics.get("evictions").unwrap_or(&0.0);
    let hit_rate = metrics.get("hit_rate").unwrap_or(&0.0) * 100.0;
    let requests = metrics.get("requests").unwrap_or(&0.0);

    println!("{hits:<8.0} {misses:<8.0} {evictions:<10.0} {hit_rate:<12.1} {requests:<8.0}");
}

/// Display the entries still cached, most recently used first
fn display_residents(cache: &LruCache<&'static str, i32>) {
    println!("\n🗂️  Residents (most → least recently used):");
    for (key, value) in cache.iter() {
        println!("  • {key} = {value}");
    }
}

/// Show that the metrics map iterates in the same order every time
fn demonstrate_deterministic_ordering(cache: &dyn CacheMetrics) {
    println!("\n🔁 Deterministic Ordering:");
    let first: Vec<String> = cache.metrics().into_keys().collect();
    let second: Vec<String> = cache.metrics().into_keys().collect();
    println!("  • keys: {}", first.join(", "));
    println!(
        "  • identical across calls: {}",
        if first == second { "yes" } else { "no" }
    );
}
