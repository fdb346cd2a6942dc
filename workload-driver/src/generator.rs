// Randomized workload generation

use crate::models::{
    CacheRequest, CacheWorkloadConfig, RequestKind, VectorStep, VectorWorkloadConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io;

/// Builds vector churn steps.
///
/// Each step flips a fair coin between pop and push. Step `i` pushes the byte
/// `i & 0xFF`.
pub fn vector_steps(config: &VectorWorkloadConfig) -> Vec<VectorStep> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    (0..config.ops)
        .map(|i| VectorStep {
            pop: rng.gen_bool(0.5),
            value: (i & 0xFF) as u8,
        })
        .collect()
}

/// Checks that a cache workload can be generated.
pub fn validate_cache_config(config: &CacheWorkloadConfig) -> io::Result<()> {
    let invalid = |msg: String| Err(io::Error::new(io::ErrorKind::InvalidInput, msg));

    if config.capacity == 0 {
        return invalid("capacity must be at least 1".to_string());
    }
    if config.keys == 0 {
        return invalid("key space must contain at least one key".to_string());
    }
    if config.hot_keys > config.keys {
        return invalid(format!(
            "hot set ({}) is larger than the key space ({})",
            config.hot_keys, config.keys
        ));
    }
    if config.hot_traffic_percent > 100 {
        return invalid(format!(
            "hot traffic must be a percentage, got {}",
            config.hot_traffic_percent
        ));
    }
    if config.put_percent > 100 {
        return invalid(format!(
            "put ratio must be a percentage, got {}",
            config.put_percent
        ));
    }
    Ok(())
}

/// Builds a cache request stream.
///
/// `hot_traffic_percent` of the requests pick a key uniformly from the hot set
/// `[0, hot_keys)`; the rest pick uniformly from the whole key space.
/// `put_percent` of the requests are explicit puts, the rest are
/// read-through gets.
pub fn cache_requests(config: &CacheWorkloadConfig) -> io::Result<Vec<CacheRequest>> {
    validate_cache_config(config)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let hot_probability = if config.hot_keys == 0 {
        0.0
    } else {
        f64::from(config.hot_traffic_percent) / 100.0
    };
    let put_probability = f64::from(config.put_percent) / 100.0;

    let requests = (0..config.ops)
        .map(|_| {
            let key = if rng.gen_bool(hot_probability) {
                rng.gen_range(0..config.hot_keys)
            } else {
                rng.gen_range(0..config.keys)
            };
            let kind = if rng.gen_bool(put_probability) {
                RequestKind::Put
            } else {
                RequestKind::Get
            };
            CacheRequest { key, kind }
        })
        .collect();

    Ok(requests)
}
