//! Configuration Module
//!
//! Handles loading and validating cache configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Serialize, Serializer};
use tracing::warn;

use crate::cache::EvictionStrategy;
use crate::clock::millis;
use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
    /// Strategy used to pick a victim when the cache is full
    pub eviction_strategy: EvictionStrategy,
    /// TTL applied when `set` is called without one; zero means no expiry
    #[serde(serialize_with = "serialize_millis")]
    pub default_ttl: Duration,
    /// Interval between background sweeps of expired entries
    #[serde(serialize_with = "serialize_millis")]
    pub cleanup_interval: Duration,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 100)
    /// - `CACHE_EVICTION_STRATEGY` - `LRU`, `FIFO` or `TTL` (default: LRU)
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 60000)
    /// - `CACHE_CLEANUP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 30000)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_size: env_or("CACHE_MAX_SIZE", defaults.max_size),
            eviction_strategy: env_or("CACHE_EVICTION_STRATEGY", defaults.eviction_strategy),
            default_ttl: Duration::from_millis(env_or(
                "CACHE_DEFAULT_TTL_MS",
                millis(defaults.default_ttl),
            )),
            cleanup_interval: Duration::from_millis(env_or(
                "CACHE_CLEANUP_INTERVAL_MS",
                millis(defaults.cleanup_interval),
            )),
        }
    }

    /// Checks the invariants a cache needs to be constructed.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(CacheError::Configuration(
                "max_size must be greater than 0".to_string(),
            ));
        }

        if self.cleanup_interval.is_zero() {
            return Err(CacheError::Configuration(
                "cleanup_interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: 100,
            eviction_strategy: EvictionStrategy::Lru,
            default_ttl: Duration::from_secs(60),
            cleanup_interval: Duration::from_secs(30),
        }
    }
}

/// Reads and parses an environment variable, falling back to `default` when
/// it is unset or malformed.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring unparsable value {:?} for {}", raw, name);
            default
        }),
        Err(_) => default,
    }
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(millis(*duration))
}
