//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use serde::Serialize;

use crate::cache::EvictionStrategy;

// == Cache Stats ==
/// Running counters, reset only by an explicit `reset`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of entries removed for any reason
    pub evictions: u64,
    /// Number of successful `set` calls, overwrites included
    pub insertions: u64,
    /// Current number of entries in the cache
    pub current_size: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Updates the live entry count.
    pub fn set_current_size(&mut self, count: usize) {
        self.current_size = count;
    }

    // == Reset ==
    /// Zeroes every counter, keeping the live entry count.
    pub fn reset(&mut self) {
        *self = Self {
            current_size: self.current_size,
            ..Self::default()
        };
    }
}

// == Stats Report ==
/// Point-in-time view of the statistics together with the cache settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub insertions: u64,
    pub current_size: usize,
    pub hit_rate: f64,
    pub max_size: usize,
    pub eviction_strategy: EvictionStrategy,
}

impl StatsReport {
    pub(crate) fn new(stats: &CacheStats, max_size: usize, strategy: EvictionStrategy) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            insertions: stats.insertions,
            current_size: stats.current_size,
            hit_rate: stats.hit_rate(),
            max_size,
            eviction_strategy: strategy,
        }
    }
}
