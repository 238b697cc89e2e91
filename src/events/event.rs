//! Cache Event Module
//!
//! Typed payloads for every notification the cache publishes.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::cache::{CacheEntry, EvictionStrategy, StatsReport};

/// Event names, as published on the bus.
pub mod names {
    pub const SET: &str = "cache:set";
    pub const HIT: &str = "cache:hit";
    pub const MISS: &str = "cache:miss";
    pub const EVICTION: &str = "cache:eviction";
    pub const CLEAR: &str = "cache:clear";
    pub const CLEANUP: &str = "cache:cleanup";
    pub const STATS_RESET: &str = "cache:statsReset";
    pub const STRATEGY_CHANGED: &str = "cache:strategyChanged";
    pub const MAX_SIZE_CHANGED: &str = "cache:maxSizeChanged";
    pub const SHUTDOWN: &str = "cache:shutdown";
}

// == Miss Reason ==
/// Why a lookup missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissReason {
    /// The key was never stored or has already been removed
    Absent,
    /// The key was found but its TTL had elapsed
    Expired,
}

// == Eviction Reason ==
/// Why an entry left the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EvictionReason {
    /// Capacity eviction, least recently used victim
    #[serde(rename = "LRU")]
    Lru,
    /// Capacity eviction, earliest inserted victim
    #[serde(rename = "FIFO")]
    Fifo,
    /// Capacity eviction, soonest expiring victim
    #[serde(rename = "TTL")]
    Ttl,
    /// TTL elapsed
    #[serde(rename = "expired")]
    Expired,
    /// Removed by `delete`
    #[serde(rename = "manual")]
    Manual,
    /// Removed by `clear`
    #[serde(rename = "clear")]
    Clear,
}

impl fmt::Display for EvictionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EvictionReason::Lru => "LRU",
            EvictionReason::Fifo => "FIFO",
            EvictionReason::Ttl => "TTL",
            EvictionReason::Expired => "expired",
            EvictionReason::Manual => "manual",
            EvictionReason::Clear => "clear",
        };
        f.write_str(label)
    }
}

// == Cache Event ==
/// A state transition of the cache.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEvent<V> {
    Set {
        key: String,
        value: V,
        /// TTL actually applied, `None` when the entry never expires
        ttl: Option<Duration>,
        expires_at: Option<u64>,
    },
    Hit {
        key: String,
        value: V,
    },
    Miss {
        key: String,
        reason: MissReason,
    },
    Eviction {
        key: String,
        reason: EvictionReason,
        entry: CacheEntry<V>,
    },
    Clear {
        previous_size: usize,
    },
    Cleanup {
        count: usize,
    },
    StatsReset,
    StrategyChanged {
        strategy: EvictionStrategy,
    },
    MaxSizeChanged {
        max_size: usize,
    },
    Shutdown {
        stats: StatsReport,
    },
}

impl<V> CacheEvent<V> {
    /// Returns the bus event name this payload is published under.
    pub fn name(&self) -> &'static str {
        match self {
            CacheEvent::Set { .. } => names::SET,
            CacheEvent::Hit { .. } => names::HIT,
            CacheEvent::Miss { .. } => names::MISS,
            CacheEvent::Eviction { .. } => names::EVICTION,
            CacheEvent::Clear { .. } => names::CLEAR,
            CacheEvent::Cleanup { .. } => names::CLEANUP,
            CacheEvent::StatsReset => names::STATS_RESET,
            CacheEvent::StrategyChanged { .. } => names::STRATEGY_CHANGED,
            CacheEvent::MaxSizeChanged { .. } => names::MAX_SIZE_CHANGED,
            CacheEvent::Shutdown { .. } => names::SHUTDOWN,
        }
    }

    /// Returns the key the event concerns, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            CacheEvent::Set { key, .. }
            | CacheEvent::Hit { key, .. }
            | CacheEvent::Miss { key, .. }
            | CacheEvent::Eviction { key, .. } => Some(key),
            _ => None,
        }
    }
}
