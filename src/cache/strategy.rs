//! Eviction Strategy Module

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

// == Eviction Strategy ==
/// How a victim is chosen when the cache is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum EvictionStrategy {
    /// Least recently accessed entry goes first
    #[default]
    #[serde(rename = "LRU")]
    Lru,
    /// Earliest inserted entry goes first
    #[serde(rename = "FIRST_IN_FIRST_OUT")]
    Fifo,
    /// Entry closest to expiry goes first
    #[serde(rename = "TTL")]
    Ttl,
}

impl EvictionStrategy {
    /// Canonical name of the strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionStrategy::Lru => "LRU",
            EvictionStrategy::Fifo => "FIRST_IN_FIRST_OUT",
            EvictionStrategy::Ttl => "TTL",
        }
    }
}

impl fmt::Display for EvictionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a strategy name is not recognised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown eviction strategy: {0}")]
pub struct UnknownStrategy(pub String);

impl FromStr for EvictionStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LRU" => Ok(EvictionStrategy::Lru),
            "FIFO" | "FIRST_IN_FIRST_OUT" => Ok(EvictionStrategy::Fifo),
            "TTL" => Ok(EvictionStrategy::Ttl),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}
