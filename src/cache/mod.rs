//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU / FIFO / TTL
//! eviction, observable through an event bus.

mod entry;
mod ledger;
mod stats;
mod store;
mod strategy;
mod system;


// Re-export public types
pub use entry::CacheEntry;
pub use ledger::OrderLedger;
pub use stats::{CacheStats, StatsReport};
pub use store::{CacheStore, DebugInfo};
pub use strategy::{EvictionStrategy, UnknownStrategy};
pub use system::{CacheSystem, CacheSystemBuilder};
