//! Mini Cache - An in-memory cache with pluggable eviction
//!
//! Provides TTL expiration, LRU / FIFO / TTL eviction, statistics and a
//! background expiry sweep, with every state change published on an event bus.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod tasks;

pub use cache::{CacheSystem, EvictionStrategy, StatsReport};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use error::CacheError;
pub use events::{CacheEvent, EventBus};
pub use tasks::{ManualScheduler, Scheduler, TokioScheduler};
