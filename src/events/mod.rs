//! Events Module
//!
//! Synchronous publish/subscribe hub and the typed notifications the cache
//! emits through it.

mod bus;
mod event;

pub use bus::{EventBus, HandlerId, Subscription};
pub use event::{names, CacheEvent, EvictionReason, MissReason};
