//! Expiry Sweep Task
//!
//! Builds the periodic callback that removes expired cache entries.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::CacheStore;
use crate::events::{CacheEvent, EventBus};
use crate::tasks::Tick;

/// Creates the sweep callback for a cache.
///
/// The callback holds only a weak reference to the store, so it never keeps
/// a dropped cache alive. It does nothing once the store is stopped, and a
/// sweep that fires while another is still publishing is skipped.
///
/// # Arguments
/// * `store` - Weak reference to the cache state
/// * `bus` - Bus the sweep's eviction and cleanup events are published on
pub(crate) fn sweep_task<V>(store: Weak<Mutex<CacheStore<V>>>, bus: EventBus<CacheEvent<V>>) -> Tick
where
    V: Clone + Send + Sync + 'static,
{
    let in_progress = AtomicBool::new(false);

    Arc::new(move || {
        let Some(store) = store.upgrade() else {
            return;
        };

        if in_progress.swap(true, Ordering::SeqCst) {
            debug!("Expiry sweep already in progress, skipping");
            return;
        }

        let events = {
            let mut guard = store.lock();
            if guard.is_running() {
                guard.purge_expired();
                guard.drain_events()
            } else {
                Vec::new()
            }
        };

        for event in &events {
            bus.publish(event.name(), event);
        }

        in_progress.store(false, Ordering::SeqCst);
    })
}
