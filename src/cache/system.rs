//! Cache System Module
//!
//! Thread-safe cache handle: wraps a [`CacheStore`] in a lock, publishes its
//! events on an [`EventBus`] and owns the background expiry sweep.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::cache::{CacheStore, DebugInfo, EvictionStrategy, StatsReport};
use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::events::{names, CacheEvent, EventBus};
use crate::tasks::{sweep_task, ScheduleHandle, Scheduler, TokioScheduler};

// == Cache System ==
/// A bounded, expiring cache whose every state change is published on an
/// event bus.
///
/// All operations lock the whole cache for their duration. Events are
/// published after the lock is released, so handlers may call back into the
/// cache. Event order matches state-change order only within a single caller.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use mini_cache::{CacheConfig, CacheSystem, ManualScheduler};
///
/// let cache: CacheSystem<&str> = CacheSystem::builder(CacheConfig::default())
///     .scheduler(ManualScheduler::new())
///     .build()
///     .unwrap();
///
/// cache.set("greeting", "hello", Some(Duration::from_secs(5)));
/// assert_eq!(cache.get("greeting"), Some("hello"));
/// cache.shutdown();
/// ```
pub struct CacheSystem<V> {
    store: Arc<Mutex<CacheStore<V>>>,
    bus: EventBus<CacheEvent<V>>,
    /// Present while the sweep is scheduled
    sweep: Mutex<Option<ScheduleHandle>>,
}

impl<V> CacheSystem<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a cache with the system clock, a fresh event bus and a sweep
    /// on the current tokio runtime.
    ///
    /// # Errors
    /// - `CacheError::Configuration` if the configuration is invalid
    /// - `CacheError::Scheduler` if called outside a tokio runtime
    pub fn new(config: CacheConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Starts building a cache with injected collaborators.
    pub fn builder(config: CacheConfig) -> CacheSystemBuilder<V> {
        CacheSystemBuilder {
            config,
            clock: None,
            scheduler: None,
            bus: None,
        }
    }

    // == Set ==
    /// Stores a key-value pair, evicting one entry if the key is new and the
    /// cache is full.
    ///
    /// `ttl` defaults to the configured TTL; a zero TTL never expires.
    /// Returns `false`, changing nothing, if `key` is empty.
    pub fn set(&self, key: &str, value: V, ttl: Option<Duration>) -> bool {
        self.with_store(|store| store.set(key, value, ttl))
    }

    // == Get ==
    /// Retrieves a live value, counting a hit or a miss.
    pub fn get(&self, key: &str) -> Option<V> {
        self.with_store(|store| store.get(key))
    }

    // == Has ==
    /// Checks for a live value without counting an access.
    pub fn has(&self, key: &str) -> bool {
        self.with_store(|store| store.has(key))
    }

    // == Delete ==
    /// Removes an entry. Returns whether anything was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.with_store(|store| store.delete(key))
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&self) {
        self.with_store(|store| store.clear())
    }

    /// Returns the current keys in first-insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.store.lock().keys()
    }

    /// Returns the number of entries, expired ones not yet removed included.
    pub fn size(&self) -> usize {
        self.store.lock().len()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> StatsReport {
        self.store.lock().report()
    }

    pub fn reset_stats(&self) {
        self.with_store(|store| store.reset_stats())
    }

    // == Strategy ==
    pub fn eviction_strategy(&self) -> EvictionStrategy {
        self.store.lock().strategy()
    }

    /// Switches the eviction strategy. Always succeeds.
    pub fn set_eviction_strategy(&self, strategy: EvictionStrategy) -> bool {
        self.with_store(|store| store.set_strategy(strategy));
        true
    }

    /// Switches the eviction strategy by name (`LRU`, `FIFO`,
    /// `FIRST_IN_FIRST_OUT`, `TTL`).
    ///
    /// Unknown names are ignored and return `false`.
    pub fn set_eviction_strategy_named(&self, name: &str) -> bool {
        match name.parse() {
            Ok(strategy) => self.set_eviction_strategy(strategy),
            Err(err) => {
                debug!("Ignoring strategy change: {}", err);
                false
            }
        }
    }

    // == Max Size ==
    pub fn max_size(&self) -> usize {
        self.store.lock().max_size()
    }

    /// Changes the capacity, evicting until the cache fits.
    ///
    /// A zero capacity is ignored and returns `false`.
    pub fn set_max_size(&self, max_size: usize) -> bool {
        self.with_store(|store| store.set_max_size(max_size))
    }

    // == Sweep ==
    /// Removes expired entries now, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.with_store(|store| store.purge_expired())
    }

    // == Lifecycle ==
    pub fn is_running(&self) -> bool {
        self.sweep.lock().is_some()
    }

    /// Stops the sweep, publishes final statistics and removes every
    /// subscription from the bus.
    ///
    /// Calling it again does nothing.
    pub fn shutdown(&self) {
        let Some(handle) = self.sweep.lock().take() else {
            debug!("Cache already shut down");
            return;
        };
        handle.cancel();

        let stats = {
            let mut store = self.store.lock();
            store.stop();
            store.report()
        };

        info!(
            "Cache shut down: hits={}, misses={}, evictions={}, size={}",
            stats.hits, stats.misses, stats.evictions, stats.current_size
        );

        self.bus
            .publish(names::SHUTDOWN, &CacheEvent::Shutdown { stats });
        self.bus.clear(None);
    }

    /// Returns the bus this cache publishes on.
    pub fn event_bus(&self) -> EventBus<CacheEvent<V>> {
        self.bus.clone()
    }

    pub fn debug_info(&self) -> DebugInfo {
        self.store.lock().debug_info()
    }

    /// Runs `op` under the lock, then publishes what it queued.
    fn with_store<R>(&self, op: impl FnOnce(&mut CacheStore<V>) -> R) -> R {
        let (result, events) = {
            let mut store = self.store.lock();
            let result = op(&mut *store);
            (result, store.drain_events())
        };

        for event in &events {
            self.bus.publish(event.name(), event);
        }
        result
    }
}

impl<V> Drop for CacheSystem<V> {
    fn drop(&mut self) {
        if let Some(handle) = self.sweep.get_mut().take() {
            handle.cancel();
        }
    }
}

impl<V> fmt::Debug for CacheSystem<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheSystem")
            .field("running", &self.sweep.lock().is_some())
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}

// == Builder ==
/// Configures the collaborators of a [`CacheSystem`].
pub struct CacheSystemBuilder<V> {
    config: CacheConfig,
    clock: Option<Arc<dyn Clock>>,
    scheduler: Option<Box<dyn Scheduler>>,
    bus: Option<EventBus<CacheEvent<V>>>,
}

impl<V> CacheSystemBuilder<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Uses `clock` instead of the system clock.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Uses `scheduler` for the expiry sweep instead of the tokio runtime.
    pub fn scheduler(mut self, scheduler: impl Scheduler + 'static) -> Self {
        self.scheduler = Some(Box::new(scheduler));
        self
    }

    /// Publishes on an existing bus instead of a private one.
    pub fn event_bus(mut self, bus: EventBus<CacheEvent<V>>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Validates the configuration, creates the cache and starts its sweep.
    pub fn build(self) -> Result<CacheSystem<V>> {
        self.config.validate()?;

        let scheduler: Box<dyn Scheduler> = match self.scheduler {
            Some(scheduler) => scheduler,
            None => Box::new(TokioScheduler::try_current().ok_or_else(|| {
                CacheError::Scheduler("no tokio runtime available".to_string())
            })?),
        };
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let bus = self.bus.unwrap_or_default();

        let store = Arc::new(Mutex::new(CacheStore::new(&self.config, clock)));
        let tick = sweep_task(Arc::downgrade(&store), bus.clone());
        let handle = scheduler.schedule_repeating(self.config.cleanup_interval, tick);

        info!(
            "Cache started: max_size={}, strategy={}, default_ttl={:?}, cleanup_interval={:?}",
            self.config.max_size,
            self.config.eviction_strategy,
            self.config.default_ttl,
            self.config.cleanup_interval
        );

        Ok(CacheSystem {
            store,
            bus,
            sweep: Mutex::new(Some(handle)),
        })
    }
}
