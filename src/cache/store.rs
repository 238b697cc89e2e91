//! Cache Store Module
//!
//! Cache state machine: entries, ordering ledgers, statistics and the
//! eviction policy. Not synchronised itself; `CacheSystem` wraps it in a lock.
//!
//! Every transition queues a [`CacheEvent`] instead of publishing it, so the
//! owner can release its lock before handlers run.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::cache::{CacheEntry, CacheStats, EvictionStrategy, OrderLedger, StatsReport};
use crate::clock::Clock;
use crate::config::CacheConfig;
use crate::events::{CacheEvent, EvictionReason, MissReason};

// == Debug Info ==
/// Internal sizes and settings, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugInfo {
    pub cache_size: usize,
    pub access_ledger_size: usize,
    pub insertion_ledger_size: usize,
    pub eviction_strategy: EvictionStrategy,
    pub max_size: usize,
    pub default_ttl: Duration,
}

// == Cache Store ==
/// Bounded key-value storage with expiry and pluggable eviction.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Last access per key, populated under LRU only
    access: OrderLedger,
    /// First insertion per key, populated under FIFO only
    insertion: OrderLedger,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_size: usize,
    strategy: EvictionStrategy,
    /// TTL for entries stored without an explicit one
    default_ttl: Duration,
    /// Sequence number handed to the next new key
    next_seq: u64,
    clock: Arc<dyn Clock>,
    running: bool,
    /// Events waiting to be published
    pending: Vec<CacheEvent<V>>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store. The configuration is expected to be validated.
    pub fn new(config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            access: OrderLedger::new(),
            insertion: OrderLedger::new(),
            stats: CacheStats::new(),
            max_size: config.max_size,
            strategy: config.eviction_strategy,
            default_ttl: config.default_ttl,
            next_seq: 0,
            clock,
            running: true,
            pending: Vec::new(),
        }
    }

    // == Set ==
    /// Stores a key-value pair.
    ///
    /// If the key is new and the cache is full, one victim is evicted first.
    /// Overwriting keeps the key's insertion position and is not an eviction.
    ///
    /// # Arguments
    /// * `key` - The key to store; empty keys are rejected
    /// * `value` - The value to store
    /// * `ttl` - Lifetime of the entry (uses default_ttl if None, zero = no expiry)
    ///
    /// # Returns
    /// `false` if the key was rejected, `true` otherwise.
    pub fn set(&mut self, key: &str, value: V, ttl: Option<Duration>) -> bool {
        if key.is_empty() {
            debug!("Rejected set with an empty key");
            return false;
        }

        let now = self.clock.now_ms();

        let seq = match self.entries.get(key) {
            Some(existing) => existing.seq,
            None => {
                if self.entries.len() >= self.max_size {
                    self.evict_one();
                }
                let seq = self.next_seq;
                self.next_seq += 1;
                seq
            }
        };

        let ttl = ttl.unwrap_or(self.default_ttl);
        let entry = CacheEntry::new(value.clone(), now, Some(ttl), seq);
        let expires_at = entry.expires_at;
        self.entries.insert(key.to_string(), entry);

        match self.strategy {
            EvictionStrategy::Lru => self.access.record(key, now),
            EvictionStrategy::Fifo => self.insertion.record_if_absent(key, now),
            EvictionStrategy::Ttl => {}
        }

        self.stats.record_insertion();
        self.stats.set_current_size(self.entries.len());

        self.pending.push(CacheEvent::Set {
            key: key.to_string(),
            value,
            ttl: expires_at.map(|_| ttl),
            expires_at,
        });
        true
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Expired entries are removed and counted as misses. Hits refresh the
    /// access ledger under LRU.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();

        let lookup = self.entries.get(key).map(|entry| {
            if entry.is_expired(now) {
                None
            } else {
                Some(entry.value.clone())
            }
        });

        match lookup {
            Some(Some(value)) => {
                if self.strategy == EvictionStrategy::Lru {
                    self.access.record(key, now);
                }
                self.stats.record_hit();
                self.pending.push(CacheEvent::Hit {
                    key: key.to_string(),
                    value: value.clone(),
                });
                Some(value)
            }
            Some(None) => {
                self.remove_entry(key, EvictionReason::Expired);
                self.record_miss(key, MissReason::Expired);
                None
            }
            None => {
                self.record_miss(key, MissReason::Absent);
                None
            }
        }
    }

    // == Has ==
    /// Checks whether a live entry exists, without touching statistics or
    /// the access ledger. Expired entries are still removed.
    pub fn has(&mut self, key: &str) -> bool {
        let now = self.clock.now_ms();

        match self.entries.get(key).map(|entry| entry.is_expired(now)) {
            Some(false) => true,
            Some(true) => {
                self.remove_entry(key, EvictionReason::Expired);
                false
            }
            None => false,
        }
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key, EvictionReason::Manual)
    }

    // == Clear ==
    /// Removes every entry, one eviction at a time, then queues a summary.
    pub fn clear(&mut self) {
        let previous_size = self.entries.len();

        for key in self.keys() {
            self.remove_entry(&key, EvictionReason::Clear);
        }

        self.pending.push(CacheEvent::Clear { previous_size });
    }

    // == Keys ==
    /// Returns the current keys in first-insertion order.
    pub fn keys(&self) -> Vec<String> {
        let mut ordered: Vec<(&String, u64)> = self
            .entries
            .iter()
            .map(|(key, entry)| (key, entry.seq))
            .collect();
        ordered.sort_unstable_by_key(|(_, seq)| *seq);
        ordered.into_iter().map(|(key, _)| key.clone()).collect()
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Stats ==
    /// Returns current statistics together with the cache settings.
    pub fn report(&self) -> StatsReport {
        let mut stats = self.stats.clone();
        stats.set_current_size(self.entries.len());
        StatsReport::new(&stats, self.max_size, self.strategy)
    }

    /// Zeroes the counters, keeping the live entry count.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
        self.stats.set_current_size(self.entries.len());
        self.pending.push(CacheEvent::StatsReset);
    }

    // == Strategy ==
    pub fn strategy(&self) -> EvictionStrategy {
        self.strategy
    }

    /// Switches the eviction strategy.
    ///
    /// The ledger the new strategy does not use is dropped and the one it
    /// does use is rebuilt at the current time, in insertion order, so the
    /// next eviction has a well-defined victim.
    pub fn set_strategy(&mut self, strategy: EvictionStrategy) {
        if strategy != EvictionStrategy::Lru {
            self.access.clear();
        }
        if strategy != EvictionStrategy::Fifo {
            self.insertion.clear();
        }

        self.strategy = strategy;

        let now = self.clock.now_ms();
        let keys = self.keys();
        match strategy {
            EvictionStrategy::Lru => {
                for key in &keys {
                    self.access.record(key, now);
                }
            }
            EvictionStrategy::Fifo => {
                for key in &keys {
                    self.insertion.record(key, now);
                }
            }
            EvictionStrategy::Ttl => {}
        }

        info!("Eviction strategy changed to {}", strategy);
        self.pending.push(CacheEvent::StrategyChanged { strategy });
    }

    // == Max Size ==
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Changes the capacity, evicting until the cache fits.
    ///
    /// Returns `false` without any change when `max_size` is zero.
    pub fn set_max_size(&mut self, max_size: usize) -> bool {
        if max_size == 0 {
            debug!("Rejected max_size of 0");
            return false;
        }

        self.max_size = max_size;

        while self.entries.len() > self.max_size {
            if !self.evict_one() {
                break;
            }
        }

        info!("Max size changed to {}", max_size);
        self.pending.push(CacheEvent::MaxSizeChanged { max_size });
        true
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Queues one cleanup event when anything was removed. Returns the number
    /// of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();

        let mut expired: Vec<(&String, u64)> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, entry)| (key, entry.seq))
            .collect();
        expired.sort_unstable_by_key(|(_, seq)| *seq);
        let expired: Vec<String> = expired.into_iter().map(|(key, _)| key.clone()).collect();

        let count = expired.len();
        for key in &expired {
            self.remove_entry(key, EvictionReason::Expired);
        }

        if count > 0 {
            info!("TTL cleanup: removed {} expired entries", count);
            self.pending.push(CacheEvent::Cleanup { count });
        } else {
            debug!("TTL cleanup: no expired entries found");
        }
        count
    }

    // == Lifecycle ==
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Marks the store as stopped. Returns whether it was running.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }

    pub fn debug_info(&self) -> DebugInfo {
        DebugInfo {
            cache_size: self.entries.len(),
            access_ledger_size: self.access.len(),
            insertion_ledger_size: self.insertion.len(),
            eviction_strategy: self.strategy,
            max_size: self.max_size,
            default_ttl: self.default_ttl,
        }
    }

    /// Takes the events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<CacheEvent<V>> {
        std::mem::take(&mut self.pending)
    }

    // == Eviction ==
    /// Evicts a single victim chosen by the active strategy.
    ///
    /// Returns false when the cache is empty.
    fn evict_one(&mut self) -> bool {
        match self.select_victim() {
            Some((key, reason)) => {
                debug!(key = %key, %reason, "Evicting entry");
                self.remove_entry(&key, reason)
            }
            None => false,
        }
    }

    fn select_victim(&self) -> Option<(String, EvictionReason)> {
        let chosen = match self.strategy {
            EvictionStrategy::Lru => self
                .access
                .oldest()
                .map(|key| (key.to_string(), EvictionReason::Lru)),
            EvictionStrategy::Fifo => self
                .insertion
                .oldest()
                .map(|key| (key.to_string(), EvictionReason::Fifo)),
            EvictionStrategy::Ttl => self
                .entries
                .iter()
                .filter_map(|(key, entry)| entry.expires_at.map(|at| ((at, entry.seq), key)))
                .min_by_key(|(rank, _)| *rank)
                .map(|(_, key)| (key.clone(), EvictionReason::Ttl)),
        };

        // No entry carries an expiry (or a ledger is empty): fall back to
        // the earliest inserted key so the capacity bound still holds.
        chosen.or_else(|| {
            self.entries
                .iter()
                .min_by_key(|(_, entry)| entry.seq)
                .map(|(key, _)| (key.clone(), EvictionReason::Fifo))
        })
    }

    /// Removes an entry and its ledger records, counting it as an eviction.
    fn remove_entry(&mut self, key: &str, reason: EvictionReason) -> bool {
        let Some(entry) = self.entries.remove(key) else {
            return false;
        };

        self.access.remove(key);
        self.insertion.remove(key);
        self.stats.record_eviction();
        self.stats.set_current_size(self.entries.len());

        self.pending.push(CacheEvent::Eviction {
            key: key.to_string(),
            reason,
            entry,
        });
        true
    }

    fn record_miss(&mut self, key: &str, reason: MissReason) {
        self.stats.record_miss();
        self.pending.push(CacheEvent::Miss {
            key: key.to_string(),
            reason,
        });
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn store_with(max_size: usize, strategy: EvictionStrategy) -> (CacheStore<i32>, ManualClock) {
        let clock = ManualClock::new(1_000);
        let config = CacheConfig {
            max_size,
            eviction_strategy: strategy,
            default_ttl: Duration::from_secs(300),
            ..CacheConfig::default()
        };
        (CacheStore::new(&config, Arc::new(clock.clone())), clock)
    }

    fn evicted(events: &[CacheEvent<i32>]) -> Vec<(String, EvictionReason)> {
        events
            .iter()
            .filter_map(|event| match event {
                CacheEvent::Eviction { key, reason, .. } => Some((key.clone(), *reason)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_store_new() {
        let (store, _) = store_with(100, EvictionStrategy::Lru);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert!(store.is_running());
    }

    #[test]
    fn test_store_set_and_get() {
        let (mut store, _) = store_with(100, EvictionStrategy::Lru);

        assert!(store.set("key1", 1, None));
        assert_eq!(store.get("key1"), Some(1));
        assert_eq!(store.len(), 1);

        let events = store.drain_events();
        assert!(matches!(events[0], CacheEvent::Set { ref key, value: 1, .. } if key == "key1"));
        assert!(matches!(events[1], CacheEvent::Hit { value: 1, .. }));
    }

    #[test]
    fn test_store_rejects_empty_key() {
        let (mut store, _) = store_with(100, EvictionStrategy::Lru);

        assert!(!store.set("", 1, None));
        assert!(store.is_empty());
        assert!(store.drain_events().is_empty());
        assert_eq!(store.report().insertions, 0);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let (mut store, _) = store_with(100, EvictionStrategy::Lru);

        assert_eq!(store.get("nonexistent"), None);
        assert_eq!(
            store.drain_events(),
            vec![CacheEvent::Miss {
                key: "nonexistent".to_string(),
                reason: MissReason::Absent,
            }]
        );
    }

    #[test]
    fn test_store_overwrite() {
        let (mut store, _) = store_with(100, EvictionStrategy::Lru);

        store.set("key1", 1, None);
        store.set("key1", 2, None);

        assert_eq!(store.get("key1"), Some(2));
        assert_eq!(store.len(), 1);

        let report = store.report();
        assert_eq!(report.insertions, 2);
        assert_eq!(report.evictions, 0);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let (mut store, clock) = store_with(100, EvictionStrategy::Lru);

        store.set("key1", 1, Some(Duration::from_secs(1)));
        clock.advance(Duration::from_millis(999));
        assert_eq!(store.get("key1"), Some(1));

        clock.advance(Duration::from_millis(1));
        store.drain_events();
        assert_eq!(store.get("key1"), None);

        let events = store.drain_events();
        assert_eq!(
            evicted(&events),
            vec![("key1".to_string(), EvictionReason::Expired)]
        );
        assert!(matches!(
            events.last(),
            Some(CacheEvent::Miss {
                reason: MissReason::Expired,
                ..
            })
        ));

        let report = store.report();
        assert_eq!(report.hits, 1);
        assert_eq!(report.misses, 1);
        assert_eq!(report.evictions, 1);
        assert_eq!(report.current_size, 0);
    }

    #[test]
    fn test_store_zero_ttl_never_expires() {
        let (mut store, clock) = store_with(100, EvictionStrategy::Lru);

        store.set("forever", 1, Some(Duration::ZERO));
        clock.advance(Duration::from_secs(86_400));

        assert_eq!(store.get("forever"), Some(1));
    }

    #[test]
    fn test_store_has_does_not_count() {
        let (mut store, clock) = store_with(100, EvictionStrategy::Lru);

        store.set("key1", 1, Some(Duration::from_secs(1)));
        assert!(store.has("key1"));
        assert!(!store.has("missing"));

        clock.advance(Duration::from_secs(2));
        assert!(!store.has("key1"));
        assert!(store.is_empty());

        let report = store.report();
        assert_eq!(report.hits + report.misses, 0);
        assert_eq!(report.evictions, 1);
    }

    #[test]
    fn test_store_has_does_not_refresh_recency() {
        let (mut store, _) = store_with(2, EvictionStrategy::Lru);

        store.set("a", 1, None);
        store.set("b", 2, None);
        assert!(store.has("a"));
        store.set("c", 3, None);

        assert_eq!(store.keys(), vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_store_delete() {
        let (mut store, _) = store_with(100, EvictionStrategy::Lru);

        store.set("key1", 1, None);
        store.drain_events();

        assert!(store.delete("key1"));
        assert!(!store.delete("key1"));
        assert!(store.is_empty());
        assert_eq!(
            evicted(&store.drain_events()),
            vec![("key1".to_string(), EvictionReason::Manual)]
        );
        assert_eq!(store.debug_info().access_ledger_size, 0);
    }

    #[test]
    fn test_store_lru_eviction() {
        let (mut store, _) = store_with(3, EvictionStrategy::Lru);

        store.set("key1", 1, None);
        store.set("key2", 2, None);
        store.set("key3", 3, None);
        store.drain_events();

        // Cache is full, adding key4 should evict key1 (oldest)
        store.set("key4", 4, None);

        assert_eq!(store.len(), 3);
        assert_eq!(
            evicted(&store.drain_events()),
            vec![("key1".to_string(), EvictionReason::Lru)]
        );
        assert!(!store.has("key1"));
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let (mut store, clock) = store_with(3, EvictionStrategy::Lru);

        store.set("key1", 1, None);
        clock.advance(Duration::from_millis(1));
        store.set("key2", 2, None);
        clock.advance(Duration::from_millis(1));
        store.set("key3", 3, None);
        clock.advance(Duration::from_millis(1));

        // Access key1 to make it most recently used
        store.get("key1");

        // Adding key4 should evict key2 (now oldest)
        store.set("key4", 4, None);

        assert!(store.has("key1"));
        assert!(!store.has("key2"));
    }

    #[test]
    fn test_store_overwrite_at_capacity_does_not_evict() {
        let (mut store, _) = store_with(2, EvictionStrategy::Lru);

        store.set("a", 1, None);
        store.set("b", 2, None);
        store.set("a", 3, None);

        assert_eq!(store.len(), 2);
        assert_eq!(store.report().evictions, 0);
    }

    #[test]
    fn test_store_fifo_ignores_access() {
        let (mut store, _) = store_with(3, EvictionStrategy::Fifo);

        store.set("A", 1, None);
        store.set("B", 2, None);
        store.set("C", 3, None);
        store.get("A");
        store.drain_events();

        store.set("D", 4, None);

        assert_eq!(
            evicted(&store.drain_events()),
            vec![("A".to_string(), EvictionReason::Fifo)]
        );
        assert_eq!(store.keys(), vec!["B", "C", "D"]);
    }

    #[test]
    fn test_store_fifo_overwrite_keeps_position() {
        let (mut store, _) = store_with(2, EvictionStrategy::Fifo);

        store.set("a", 1, None);
        store.set("b", 2, None);
        store.set("a", 10, None);
        store.set("c", 3, None);

        assert_eq!(store.keys(), vec!["b", "c"]);
    }

    #[test]
    fn test_store_ttl_strategy_evicts_soonest_expiry() {
        let (mut store, _) = store_with(3, EvictionStrategy::Ttl);

        store.set("long", 1, Some(Duration::from_secs(100)));
        store.set("short", 2, Some(Duration::from_secs(5)));
        store.set("forever", 3, Some(Duration::ZERO));
        store.drain_events();

        store.set("new", 4, None);

        assert_eq!(
            evicted(&store.drain_events()),
            vec![("short".to_string(), EvictionReason::Ttl)]
        );
        assert_eq!(store.debug_info().access_ledger_size, 0);
        assert_eq!(store.debug_info().insertion_ledger_size, 0);
    }

    #[test]
    fn test_store_ttl_strategy_without_expiries_falls_back_to_insertion_order() {
        let (mut store, _) = store_with(2, EvictionStrategy::Ttl);

        store.set("a", 1, Some(Duration::ZERO));
        store.set("b", 2, Some(Duration::ZERO));
        store.drain_events();

        store.set("c", 3, Some(Duration::ZERO));

        assert_eq!(store.len(), 2);
        assert_eq!(
            evicted(&store.drain_events()),
            vec![("a".to_string(), EvictionReason::Fifo)]
        );
    }

    #[test]
    fn test_store_strategy_switch_rebuilds_ledgers() {
        let (mut store, clock) = store_with(3, EvictionStrategy::Fifo);

        store.set("x", 1, None);
        store.set("y", 2, None);
        store.set("z", 3, None);
        assert_eq!(store.debug_info().insertion_ledger_size, 3);

        clock.advance(Duration::from_secs(1));
        store.set_strategy(EvictionStrategy::Lru);

        let info = store.debug_info();
        assert_eq!(info.insertion_ledger_size, 0);
        assert_eq!(info.access_ledger_size, 3);
        assert_eq!(info.eviction_strategy, EvictionStrategy::Lru);

        store.get("x");
        store.drain_events();
        store.set("w", 4, None);

        assert_eq!(
            evicted(&store.drain_events()),
            vec![("y".to_string(), EvictionReason::Lru)]
        );
    }

    #[test]
    fn test_store_set_max_size_shrinks() {
        let (mut store, _) = store_with(5, EvictionStrategy::Fifo);

        for (i, key) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            store.set(key, i as i32, None);
        }
        store.drain_events();

        assert!(store.set_max_size(2));
        assert_eq!(store.keys(), vec!["d", "e"]);
        assert_eq!(store.max_size(), 2);

        let events = store.drain_events();
        assert_eq!(evicted(&events).len(), 3);
        assert_eq!(
            events.last(),
            Some(&CacheEvent::MaxSizeChanged { max_size: 2 })
        );
    }

    #[test]
    fn test_store_set_max_size_rejects_zero() {
        let (mut store, _) = store_with(5, EvictionStrategy::Lru);
        store.set("a", 1, None);
        store.drain_events();

        assert!(!store.set_max_size(0));
        assert_eq!(store.max_size(), 5);
        assert_eq!(store.len(), 1);
        assert!(store.drain_events().is_empty());
    }

    #[test]
    fn test_store_clear() {
        let (mut store, _) = store_with(10, EvictionStrategy::Lru);
        store.set("a", 1, None);
        store.set("b", 2, None);
        store.drain_events();

        store.clear();

        let events = store.drain_events();
        assert_eq!(
            evicted(&events),
            vec![
                ("a".to_string(), EvictionReason::Clear),
                ("b".to_string(), EvictionReason::Clear),
            ]
        );
        assert_eq!(events.last(), Some(&CacheEvent::Clear { previous_size: 2 }));
        assert!(store.is_empty());
        assert_eq!(store.debug_info().access_ledger_size, 0);
    }

    #[test]
    fn test_store_reset_stats() {
        let (mut store, _) = store_with(10, EvictionStrategy::Lru);
        store.set("a", 1, None);
        store.get("a");
        store.get("b");

        store.reset_stats();

        let report = store.report();
        assert_eq!(report.hits, 0);
        assert_eq!(report.misses, 0);
        assert_eq!(report.insertions, 0);
        assert_eq!(report.current_size, 1);
        assert_eq!(store.drain_events().last(), Some(&CacheEvent::StatsReset));
    }

    #[test]
    fn test_store_cleanup_expired() {
        let (mut store, clock) = store_with(100, EvictionStrategy::Lru);

        store.set("key1", 1, Some(Duration::from_secs(1)));
        store.set("key2", 2, Some(Duration::from_secs(10)));
        store.drain_events();

        assert_eq!(store.purge_expired(), 0);
        assert!(store.drain_events().is_empty());

        clock.advance(Duration::from_millis(1_100));

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.drain_events().last(),
            Some(&CacheEvent::Cleanup { count: 1 })
        );
        assert_eq!(store.get("key2"), Some(2));
    }

    #[test]
    fn test_store_stop() {
        let (mut store, _) = store_with(10, EvictionStrategy::Lru);

        assert!(store.stop());
        assert!(!store.stop());
        assert!(!store.is_running());
    }
}
