//! Order Ledger Module
//!
//! Timestamp bookkeeping behind the LRU and FIFO eviction strategies.

use std::collections::HashMap;

/// When a key was recorded. `tick` breaks ties between equal timestamps in
/// favour of the earlier record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Stamp {
    at: u64,
    tick: u64,
}

// == Order Ledger ==
/// Maps keys to the time they were last recorded.
///
/// Used as the access ledger (LRU, re-recorded on every touch) or the
/// insertion ledger (FIFO, recorded once per key).
#[derive(Debug, Default)]
pub struct OrderLedger {
    stamps: HashMap<String, Stamp>,
    tick: u64,
}

impl OrderLedger {
    // == Constructor ==
    /// Creates a new empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record ==
    /// Records `key` at `at`, replacing any earlier stamp.
    pub fn record(&mut self, key: &str, at: u64) {
        let stamp = self.next_stamp(at);
        self.stamps.insert(key.to_string(), stamp);
    }

    /// Records `key` at `at` unless it is already present.
    pub fn record_if_absent(&mut self, key: &str, at: u64) {
        if !self.stamps.contains_key(key) {
            self.record(key, at);
        }
    }

    // == Remove ==
    /// Removes a key from the ledger.
    pub fn remove(&mut self, key: &str) {
        self.stamps.remove(key);
    }

    /// Forgets every key.
    pub fn clear(&mut self) {
        self.stamps.clear();
    }

    // == Oldest ==
    /// Returns the key with the smallest stamp without removing it.
    pub fn oldest(&self) -> Option<&str> {
        self.stamps
            .iter()
            .min_by_key(|(_, stamp)| **stamp)
            .map(|(key, _)| key.as_str())
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.stamps.contains_key(key)
    }

    fn next_stamp(&mut self, at: u64) -> Stamp {
        self.tick += 1;
        Stamp { at, tick: self.tick }
    }
}
