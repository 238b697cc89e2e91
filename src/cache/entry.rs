//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use crate::clock::millis;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: u64,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
    /// Position of the key in first-insertion order, kept across overwrites
    pub(crate) seq: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `now` - Current time in milliseconds
    /// * `ttl` - Lifetime of the entry; `None` or zero means it never expires.
    ///   A non-zero TTL shorter than a millisecond is kept for one millisecond.
    /// * `seq` - Insertion sequence number of the key
    pub fn new(value: V, now: u64, ttl: Option<Duration>, seq: u64) -> Self {
        let expires_at = ttl
            .filter(|ttl| !ttl.is_zero())
            .map(|ttl| now.saturating_add(millis(ttl).max(1)));

        Self {
            value,
            inserted_at: now,
            expires_at,
            seq,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired once `now` reaches its expiration time, so a TTL of
    /// `T` keeps the entry alive for `[inserted_at, inserted_at + T)`.
    pub fn is_expired(&self, now: u64) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining lifetime, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has expired
    /// - `Some(remaining)` if the entry has TTL and hasn't expired
    /// - `None` if the entry has no TTL (never expires)
    pub fn ttl_remaining(&self, now: u64) -> Option<Duration> {
        self.expires_at
            .map(|expires| Duration::from_millis(expires.saturating_sub(now)))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation_no_ttl() {
        let entry = CacheEntry::new("test_value", 1_000, None, 0);

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.inserted_at, 1_000);
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired(u64::MAX));
    }

    #[test]
    fn test_entry_zero_ttl_never_expires() {
        let entry = CacheEntry::new("test_value", 1_000, Some(Duration::ZERO), 0);

        assert!(entry.expires_at.is_none());
        assert!(entry.ttl_remaining(5_000).is_none());
    }

    #[test]
    fn test_entry_creation_with_ttl() {
        let entry = CacheEntry::new("test_value", 1_000, Some(Duration::from_secs(60)), 0);

        assert_eq!(entry.expires_at, Some(61_000));
        assert!(entry.expires_at.unwrap() >= entry.inserted_at);
        assert!(!entry.is_expired(1_000));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(1, 1_000, Some(Duration::from_millis(500)), 0);

        assert!(!entry.is_expired(1_499), "Entry should be alive before TTL");
        assert!(entry.is_expired(1_500), "Entry should be expired at boundary");
        assert!(entry.is_expired(2_000));
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let entry = CacheEntry::new(1, 1_000, Some(Duration::from_secs(1 << 61)), 0);

        assert_eq!(entry.expires_at, Some(u64::MAX));
        assert!(!entry.is_expired(1_000));
        assert!(!entry.is_expired(u64::MAX - 1));

        let entry = CacheEntry::new(1, 1_000, Some(Duration::MAX), 0);
        assert_eq!(entry.expires_at, Some(u64::MAX));
    }

    #[test]
    fn test_sub_millisecond_ttl_lasts_one_millisecond() {
        let entry = CacheEntry::new(1, 1_000, Some(Duration::from_micros(500)), 0);

        assert_eq!(entry.expires_at, Some(1_001));
        assert!(!entry.is_expired(1_000));
        assert!(entry.is_expired(1_001));
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new(1, 1_000, Some(Duration::from_secs(10)), 0);

        assert_eq!(entry.ttl_remaining(1_000), Some(Duration::from_secs(10)));
        assert_eq!(entry.ttl_remaining(4_000), Some(Duration::from_secs(7)));
        assert_eq!(entry.ttl_remaining(20_000), Some(Duration::ZERO));
    }
}
