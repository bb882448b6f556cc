//! Cache Entry Module
//!
//! Defines the immutable record stored for each memoized result.

use std::time::Duration;

// == Cache Entry ==
/// A memoized result and the time it was stored.
///
/// Entries are never mutated; storing a key again replaces its entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The memoized value
    pub value: String,
    /// Insertion timestamp (milliseconds, as read from the store's clock)
    pub created_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with `created_at`.
    pub fn new(value: String, created_at: u64) -> Self {
        Self { value, created_at }
    }

    // == Age ==
    /// Returns how long ago the entry was created, in milliseconds.
    ///
    /// A clock reading earlier than `created_at` yields an age of 0.
    pub fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.created_at)
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry whose age equals the TTL exactly is still
    /// live; it expires once its age strictly exceeds the TTL.
    pub fn is_expired(&self, now: u64, ttl: Duration) -> bool {
        u128::from(self.age_ms(now)) > ttl.as_millis()
    }
}
