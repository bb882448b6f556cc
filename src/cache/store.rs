//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with an age index and TTL expiration.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::{AgeIndex, CacheEntry, CacheStats, Clock, SystemClock};
use crate::error::{Result, ServerError};

// == Cache Store ==
/// Capacity-bounded store of memoized results with lazy TTL expiry.
///
/// The store itself is not synchronized. Shared callers keep it behind a
/// single mutex so that every read-then-write on the entry count happens in
/// one critical section.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Creation-time order of `entries`
    ages: AgeIndex,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Age after which an entry reads as absent
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore reading wall-clock time.
    ///
    /// # Errors
    /// Returns `ServerError::Configuration` if `capacity` or `ttl` is zero.
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self> {
        Self::with_clock(capacity, ttl, Arc::new(SystemClock))
    }

    /// Creates a new CacheStore stamping entries with `clock`.
    pub fn with_clock(capacity: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Result<Self> {
        if capacity == 0 {
            return Err(ServerError::Configuration(
                "cache capacity must be positive".to_string(),
            ));
        }
        if ttl.is_zero() {
            return Err(ServerError::Configuration(
                "cache TTL must be positive".to_string(),
            ));
        }

        Ok(Self {
            entries: HashMap::with_capacity(capacity),
            ages: AgeIndex::new(),
            stats: CacheStats::new(capacity),
            capacity,
            ttl,
            clock,
        })
    }

    // == Get ==
    /// Returns the value stored under `key` if it has not expired.
    ///
    /// Expired entries are reported as absent but left in place; they are
    /// reclaimed by eviction, overwrite or [`CacheStore::purge_expired`].
    pub fn get(&mut self, key: &str) -> Option<String> {
        let now = self.clock.now_ms();
        match self.entries.get(key) {
            Some(entry) if entry.is_expired(now, self.ttl) => {
                self.stats.record_expired();
                None
            }
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores `value` under `key`, stamped with the current time.
    ///
    /// Storing an existing key replaces its entry and never evicts. Storing a
    /// new key while at capacity first evicts the entry with the smallest
    /// creation time (ties go to the smallest key).
    ///
    /// Returns the evicted key, if any.
    pub fn put(&mut self, key: String, value: String) -> Option<String> {
        let now = self.clock.now_ms();

        let mut evicted = None;
        if let Some(previous) = self.entries.get(&key) {
            self.ages.remove(previous.created_at, &key);
        } else if self.entries.len() >= self.capacity {
            if let Some(victim) = self.ages.pop_oldest() {
                self.entries.remove(&victim);
                self.stats.record_eviction();
                debug!("Evicted oldest entry '{}'", victim);
                evicted = Some(victim);
            }
        }

        self.ages.insert(now, &key);
        self.entries.insert(key, CacheEntry::new(value, now));
        self.stats.set_total_entries(self.entries.len());

        evicted
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let ttl = self.ttl;
        let expired: Vec<(String, u64)> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now, ttl))
            .map(|(key, entry)| (key.clone(), entry.created_at))
            .collect();

        let count = expired.len();

        for (key, created_at) in expired {
            self.entries.remove(&key);
            self.ages.remove(created_at, &key);
        }

        self.stats.record_purged(count);
        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Contains Raw ==
    /// Returns true if an entry for `key` is physically stored, expired or not.
    pub fn contains_raw(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the stored entry for `key` without an expiry check.
    pub fn peek_entry(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the current number of physically stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
