//! Age Index Module
//!
//! Orders cache keys by creation time for oldest-first eviction.

use std::collections::BTreeSet;

// == Age Index ==
/// Tracks `(created_at, key)` pairs in ascending order.
///
/// The eviction candidate is the first pair: the smallest `created_at`, with
/// ties resolved by ascending key byte order. Each key appears at most once;
/// the owner must pass the key's current timestamp when removing it.
#[derive(Debug, Default)]
pub struct AgeIndex {
    order: BTreeSet<(u64, String)>,
}

impl AgeIndex {
    // == Constructor ==
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self {
            order: BTreeSet::new(),
        }
    }

    // == Insert ==
    /// Records `key` as created at `created_at`.
    pub fn insert(&mut self, created_at: u64, key: &str) {
        self.order.insert((created_at, key.to_string()));
    }

    // == Remove ==
    /// Forgets the record for `key` created at `created_at`.
    ///
    /// Returns false if no such record existed.
    pub fn remove(&mut self, created_at: u64, key: &str) -> bool {
        self.order.remove(&(created_at, key.to_string()))
    }

    // == Pop Oldest ==
    /// Removes and returns the oldest key.
    ///
    /// Returns None if the index is empty.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_first().map(|(_, key)| key)
    }

    // == Peek Oldest ==
    /// Returns the oldest key without removing it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.order.first().map(|(_, key)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
