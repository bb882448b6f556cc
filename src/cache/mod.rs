//! Cache Module
//!
//! Provides the bounded result cache with lazy TTL expiration and
//! oldest-first eviction.

mod age_index;
mod clock;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use age_index::AgeIndex;
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;
