//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries.
//!
//! Reads already treat expired entries as absent, so the sweep only reclaims
//! memory earlier than eviction or overwrite would.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task runs in an infinite loop, sleeping for `interval` between
/// sweeps. Each sweep holds the cache lock only for the purge itself.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown, or None if `interval` is zero (sweeping disabled).
///
/// # Example
/// ```ignore
/// let cleanup_handle = spawn_cleanup_task(processor.cache(), Duration::from_secs(30));
/// // Later, during shutdown:
/// if let Some(handle) = cleanup_handle {
///     handle.abort();
/// }
/// ```
pub fn spawn_cleanup_task(
    cache: Arc<Mutex<CacheStore>>,
    interval: Duration,
) -> Option<JoinHandle<()>> {
    if interval.is_zero() {
        info!("Expiry sweep disabled");
        return None;
    }

    Some(tokio::spawn(async move {
        info!("Starting expiry sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.lock().await.purge_expired();

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    }))
}
