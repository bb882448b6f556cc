//! Request Processor
//!
//! The shared context every connection handler calls into. Clones are cheap
//! and all refer to the same cache and permit pool.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::admission::{AdmissionController, AdmissionStats};
use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;
use crate::error::{Result, ServerError};
use crate::processor::Compute;

// == Processed ==
/// Outcome of a `process` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    /// The computed or memoized value
    pub value: String,
    /// True if the value came from the cache without computing
    pub cached: bool,
}

impl Processed {
    pub fn into_value(self) -> String {
        self.value
    }
}

// == Request Processor ==
/// Cache-first request processing behind an admission gate.
///
/// Two concurrent misses on the same key both compute and both store; the
/// later store wins. There is no single-flight deduplication.
#[derive(Clone)]
pub struct RequestProcessor {
    cache: Arc<Mutex<CacheStore>>,
    admission: AdmissionController,
    compute: Arc<dyn Compute>,
}

impl RequestProcessor {
    // == Constructor ==
    pub fn new(
        cache: CacheStore,
        admission: AdmissionController,
        compute: Arc<dyn Compute>,
    ) -> Self {
        Self {
            cache: Arc::new(Mutex::new(cache)),
            admission,
            compute,
        }
    }

    /// Validates `config` and builds the cache and permit pool from it.
    pub fn from_config(config: &Config, compute: Arc<dyn Compute>) -> Result<Self> {
        config.validate()?;
        let cache = CacheStore::new(config.cache_capacity, config.cache_ttl())?;
        let admission = AdmissionController::new(config.concurrency_limit)?;
        Ok(Self::new(cache, admission, compute))
    }

    // == Process ==
    /// Returns the value for `key`, computing and caching it on a miss.
    ///
    /// Cache hits return without touching the admission gate. A miss waits
    /// for a permit, computes, stores the result and releases the permit.
    /// The permit is also released if the computation fails or this future
    /// is dropped mid-way.
    ///
    /// # Errors
    /// - `ServerError::Computation` if the compute function fails; nothing is cached.
    /// - `ServerError::AdmissionClosed` if the gate closed while waiting.
    pub async fn process(&self, key: &str) -> Result<Processed> {
        let cached = self.cache.lock().await.get(key);
        if let Some(value) = cached {
            debug!(key, "Cache hit");
            return Ok(Processed {
                value,
                cached: true,
            });
        }

        debug!(key, "Cache miss, waiting for permit");
        let permit = self.admission.acquire().await?;

        let value = match self.compute.compute(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Computation failed");
                return Err(ServerError::computation(key, e));
            }
        };

        let evicted = self
            .cache
            .lock()
            .await
            .put(key.to_string(), value.clone());
        if let Some(evicted) = evicted {
            debug!(key, evicted = %evicted, "Stored result after eviction");
        }

        permit.release();

        Ok(Processed {
            value,
            cached: false,
        })
    }

    /// Handle to the shared cache, for maintenance tasks.
    pub fn cache(&self) -> Arc<Mutex<CacheStore>> {
        self.cache.clone()
    }

    pub fn admission(&self) -> &AdmissionController {
        &self.admission
    }

    // == Stats ==
    pub async fn stats(&self) -> (CacheStats, AdmissionStats) {
        let cache = self.cache.lock().await.stats();
        (cache, self.admission.stats())
    }
}
