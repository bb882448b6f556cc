//! Admission Controller
//!
//! A fixed pool of permits shared by every connection handler. A permit is
//! held for the duration of one computation and returned when its guard is
//! dropped, so every exit path (success, error, cancellation) releases it.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::debug;

use crate::error::{Result, ServerError};

// == Admission Stats ==
/// Point-in-time view of the permit pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdmissionStats {
    /// Configured number of permits
    pub limit: usize,
    /// Permits currently free
    pub available: usize,
    /// Permits currently held
    pub in_flight: usize,
    /// Permits handed out since start
    pub total_admitted: u64,
}

#[derive(Debug, Default)]
struct Counters {
    in_flight: AtomicUsize,
    total_admitted: AtomicU64,
}

// == Admission Controller ==
/// Process-wide concurrency gate; clones share the same pool.
#[derive(Debug, Clone)]
pub struct AdmissionController {
    semaphore: Arc<Semaphore>,
    counters: Arc<Counters>,
    limit: usize,
}

impl AdmissionController {
    // == Constructor ==
    /// Creates a pool of `limit` permits.
    ///
    /// # Errors
    /// Returns `ServerError::Configuration` if `limit` is zero.
    pub fn new(limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(ServerError::Configuration(
                "concurrency limit must be positive".to_string(),
            ));
        }
        if limit > Semaphore::MAX_PERMITS {
            return Err(ServerError::Configuration(format!(
                "concurrency limit exceeds {}",
                Semaphore::MAX_PERMITS
            )));
        }

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            counters: Arc::new(Counters::default()),
            limit,
        })
    }

    // == Acquire ==
    /// Waits, without timeout, until a permit is free.
    ///
    /// Dropping the returned future while it waits takes nothing from the
    /// pool.
    ///
    /// # Errors
    /// Returns `ServerError::AdmissionClosed` once [`AdmissionController::close`]
    /// has been called.
    pub async fn acquire(&self) -> Result<Permit> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| ServerError::AdmissionClosed)?;

        self.counters.in_flight.fetch_add(1, Ordering::SeqCst);
        self.counters.total_admitted.fetch_add(1, Ordering::Relaxed);
        debug!(available = self.semaphore.available_permits(), "Permit acquired");

        Ok(Permit {
            _permit: permit,
            counters: self.counters.clone(),
        })
    }

    // == Close ==
    /// Stops handing out permits; waiting and future acquirers fail.
    ///
    /// Permits already held stay valid until dropped.
    pub fn close(&self) {
        self.semaphore.close();
    }

    pub fn is_closed(&self) -> bool {
        self.semaphore.is_closed()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    // == Stats ==
    pub fn stats(&self) -> AdmissionStats {
        AdmissionStats {
            limit: self.limit,
            available: self.semaphore.available_permits(),
            in_flight: self.counters.in_flight.load(Ordering::SeqCst),
            total_admitted: self.counters.total_admitted.load(Ordering::Relaxed),
        }
    }
}

// == Permit ==
/// One unit of the concurrency budget, returned to the pool on drop.
#[derive(Debug)]
#[must_use = "dropping a permit releases it immediately"]
pub struct Permit {
    _permit: OwnedSemaphorePermit,
    counters: Arc<Counters>,
}

impl Permit {
    /// Returns the permit to the pool.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for Permit {
    fn drop(&mut self) {
        self.counters.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
