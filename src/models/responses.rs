//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::admission::AdmissionStats;
use crate::cache::CacheStats;
use crate::processor::Processed;

/// Response body for POST /process
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResponse {
    /// The requested key
    pub key: String,
    /// The processed value
    pub value: String,
    /// Whether the value was served from the cache
    pub cached: bool,
}

impl ProcessResponse {
    pub fn new(key: impl Into<String>, processed: Processed) -> Self {
        Self {
            key: key.into(),
            value: processed.value,
            cached: processed.cached,
        }
    }
}

/// Cache section of the stats response
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsBody {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub cache: CacheStatsBody,
    pub admission: AdmissionStats,
}

impl StatsResponse {
    pub fn new(cache: CacheStats, admission: AdmissionStats) -> Self {
        let hit_rate = cache.hit_rate();
        Self {
            cache: CacheStatsBody {
                stats: cache,
                hit_rate,
            },
            admission,
        }
    }
}

impl std::ops::Deref for CacheStatsBody {
    type Target = CacheStats;

    fn deref(&self) -> &CacheStats {
        &self.stats
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
