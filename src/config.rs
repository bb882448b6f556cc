//! Configuration Module
//!
//! Handles loading and validating server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, ServerError};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the result cache can hold
    pub cache_capacity: usize,
    /// Time-to-live of a cached result in milliseconds
    pub cache_ttl_ms: u64,
    /// Maximum number of requests computing at the same time
    pub concurrency_limit: usize,
    /// Line protocol TCP port
    pub server_port: u16,
    /// Admin HTTP port
    pub admin_port: u16,
    /// Simulated processing delay of the uppercase stand-in, in milliseconds
    pub processing_delay_ms: u64,
    /// Background sweep interval in seconds, 0 disables the sweeper
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 100)
    /// - `CACHE_TTL_MS` - Entry TTL in milliseconds (default: 60000)
    /// - `CONCURRENCY_LIMIT` - Concurrent computations (default: 5)
    /// - `SERVER_PORT` - Line protocol port (default: 8080)
    /// - `ADMIN_PORT` - Admin HTTP port (default: 8081)
    /// - `PROCESSING_DELAY_MS` - Simulated processing time (default: 1000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 30)
    ///
    /// Unset or unparsable variables fall back to their defaults. Call
    /// [`Config::validate`] before building components from the result.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_capacity: env_or("CACHE_CAPACITY", defaults.cache_capacity),
            cache_ttl_ms: env_or("CACHE_TTL_MS", defaults.cache_ttl_ms),
            concurrency_limit: env_or("CONCURRENCY_LIMIT", defaults.concurrency_limit),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            admin_port: env_or("ADMIN_PORT", defaults.admin_port),
            processing_delay_ms: env_or("PROCESSING_DELAY_MS", defaults.processing_delay_ms),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
        }
    }

    // == Validate ==
    /// Rejects non-positive capacity, TTL or concurrency limit.
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(ServerError::Configuration(
                "cache capacity must be positive".to_string(),
            ));
        }
        if self.cache_ttl_ms == 0 {
            return Err(ServerError::Configuration(
                "cache TTL must be positive".to_string(),
            ));
        }
        if self.concurrency_limit == 0 {
            return Err(ServerError::Configuration(
                "concurrency limit must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    /// Processing delay of the stand-in compute function.
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 100,
            cache_ttl_ms: 60_000,
            concurrency_limit: 5,
            server_port: 8080,
            admin_port: 8081,
            processing_delay_ms: 1000,
            cleanup_interval: 30,
        }
    }
}
