//! Compute Functions
//!
//! The (possibly slow) work performed on a cache miss.

use std::time::Duration;

use async_trait::async_trait;

// == Compute Trait ==
/// Produces the value for a key on a cache miss.
///
/// Implementations may be slow; they run while holding an admission permit
/// and outside any cache lock.
#[async_trait]
pub trait Compute: Send + Sync {
    async fn compute(&self, key: &str) -> anyhow::Result<String>;
}

// == Uppercase Compute ==
/// Stand-in workload: waits for `delay`, then uppercases the key.
#[derive(Debug, Clone)]
pub struct UppercaseCompute {
    delay: Duration,
}

impl UppercaseCompute {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Compute for UppercaseCompute {
    async fn compute(&self, key: &str) -> anyhow::Result<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(format!("Processed: {}", key.to_uppercase()))
    }
}
