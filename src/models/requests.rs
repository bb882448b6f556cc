//! Request DTOs for the admin API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

pub use crate::processor::MAX_KEY_LENGTH;

/// Request body for POST /process
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessRequest {
    /// The request key, processed as an opaque string
    pub key: String,
}

impl ProcessRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        None
    }
}
