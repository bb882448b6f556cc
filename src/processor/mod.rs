//! Processor Module
//!
//! Combines the result cache, the admission gate and a pluggable compute
//! function behind a single `process(key)` call.

/// Maximum accepted key length in bytes, shared by the line and HTTP front ends
pub const MAX_KEY_LENGTH: usize = 8192;

mod compute;
mod request;

pub use compute::{Compute, UppercaseCompute};
pub use request::{Processed, RequestProcessor};
