//! Memo Server - A concurrent line-oriented request server
//!
//! Every request line is answered from a bounded, expiring result cache when
//! possible. Misses are computed under a fixed concurrency budget and stored
//! for later requests.

pub mod admission;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod processor;
pub mod server;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{Result, ServerError};
pub use processor::{Compute, Processed, RequestProcessor, UppercaseCompute};
pub use server::LineServer;
pub use tasks::spawn_cleanup_task;
