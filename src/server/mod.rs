//! Line Server Module
//!
//! TCP front end: one task per connection, one `process` call per line.
//!
//! Connection count is unbounded; the admission controller inside the
//! [`RequestProcessor`](crate::processor::RequestProcessor) is the only limit
//! on how many requests compute at once.

mod connection;
mod listener;

pub use connection::{handle_connection, EXIT_COMMAND};
pub use listener::LineServer;
