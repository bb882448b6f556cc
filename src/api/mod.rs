//! API Module
//!
//! Admin HTTP surface for the memo server.
//!
//! # Endpoints
//! - `POST /process` - Process a key through the cache
//! - `GET /stats` - Cache and admission statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
