//! API Handlers
//!
//! HTTP request handlers for each admin endpoint.

use axum::{extract::State, Json};

use crate::error::{Result, ServerError};
use crate::models::{HealthResponse, ProcessRequest, ProcessResponse, StatsResponse};
use crate::processor::RequestProcessor;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared request processor (cache + admission gate)
    pub processor: RequestProcessor,
}

impl AppState {
    pub fn new(processor: RequestProcessor) -> Self {
        Self { processor }
    }
}

/// Handler for POST /process
///
/// Runs the key through the same path as a line protocol request.
pub async fn process_handler(
    State(state): State<AppState>,
    Json(req): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ServerError::InvalidRequest(error_msg));
    }

    let processed = state.processor.process(&req.key).await?;

    Ok(Json(ProcessResponse::new(req.key, processed)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let (cache, admission) = state.processor.stats().await;
    Json(StatsResponse::new(cache, admission))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
