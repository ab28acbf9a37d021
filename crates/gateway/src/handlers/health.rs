//! Liveness and readiness endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use std::time::Instant;

use crate::AppState;
use bibforge_common::{
    errors::{AppError, Result},
    VERSION,
};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub store_latency_ms: u64,
}

/// Answers as long as the process is serving requests
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: VERSION,
    })
}

/// Round-trips the citation store; 503 when it cannot be reached
pub async fn ready(State(state): State<AppState>) -> Result<Json<ReadyResponse>> {
    let started = Instant::now();

    state.store.ping().await.map_err(|e| AppError::Unavailable {
        message: e.to_string(),
    })?;

    Ok(Json(ReadyResponse {
        status: "ready",
        store_latency_ms: started.elapsed().as_millis() as u64,
    }))
}
