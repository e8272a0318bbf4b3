//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub connections: usize,
    pub sessions: usize,
    pub orders_placed: usize,
}

/// GET /health: liveness plus a few gauges.
pub async fn check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        connections: state.hub.active_connections(),
        sessions: state.hub.active_sessions(),
        orders_placed: state.hub.ledger().len(),
    })
}
