use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use solace_core::error::CoreError;

use crate::error::AppResult;
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// GET /health -- liveness; always 200 while the process serves requests.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health/ready -- 503 `SERVICE_UNAVAILABLE` when the user store is down.
async fn readiness(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    state.users.ping().await.map_err(|e| {
        tracing::warn!(error = %e, "User store ping failed");
        CoreError::service_unavailable("user-store")
    })?;

    Ok(Json(HealthResponse {
        status: "ready",
        version: env!("CARGO_PKG_VERSION"),
    }))
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness))
}
