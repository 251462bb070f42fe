use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub database: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let (code, status, database) = match state.manager.ping().await {
        Ok(()) => (StatusCode::OK, "ready", "connected"),
        Err(e) => {
            tracing::warn!(error = %e, "record store ping failed");
            (StatusCode::SERVICE_UNAVAILABLE, "not_ready", "disconnected")
        }
    };

    (
        code,
        Json(ReadinessResponse {
            status: status.into(),
            database: database.into(),
        }),
    )
}
