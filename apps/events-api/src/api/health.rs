//! Readiness endpoint backed by a MongoDB probe.

use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::AppError;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct ReadyResponse {
    status: &'static str,
    mongodb: bool,
    response_time_ms: u64,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Ready only when MongoDB answers the probe; otherwise 503.
async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<ReadyResponse>, AppError> {
    let health = database::mongodb::check_health_detailed(&state.mongo_client).await;

    if !health.healthy {
        return Err(AppError::ServiceUnavailable(
            health
                .message
                .unwrap_or_else(|| "MongoDB is not reachable".to_string()),
        ));
    }

    Ok(Json(ReadyResponse {
        status: "ready",
        mongodb: true,
        response_time_ms: health.response_time_ms,
    }))
}
