use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::sync::Arc;

use crate::ApiState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    slots: Option<usize>,
}

#[derive(Serialize)]
struct VersionResponse {
    version: String,
}

/// Reports `degraded` once the store task no longer answers.
async fn health_check(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    match state.store.list().await {
        Ok(slots) => Json(HealthResponse {
            status: "ok",
            slots: Some(slots.len()),
        }),
        Err(_) => Json(HealthResponse {
            status: "degraded",
            slots: None,
        }),
    }
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
}
