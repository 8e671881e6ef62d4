use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/slots",
            get(handlers::slots::list_slots).post(handlers::slots::create_slot),
        )
        .route("/api/slots/range", post(handlers::slots::schedule_range))
        .route("/api/slots/:id", delete(handlers::slots::delete_slot))
        .route(
            "/api/slots/:id/availability",
            put(handlers::slots::update_availability),
        )
        .route("/api/status", get(handlers::slots::store_status))
}
