use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/calendar/events", get(handlers::calendar::list_events))
        .route(
            "/api/calendar/selection",
            post(handlers::calendar::resolve_selection),
        )
}
