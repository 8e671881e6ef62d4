use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use slotbook_core::{
    calendar,
    models::calendar::{CalendarEvent, Selection, SelectionIntent},
};

use crate::{ApiState, middleware::error_handling::AppError};

/// Projects the current collection into calendar events.
#[axum::debug_handler]
pub async fn list_events(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    let slots = state.store.list().await?;

    Ok(Json(calendar::to_events(&slots)))
}

/// Tells the calendar whether a selection opens the create or the edit flow.
#[axum::debug_handler]
pub async fn resolve_selection(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<Selection>, JsonRejection>,
) -> Result<Json<SelectionIntent>, AppError> {
    let Json(selection) = payload?;

    let intent = state.editor.open(&selection).await?;

    Ok(Json(intent))
}
