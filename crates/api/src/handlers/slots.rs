//! # Slot Handlers
//!
//! Fetch, single-slot mutations and bulk range scheduling. Single-slot
//! mutations go through the [`SlotEditor`](slotbook_store::SlotEditor); bulk
//! scheduling goes straight to the store.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use slotbook_core::{
    errors::SlotError,
    models::{
        schedule::{ScheduleRangeRequest, ScheduleRangeResponse},
        time_slot::{
            CreateTimeSlotRequest, ListTimeSlotsResponse, TimeSlot, UpdateAvailabilityRequest,
            sort_for_display,
        },
    },
};
use slotbook_store::StoreStatus;
use tracing::debug;

use crate::{ApiState, middleware::error_handling::AppError};

/// Query parameters for the delete endpoint
#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    /// Must be `true` for anything to be deleted
    #[serde(default)]
    pub confirm: bool,
}

/// Refreshes the collection from the backend and returns it sorted.
///
/// A failed refresh is not an HTTP error: the last-known-good slots come
/// back together with the error message.
#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ListTimeSlotsResponse>, AppError> {
    let (mut slots, error) = match state.store.fetch_all().await {
        Ok(slots) => (slots, None),
        Err(err) => (state.store.list().await?, Some(err.to_string())),
    };
    sort_for_display(&mut slots);

    Ok(Json(ListTimeSlotsResponse { slots, error }))
}

#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateTimeSlotRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TimeSlot>), AppError> {
    let Json(request) = payload?;

    let outcome = state.editor.request_create(request).await?;

    Ok((StatusCode::CREATED, Json(outcome.value)))
}

#[axum::debug_handler]
pub async fn update_availability(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateAvailabilityRequest>, JsonRejection>,
) -> Result<Json<TimeSlot>, AppError> {
    let Json(request) = payload?;

    let outcome = state
        .editor
        .request_availability_change(&id, request.available)
        .await?;

    Ok(Json(outcome.value))
}

/// Deletes a slot once the caller has confirmed with `?confirm=true`.
#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    query: Result<Query<DeleteQuery>, QueryRejection>,
) -> Result<StatusCode, AppError> {
    let Query(query) = query?;

    if !query.confirm {
        debug!("Unconfirmed delete rejected: id={}", id);
        return Err(AppError(SlotError::Validation(format!(
            "Deleting time slot {} requires confirm=true",
            id
        ))));
    }

    state.editor.prepare_delete(id).confirm().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Materializes daily templates over a date range, resetting the range.
#[axum::debug_handler]
pub async fn schedule_range(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<ScheduleRangeRequest>, JsonRejection>,
) -> Result<Json<ScheduleRangeResponse>, AppError> {
    let Json(request) = payload?;

    state.range_limits.check(&request)?;

    let slots = state
        .store
        .schedule_range(
            request.range(),
            &request.templates,
            request.weekdays_only,
            request.policy(),
        )
        .await?;

    Ok(Json(ScheduleRangeResponse { slots }))
}

pub async fn store_status(State(state): State<Arc<ApiState>>) -> Json<StoreStatus> {
    Json(state.store.status())
}
