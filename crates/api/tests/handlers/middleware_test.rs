use std::time::Duration;

use axum::{http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use rstest::rstest;
use slotbook_api::middleware::error_handling::AppError;
use slotbook_core::errors::SlotError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[rstest]
#[case(SlotError::NotFound("Time slot x not found".into()), StatusCode::NOT_FOUND)]
#[case(SlotError::Validation("bad".into()), StatusCode::BAD_REQUEST)]
#[case(
    SlotError::InvalidRange { start: date(2025, 6, 7), end: date(2025, 6, 2) },
    StatusCode::BAD_REQUEST
)]
#[case(
    SlotError::BackingFailure(eyre::eyre!("io")),
    StatusCode::INTERNAL_SERVER_ERROR
)]
#[case(SlotError::Timeout(Duration::from_secs(10)), StatusCode::GATEWAY_TIMEOUT)]
#[case(SlotError::Unavailable("stopped".into()), StatusCode::SERVICE_UNAVAILABLE)]
fn test_error_status_mapping(#[case] error: SlotError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();

    assert_eq!(response.status(), expected);
}

#[test]
fn test_from_slot_error() {
    let err: AppError = SlotError::NotFound("missing".into()).into();

    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}
