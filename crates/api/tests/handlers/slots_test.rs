use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use slotbook_core::models::{
    schedule::ScheduleRangeResponse,
    time_slot::{ListTimeSlotsResponse, TimeSlot},
};
use slotbook_db::{memory::InMemorySlotBackend, mock::backend::MockSlotBackend};
use slotbook_store::{StoreConfig, StoreStatus};

use crate::test_utils::{TestContext, date, slot};

#[tokio::test]
async fn test_list_slots_sorted() {
    let ctx = TestContext::with_slots(vec![
        slot(date(2025, 6, 3), 9, 0),
        slot(date(2025, 6, 2), 14, 0),
        slot(date(2025, 6, 2), 9, 0),
    ])
    .await;

    let response = ctx.server.get("/api/slots").await;

    response.assert_status_ok();
    let body: ListTimeSlotsResponse = response.json();
    let ids: Vec<_> = body.slots.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["2025-06-02-09:00", "2025-06-02-14:00", "2025-06-03-09:00"]
    );
    assert_eq!(body.error, None);
}

#[tokio::test]
async fn test_list_slots_reports_refresh_failure() {
    let existing = slot(date(2025, 6, 2), 9, 0);
    let loaded = vec![existing.clone()];

    let mut backend = MockSlotBackend::new();
    let mut calls = 0;
    backend.expect_fetch_all().returning(move || {
        calls += 1;
        if calls == 1 {
            Ok(loaded.clone())
        } else {
            Err(eyre::eyre!("connection refused"))
        }
    });
    let ctx = TestContext::with_backend(Arc::new(backend), StoreConfig::default()).await;

    let response = ctx.server.get("/api/slots").await;

    response.assert_status_ok();
    let body: ListTimeSlotsResponse = response.json();
    assert_eq!(body.slots, vec![existing]);
    assert!(body.error.unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_create_slot() {
    let ctx = TestContext::empty().await;

    let response = ctx
        .server
        .post("/api/slots")
        .json(&json!({
            "date": "2025-06-10",
            "startTime": "14:00",
            "endTime": "14:30"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.assert_json(&json!({
        "id": "2025-06-10-14:00",
        "date": "2025-06-10",
        "startTime": "14:00",
        "endTime": "14:30",
        "available": true
    }));
    assert_eq!(ctx.store.list().await.unwrap().len(), 1);
}

#[rstest]
#[case(json!({"date": "2025-13-10", "startTime": "14:00", "endTime": "14:30"}))]
#[case(json!({"date": "10/06/2025", "startTime": "14:00", "endTime": "14:30"}))]
#[case(json!({"date": "2025-06-10", "startTime": "2pm", "endTime": "14:30"}))]
#[case(json!({"date": "2025-06-10", "startTime": "14:00"}))]
#[tokio::test]
async fn test_create_slot_rejects_malformed_body(#[case] body: Value) {
    let ctx = TestContext::empty().await;

    let response = ctx.server.post("/api/slots").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
    assert!(ctx.store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_then_mark_unavailable() {
    let ctx = TestContext::empty().await;

    ctx.server
        .post("/api/slots")
        .json(&json!({"date": "2025-06-10", "startTime": "14:00", "endTime": "14:30"}))
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .server
        .put("/api/slots/2025-06-10-14:00/availability")
        .json(&json!({"available": false}))
        .await;

    response.assert_status_ok();
    let updated: TimeSlot = response.json();
    assert!(!updated.available);

    let slots = ctx.store.list().await.unwrap();
    assert_eq!(slots, vec![updated]);
}

#[tokio::test]
async fn test_update_availability_not_found() {
    let ctx = TestContext::with_slots(vec![slot(date(2025, 6, 2), 9, 0)]).await;

    let response = ctx
        .server
        .put("/api/slots/2025-06-02-10:00/availability")
        .json(&json!({"available": false}))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert!(ctx.store.list().await.unwrap()[0].available);
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let existing = slot(date(2025, 6, 2), 9, 0);
    let ctx = TestContext::with_slots(vec![existing.clone()]).await;

    let response = ctx.server.delete("/api/slots/2025-06-02-09:00").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.store.list().await.unwrap(), vec![existing]);
}

#[tokio::test]
async fn test_delete_confirmed() {
    let ctx = TestContext::with_slots(vec![slot(date(2025, 6, 2), 9, 0)]).await;

    let response = ctx
        .server
        .delete("/api/slots/2025-06-02-09:00")
        .add_query_param("confirm", "true")
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert!(ctx.store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_unknown_id_is_noop() {
    let ctx = TestContext::with_slots(vec![slot(date(2025, 6, 2), 9, 0)]).await;

    let response = ctx
        .server
        .delete("/api/slots/2025-06-02-11:00")
        .add_query_param("confirm", "true")
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert_eq!(ctx.store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_schedule_range_skips_weekend() {
    let ctx = TestContext::with_slots(vec![
        slot(date(2025, 6, 7), 10, 0),
        slot(date(2025, 6, 9), 10, 0),
    ])
    .await;

    let response = ctx
        .server
        .post("/api/slots/range")
        .json(&json!({
            "startDate": "2025-06-02",
            "endDate": "2025-06-08",
            "templates": [{"start": "09:00", "end": "09:30"}],
            "weekdaysOnly": true
        }))
        .await;

    response.assert_status_ok();
    let body: ScheduleRangeResponse = response.json();
    assert_eq!(body.slots.len(), 5);
    assert_eq!(body.slots[0].id, "2025-06-02-09:00");
    assert_eq!(body.slots[4].id, "2025-06-06-09:00");

    let slots = ctx.store.list().await.unwrap();
    let ids: HashSet<_> = slots.iter().map(|s| s.id.as_str()).collect();
    // the Saturday slot fell inside the range, the following Monday did not
    assert!(!ids.contains("2025-06-07-10:00"));
    assert!(ids.contains("2025-06-09-10:00"));
    assert_eq!(slots.len(), 6);
}

#[tokio::test]
async fn test_schedule_range_rejects_empty_templates() {
    let ctx = TestContext::empty().await;

    let response = ctx
        .server
        .post("/api/slots/range")
        .json(&json!({
            "startDate": "2025-06-02",
            "endDate": "2025-06-03",
            "templates": [],
            "weekdaysOnly": false
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[rstest]
#[case("0001-01-01", "9999-12-31", 1)]
#[case("2025-01-01", "2026-01-02", 1)]
#[case("2025-06-02", "2025-06-03", 49)]
#[tokio::test]
async fn test_schedule_range_rejects_oversized_request(
    #[case] start: &str,
    #[case] end: &str,
    #[case] template_count: usize,
) {
    let existing = slot(date(2025, 6, 2), 9, 0);
    let ctx = TestContext::with_slots(vec![existing.clone()]).await;
    let templates: Vec<Value> = (0..template_count)
        .map(|_| json!({"start": "09:00", "end": "09:30"}))
        .collect();

    let response = ctx
        .server
        .post("/api/slots/range")
        .json(&json!({
            "startDate": start,
            "endDate": end,
            "templates": templates,
            "weekdaysOnly": false
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.store.list().await.unwrap(), vec![existing]);
}

#[tokio::test]
async fn test_schedule_range_accepts_full_year() {
    let ctx = TestContext::empty().await;

    let response = ctx
        .server
        .post("/api/slots/range")
        .json(&json!({
            "startDate": "2024-01-01",
            "endDate": "2024-12-31",
            "templates": [{"start": "09:00", "end": "09:30"}],
            "weekdaysOnly": false
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(ctx.store.list().await.unwrap().len(), 366);
}

#[rstest]
#[case(false, StatusCode::OK)]
#[case(true, StatusCode::BAD_REQUEST)]
#[tokio::test]
async fn test_schedule_inverted_range(#[case] strict: bool, #[case] expected: StatusCode) {
    let existing = slot(date(2025, 6, 4), 9, 0);
    let ctx = TestContext::with_slots(vec![existing.clone()]).await;

    let response = ctx
        .server
        .post("/api/slots/range")
        .json(&json!({
            "startDate": "2025-06-07",
            "endDate": "2025-06-02",
            "templates": [{"start": "09:00", "end": "09:30"}],
            "weekdaysOnly": false,
            "strict": strict
        }))
        .await;

    response.assert_status(expected);
    if !strict {
        let body: ScheduleRangeResponse = response.json();
        assert!(body.slots.is_empty());
    }
    assert_eq!(ctx.store.list().await.unwrap(), vec![existing]);
}

#[tokio::test]
async fn test_backing_failure_maps_to_server_error() {
    let mut backend = MockSlotBackend::new();
    backend.expect_fetch_all().returning(|| Ok(Vec::new()));
    backend
        .expect_upsert()
        .returning(|_| Err(eyre::eyre!("disk full")));
    let ctx = TestContext::with_backend(Arc::new(backend), StoreConfig::default()).await;

    let response = ctx
        .server
        .post("/api/slots")
        .json(&json!({"date": "2025-06-10", "startTime": "14:00", "endTime": "14:30"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        response.json::<Value>()["error"]
            .as_str()
            .unwrap()
            .contains("disk full")
    );

    let status: StoreStatus = ctx.server.get("/api/status").await.json();
    assert!(!status.is_loading);
    assert!(status.error.is_some());
}

#[tokio::test]
async fn test_stalled_backend_maps_to_gateway_timeout() {
    let backend = InMemorySlotBackend::new().with_latency(Duration::from_millis(300));
    let ctx = TestContext::with_backend(
        Arc::new(backend),
        StoreConfig {
            operation_timeout: Duration::from_millis(50),
            ..StoreConfig::default()
        },
    )
    .await;

    let response = ctx
        .server
        .post("/api/slots")
        .json(&json!({"date": "2025-06-10", "startTime": "14:00", "endTime": "14:30"}))
        .await;

    response.assert_status(StatusCode::GATEWAY_TIMEOUT);
    assert!(ctx.store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_status_after_success() {
    let ctx = TestContext::empty().await;

    ctx.server
        .post("/api/slots")
        .json(&json!({"date": "2025-06-10", "startTime": "14:00", "endTime": "14:30"}))
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx.server.get("/api/status").await;

    response.assert_status_ok();
    response.assert_json(&json!({"isLoading": false, "error": null}));
}
