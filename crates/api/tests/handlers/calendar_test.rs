use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use slotbook_core::models::calendar::{CalendarEvent, SelectionIntent, SlotStatus};

use crate::test_utils::{TestContext, date, slot, time};

#[tokio::test]
async fn test_list_events() {
    let mut blocked = slot(date(2025, 6, 2), 14, 0);
    blocked.available = false;
    let ctx = TestContext::with_slots(vec![blocked, slot(date(2025, 6, 2), 9, 0)]).await;

    let response = ctx.server.get("/api/calendar/events").await;

    response.assert_status_ok();
    let events: Vec<CalendarEvent> = response.json();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, "2025-06-02-09:00");
    assert_eq!(events[0].status_tag, SlotStatus::Available);
    assert_eq!(events[1].title, "unavailable");
    assert_eq!(events[1].start, date(2025, 6, 2).and_time(time(14, 0)));
}

#[tokio::test]
async fn test_event_wire_shape() {
    let ctx = TestContext::with_slots(vec![slot(date(2025, 6, 2), 9, 0)]).await;

    let events: Value = ctx.server.get("/api/calendar/events").await.json();

    assert_eq!(events[0]["statusTag"], json!("available"));
    assert_eq!(events[0]["start"], json!("2025-06-02T09:00:00"));
    assert_eq!(events[0]["backingSlot"]["startTime"], json!("09:00"));
}

#[tokio::test]
async fn test_selection_on_empty_cell() {
    let ctx = TestContext::with_slots(vec![slot(date(2025, 6, 2), 9, 0)]).await;

    let response = ctx
        .server
        .post("/api/calendar/selection")
        .json(&json!({"start": "2025-06-02T10:00:00", "end": "2025-06-02T10:30:00"}))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "action": "create",
        "candidate": {
            "date": "2025-06-02",
            "startTime": "10:00",
            "endTime": "10:30"
        }
    }));
}

#[tokio::test]
async fn test_selection_over_existing_event() {
    let existing = slot(date(2025, 6, 2), 9, 0);
    let ctx = TestContext::with_slots(vec![existing.clone()]).await;

    let response = ctx
        .server
        .post("/api/calendar/selection")
        .json(&json!({
            "start": "2025-06-02T09:00:00",
            "end": "2025-06-02T09:30:00",
            "eventId": "2025-06-02-09:00"
        }))
        .await;

    response.assert_status_ok();
    let intent: SelectionIntent = response.json();
    assert_eq!(intent, SelectionIntent::Edit { slot: existing });
}

#[tokio::test]
async fn test_selection_rejects_malformed_instant() {
    let ctx = TestContext::empty().await;

    let response = ctx
        .server
        .post("/api/calendar/selection")
        .json(&json!({"start": "tomorrow", "end": "2025-06-02T10:30:00"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
