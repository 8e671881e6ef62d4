use serde_json::{Value, json};

use crate::test_utils::{TestContext, date, slot};

#[tokio::test]
async fn test_health_reports_slot_count() {
    let ctx = TestContext::with_slots(vec![slot(date(2025, 6, 2), 9, 0)]).await;

    let response = ctx.server.get("/health").await;

    response.assert_status_ok();
    response.assert_json(&json!({"status": "ok", "slots": 1}));
}

#[tokio::test]
async fn test_version() {
    let ctx = TestContext::empty().await;

    let body: Value = ctx.server.get("/version").await.json();

    assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
}
