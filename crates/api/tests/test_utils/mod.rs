use std::sync::Arc;

use axum_test::TestServer;
use chrono::{NaiveDate, NaiveTime};
use slotbook_api::{ApiState, build_router};
use slotbook_core::models::time_slot::TimeSlot;
use slotbook_db::{backend::SlotBackend, memory::InMemorySlotBackend};
use slotbook_store::{SlotStore, StoreConfig};

pub struct TestContext {
    pub server: TestServer,
    pub store: SlotStore,
}

impl TestContext {
    /// Server over an in-memory backend holding `slots`.
    pub async fn with_slots(slots: Vec<TimeSlot>) -> Self {
        Self::with_backend(Arc::new(InMemorySlotBackend::with_slots(slots)), StoreConfig::default())
            .await
    }

    pub async fn empty() -> Self {
        Self::with_slots(Vec::new()).await
    }

    /// Server over any backend; the collection is loaded once before the
    /// first request when the backend allows it.
    pub async fn with_backend(backend: Arc<dyn SlotBackend>, config: StoreConfig) -> Self {
        let store = SlotStore::spawn(backend, config);
        let _ = store.fetch_all().await;

        let server = TestServer::new(build_router(Arc::new(ApiState::new(store.clone()))))
            .expect("test server");

        Self { server, store }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn slot(day: NaiveDate, h: u32, m: u32) -> TimeSlot {
    let start = time(h, m);
    let end = start + chrono::Duration::minutes(30);
    TimeSlot::new(day, start, end)
}
