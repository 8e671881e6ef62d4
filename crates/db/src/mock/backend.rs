use async_trait::async_trait;
use mockall::mock;
use slotbook_core::models::{schedule::DateRange, time_slot::TimeSlot};

use crate::backend::SlotBackend;

// Mock backing store for testing
mock! {
    pub SlotBackend {}

    #[async_trait]
    impl SlotBackend for SlotBackend {
        async fn fetch_all(&self) -> eyre::Result<Vec<TimeSlot>>;

        async fn upsert(&self, slot: TimeSlot) -> eyre::Result<()>;

        async fn set_availability(&self, id: String, available: bool) -> eyre::Result<()>;

        async fn delete(&self, id: String) -> eyre::Result<()>;

        async fn replace_range(
            &self,
            window: DateRange,
            slots: Vec<TimeSlot>,
        ) -> eyre::Result<()>;
    }
}
