use async_trait::async_trait;
use eyre::{Result, eyre};
use slotbook_core::models::{schedule::DateRange, time_slot::TimeSlot};

use crate::{DbPool, backend::SlotBackend, models::DbTimeSlot, repositories::time_slot};

/// PostgreSQL-backed slot storage.
#[derive(Debug, Clone)]
pub struct PgSlotBackend {
    pool: DbPool,
}

impl PgSlotBackend {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotBackend for PgSlotBackend {
    async fn fetch_all(&self) -> Result<Vec<TimeSlot>> {
        let rows = time_slot::get_time_slots(&self.pool).await?;
        Ok(rows.into_iter().map(TimeSlot::from).collect())
    }

    async fn upsert(&self, slot: TimeSlot) -> Result<()> {
        time_slot::upsert_time_slot(&self.pool, &DbTimeSlot::from(slot)).await
    }

    async fn set_availability(&self, id: String, available: bool) -> Result<()> {
        time_slot::update_time_slot_availability(&self.pool, &id, available)
            .await?
            .ok_or_else(|| eyre!("Time slot {} not found", id))?;
        Ok(())
    }

    async fn delete(&self, id: String) -> Result<()> {
        let removed = time_slot::delete_time_slot(&self.pool, &id).await?;
        tracing::debug!("Deleted time slot: id={}, rows={}", id, removed);
        Ok(())
    }

    async fn replace_range(&self, window: DateRange, slots: Vec<TimeSlot>) -> Result<()> {
        let rows: Vec<DbTimeSlot> = slots.into_iter().map(DbTimeSlot::from).collect();
        let evicted = time_slot::replace_time_slots_in_range(
            &self.pool,
            window.start_date,
            window.end_date,
            &rows,
        )
        .await?;

        tracing::debug!(
            "Replaced time slots in range: start={}, end={}, evicted={}, inserted={}",
            window.start_date,
            window.end_date,
            evicted,
            rows.len()
        );
        Ok(())
    }
}
