//! In-memory backing store.
//!
//! Holds slots in a `Vec` behind an async lock and optionally sleeps before
//! each call to stand in for a network round trip.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use eyre::{Result, eyre};
use slotbook_core::{
    models::{schedule::DateRange, time_slot::TimeSlot},
    scheduler::{self, RangePlan},
};
use tokio::sync::RwLock;

use crate::backend::SlotBackend;

#[derive(Debug, Clone, Default)]
pub struct InMemorySlotBackend {
    slots: Arc<RwLock<Vec<TimeSlot>>>,
    latency: Duration,
}

impl InMemorySlotBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the given slots instead of an empty collection.
    pub fn with_slots(slots: Vec<TimeSlot>) -> Self {
        Self {
            slots: Arc::new(RwLock::new(slots)),
            latency: Duration::ZERO,
        }
    }

    /// Delays every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl SlotBackend for InMemorySlotBackend {
    async fn fetch_all(&self) -> Result<Vec<TimeSlot>> {
        self.round_trip().await;
        Ok(self.slots.read().await.clone())
    }

    async fn upsert(&self, slot: TimeSlot) -> Result<()> {
        self.round_trip().await;
        scheduler::upsert(&mut *self.slots.write().await, slot);
        Ok(())
    }

    async fn set_availability(&self, id: String, available: bool) -> Result<()> {
        self.round_trip().await;
        let mut slots = self.slots.write().await;
        let slot = slots
            .iter_mut()
            .find(|slot| slot.id == id)
            .ok_or_else(|| eyre!("Time slot {} not found", id))?;
        slot.available = available;
        Ok(())
    }

    async fn delete(&self, id: String) -> Result<()> {
        self.round_trip().await;
        self.slots.write().await.retain(|slot| slot.id != id);
        Ok(())
    }

    async fn replace_range(&self, window: DateRange, slots: Vec<TimeSlot>) -> Result<()> {
        self.round_trip().await;
        let plan = RangePlan { window, slots };
        scheduler::apply(&mut *self.slots.write().await, &plan);
        Ok(())
    }
}
