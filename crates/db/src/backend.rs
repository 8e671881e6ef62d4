use async_trait::async_trait;
use eyre::Result;
use slotbook_core::models::{schedule::DateRange, time_slot::TimeSlot};

/// Durable side of the slot collection.
///
/// Every store operation awaits exactly one of these calls. A failed call
/// must leave the backing data as it was; `upsert` and `replace_range` in
/// particular are all-or-nothing.
#[async_trait]
pub trait SlotBackend: Send + Sync {
    /// Loads the full collection, in any order.
    async fn fetch_all(&self) -> Result<Vec<TimeSlot>>;

    /// Inserts a slot or overwrites the one sharing its id.
    async fn upsert(&self, slot: TimeSlot) -> Result<()>;

    /// Updates the availability flag of an existing slot.
    async fn set_availability(&self, id: String, available: bool) -> Result<()>;

    /// Removes a slot; a missing id is not an error.
    async fn delete(&self, id: String) -> Result<()>;

    /// Removes every slot dated inside `window` and installs `slots`.
    async fn replace_range(&self, window: DateRange, slots: Vec<TimeSlot>) -> Result<()>;
}
