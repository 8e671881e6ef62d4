//! # Slot Editor Workflow
//!
//! Turns single-slot user intents into store calls. The editor owns no
//! state; every successful intent tells the caller to close the edit
//! surface, and every failure is returned so the surface can stay open and
//! show it.
//!
//! Deletion is gated: [`SlotEditor::prepare_delete`] only returns a
//! [`PendingDeletion`], and nothing is removed until it is confirmed.

use slotbook_core::{
    calendar,
    errors::SlotResult,
    models::{
        calendar::{Selection, SelectionIntent},
        time_slot::{CreateTimeSlotRequest, TimeSlot},
    },
};
use tracing::debug;

use crate::store::SlotStore;

/// What the caller should do with its edit surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome<T> {
    pub value: T,
    pub surface: Surface,
}

impl<T> EditOutcome<T> {
    fn closed(value: T) -> Self {
        Self {
            value,
            surface: Surface::Closed,
        }
    }
}

#[derive(Clone)]
pub struct SlotEditor {
    store: SlotStore,
}

impl SlotEditor {
    pub fn new(store: SlotStore) -> Self {
        Self { store }
    }

    /// Resolves a calendar selection against the current collection into
    /// either the create flow or the edit flow.
    pub async fn open(&self, selection: &Selection) -> SlotResult<SelectionIntent> {
        let slots = self.store.list().await?;
        Ok(calendar::resolve_selection(&slots, selection))
    }

    pub async fn request_create(
        &self,
        request: CreateTimeSlotRequest,
    ) -> SlotResult<EditOutcome<TimeSlot>> {
        let slot = self
            .store
            .create(request.date, request.start_time, request.end_time)
            .await?;
        Ok(EditOutcome::closed(slot))
    }

    /// Changes availability; an unknown id comes back as `NotFound`.
    pub async fn request_availability_change(
        &self,
        id: &str,
        available: bool,
    ) -> SlotResult<EditOutcome<TimeSlot>> {
        let slot = self.store.set_availability(id, available).await?;
        Ok(EditOutcome::closed(slot))
    }

    /// First step of a deletion. Nothing is removed until the returned
    /// value is confirmed.
    pub fn prepare_delete(&self, id: impl Into<String>) -> PendingDeletion {
        PendingDeletion {
            store: self.store.clone(),
            id: id.into(),
        }
    }
}

/// A deletion waiting for explicit user confirmation.
#[must_use = "a deletion does nothing until it is confirmed"]
pub struct PendingDeletion {
    store: SlotStore,
    id: String,
}

impl PendingDeletion {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub async fn confirm(self) -> SlotResult<EditOutcome<()>> {
        debug!("Deletion confirmed: id={}", self.id);
        self.store.delete(&self.id).await?;
        Ok(EditOutcome::closed(()))
    }

    /// Abandons the deletion; the edit surface stays open.
    pub fn cancel(self) -> Surface {
        debug!("Deletion cancelled: id={}", self.id);
        Surface::Open
    }
}
