use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::wire::{self, DATE_FORMAT, TIME_FORMAT};

/// Derives the identity of a slot from its date and start time.
///
/// Two slots sharing a date and start time are the same entity, so this is
/// the only key the engine ever uses. The format is `YYYY-MM-DD-HH:MM`.
pub fn slot_id(date: NaiveDate, start_time: NaiveTime) -> String {
    format!(
        "{}-{}",
        date.format(DATE_FORMAT),
        start_time.format(TIME_FORMAT)
    )
}

/// A single schedulable window on a given date.
///
/// The serialized form is the durable record shared with backing stores:
/// `{id, date, startTime, endTime, available}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    #[serde(with = "wire::date")]
    pub date: NaiveDate,
    #[serde(with = "wire::time")]
    pub start_time: NaiveTime,
    #[serde(with = "wire::time")]
    pub end_time: NaiveTime,
    pub available: bool,
}

impl TimeSlot {
    /// Builds a new, available slot with its derived id.
    pub fn new(date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            id: slot_id(date, start_time),
            date,
            start_time,
            end_time,
            available: true,
        }
    }

    /// Key used for every display ordering.
    pub fn sort_key(&self) -> (NaiveDate, NaiveTime) {
        (self.date, self.start_time)
    }
}

/// Orders slots by `(date, startTime)` for display.
pub fn sort_for_display(slots: &mut [TimeSlot]) {
    slots.sort_by_key(TimeSlot::sort_key);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeSlotRequest {
    #[serde(with = "wire::date")]
    pub date: NaiveDate,
    #[serde(with = "wire::time")]
    pub start_time: NaiveTime,
    #[serde(with = "wire::time")]
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTimeSlotsResponse {
    pub slots: Vec<TimeSlot>,
    pub error: Option<String>,
}
