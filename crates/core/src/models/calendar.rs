use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{
    time_slot::{CreateTimeSlotRequest, TimeSlot},
    wire,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Unavailable,
}

impl SlotStatus {
    pub fn from_available(available: bool) -> Self {
        if available {
            Self::Available
        } else {
            Self::Unavailable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }
}

/// A slot shaped for a calendar display surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status_tag: SlotStatus,
    pub backing_slot: TimeSlot,
}

/// A range picked on the calendar surface, optionally on top of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub event_id: Option<String>,
}

/// Slot-creation input derived from an empty calendar selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotCandidate {
    #[serde(with = "wire::date")]
    pub date: NaiveDate,
    #[serde(with = "wire::time")]
    pub start_time: NaiveTime,
    #[serde(with = "wire::time")]
    pub end_time: NaiveTime,
}

impl From<SlotCandidate> for CreateTimeSlotRequest {
    fn from(candidate: SlotCandidate) -> Self {
        CreateTimeSlotRequest {
            date: candidate.date,
            start_time: candidate.start_time,
            end_time: candidate.end_time,
        }
    }
}

/// Which editor flow a selection opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum SelectionIntent {
    Create { candidate: SlotCandidate },
    Edit { slot: TimeSlot },
}
