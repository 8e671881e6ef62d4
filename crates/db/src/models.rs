use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use slotbook_core::models::time_slot::TimeSlot;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub available: bool,
}

impl From<DbTimeSlot> for TimeSlot {
    fn from(row: DbTimeSlot) -> Self {
        TimeSlot {
            id: row.id,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            available: row.available,
        }
    }
}

impl From<TimeSlot> for DbTimeSlot {
    fn from(slot: TimeSlot) -> Self {
        DbTimeSlot {
            id: slot.id,
            date: slot.date,
            start_time: slot.start_time,
            end_time: slot.end_time,
            available: slot.available,
        }
    }
}
