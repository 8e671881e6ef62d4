//! # Calendar Projection
//!
//! Maps slots to and from the event shape a calendar surface draws. All
//! instants are naive local values; no timezone conversion happens in either
//! direction.

use chrono::{NaiveDateTime, NaiveTime, Timelike};

use crate::models::{
    calendar::{CalendarEvent, Selection, SelectionIntent, SlotCandidate, SlotStatus},
    time_slot::TimeSlot,
};

/// Forward map of a single slot.
pub fn to_event(slot: &TimeSlot) -> CalendarEvent {
    let status = SlotStatus::from_available(slot.available);

    CalendarEvent {
        id: slot.id.clone(),
        title: status.as_str().to_string(),
        start: slot.date.and_time(slot.start_time),
        end: slot.date.and_time(slot.end_time),
        status_tag: status,
        backing_slot: slot.clone(),
    }
}

/// Forward map of a collection, ordered by `(date, startTime)`.
pub fn to_events(slots: &[TimeSlot]) -> Vec<CalendarEvent> {
    let mut ordered: Vec<&TimeSlot> = slots.iter().collect();
    ordered.sort_by_key(|slot| slot.sort_key());
    ordered.into_iter().map(to_event).collect()
}

/// Reverse map of an empty selection into slot-creation input.
///
/// The date comes from the start instant. Seconds are dropped so the values
/// match the `HH:MM` wire format exactly; an end at the following midnight
/// becomes `00:00`.
pub fn candidate_from_range(start: NaiveDateTime, end: NaiveDateTime) -> SlotCandidate {
    SlotCandidate {
        date: start.date(),
        start_time: truncate_to_minute(start.time()),
        end_time: truncate_to_minute(end.time()),
    }
}

/// Decides whether a selection edits an existing slot or creates a new one.
///
/// An explicit `event_id` wins when it names a known slot. Otherwise a
/// selection whose start falls inside a slot's window on the same date
/// edits that slot; anything else is an empty selection.
pub fn resolve_selection(slots: &[TimeSlot], selection: &Selection) -> SelectionIntent {
    let by_id = selection
        .event_id
        .as_deref()
        .and_then(|id| slots.iter().find(|slot| slot.id == id));

    let hit = by_id.or_else(|| {
        let date = selection.start.date();
        let at = selection.start.time();
        slots
            .iter()
            .find(|slot| slot.date == date && slot.start_time <= at && at < slot.end_time)
    });

    match hit {
        Some(slot) => SelectionIntent::Edit { slot: slot.clone() },
        None => SelectionIntent::Create {
            candidate: candidate_from_range(selection.start, selection.end),
        },
    }
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}
