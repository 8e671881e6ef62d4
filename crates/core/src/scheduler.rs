//! # Bulk Range Scheduler
//!
//! Expands daily templates over an inclusive date range into concrete slots
//! and names the window of existing slots they supersede.
//!
//! ## Replacement policy
//!
//! A bulk operation is a full reset of its window, not a merge: every
//! existing slot dated inside `[start, end]` is evicted, including slots on
//! days the weekday filter skips. Those days are left empty afterwards.
//!
//! ## Ordering
//!
//! Output is ordered by ascending date, then by template order as supplied.
//! Templates are never re-sorted by time.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::{
    errors::{SlotError, SlotResult},
    models::{
        schedule::{DailyTemplate, DateRange, RangePolicy},
        time_slot::TimeSlot,
    },
};

/// Saturday or Sunday, counting Sunday as day 0 and Saturday as day 6.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday().num_days_from_sunday(), 0 | 6)
}

/// The outcome of planning a bulk operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangePlan {
    /// Existing slots dated inside this window are evicted.
    pub window: DateRange,
    /// Slots installed after eviction, in emission order.
    pub slots: Vec<TimeSlot>,
}

/// Generates slots for every day of `range` that `skip_day` does not reject.
///
/// Returns nothing for a range whose start lies after its end.
pub fn generate<F>(range: DateRange, templates: &[DailyTemplate], skip_day: F) -> Vec<TimeSlot>
where
    F: Fn(NaiveDate) -> bool,
{
    range
        .days()
        .filter(|day| !skip_day(*day))
        .flat_map(|day| {
            templates
                .iter()
                .map(move |template| TimeSlot::new(day, template.start, template.end))
        })
        .collect()
}

/// Lenient schedule: an inverted range yields an empty result.
pub fn schedule(
    range: DateRange,
    templates: &[DailyTemplate],
    weekdays_only: bool,
) -> Vec<TimeSlot> {
    generate(range, templates, |day| weekdays_only && is_weekend(day))
}

/// Strict plan: an inverted range is reported as [`SlotError::InvalidRange`].
pub fn plan(
    range: DateRange,
    templates: &[DailyTemplate],
    weekdays_only: bool,
) -> SlotResult<RangePlan> {
    if !range.is_valid() {
        return Err(SlotError::InvalidRange {
            start: range.start_date,
            end: range.end_date,
        });
    }

    Ok(RangePlan {
        window: range,
        slots: schedule(range, templates, weekdays_only),
    })
}

/// Plans under the given policy.
///
/// `Ok(None)` means the lenient policy swallowed an inverted range and
/// nothing should change.
pub fn plan_with_policy(
    range: DateRange,
    templates: &[DailyTemplate],
    weekdays_only: bool,
    policy: RangePolicy,
) -> SlotResult<Option<RangePlan>> {
    match (policy, plan(range, templates, weekdays_only)) {
        (_, Ok(plan)) => Ok(Some(plan)),
        (RangePolicy::Lenient, Err(SlotError::InvalidRange { .. })) => Ok(None),
        (_, Err(e)) => Err(e),
    }
}

/// Applies a plan to a collection in place.
///
/// Evicts every slot dated inside the plan window, then installs the
/// planned slots. A planned slot whose id is already present (two templates
/// sharing a start time) replaces the earlier one in its position.
pub fn apply(slots: &mut Vec<TimeSlot>, plan: &RangePlan) {
    slots.retain(|slot| !plan.window.contains(slot.date));
    upsert_all(slots, plan.slots.iter().cloned());
}

/// Inserts `slot`, replacing in place any slot with the same id.
pub fn upsert(slots: &mut Vec<TimeSlot>, slot: TimeSlot) {
    match slots.iter_mut().find(|existing| existing.id == slot.id) {
        Some(existing) => *existing = slot,
        None => slots.push(slot),
    }
}

/// Upserts every slot of `incoming` with one id index built up front, so a
/// large batch costs linear time.
pub fn upsert_all<I>(slots: &mut Vec<TimeSlot>, incoming: I)
where
    I: IntoIterator<Item = TimeSlot>,
{
    let mut positions: HashMap<String, usize> = slots
        .iter()
        .enumerate()
        .map(|(index, slot)| (slot.id.clone(), index))
        .collect();

    for slot in incoming {
        match positions.get(&slot.id) {
            Some(&index) => slots[index] = slot,
            None => {
                positions.insert(slot.id.clone(), slots.len());
                slots.push(slot);
            }
        }
    }
}
