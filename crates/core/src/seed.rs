//! Demo data for a freshly started, empty store.

use chrono::{Days, NaiveDate, NaiveTime};
use rand::Rng;

use crate::{
    models::{schedule::DateRange, time_slot::TimeSlot},
    scheduler::is_weekend,
};

const DEMO_DAYS: u64 = 7;
const MORNING_HOURS: std::ops::Range<u32> = 9..12;
const AFTERNOON_HOURS: std::ops::Range<u32> = 14..17;
const AVAILABLE_PROBABILITY: f64 = 0.7;

/// Half-hour slots for the week starting at `today`, weekdays only.
///
/// Mornings run 09:00-12:00 and afternoons 14:00-17:00. Each slot is
/// available with probability 0.7.
pub fn demo_slots<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> Vec<TimeSlot> {
    let last = today
        .checked_add_days(Days::new(DEMO_DAYS - 1))
        .unwrap_or(today);

    let mut slots = Vec::new();
    for day in DateRange::new(today, last).days() {
        if is_weekend(day) {
            continue;
        }

        for hour in MORNING_HOURS.chain(AFTERNOON_HOURS) {
            for (start, end) in half_hours(hour) {
                let mut slot = TimeSlot::new(day, start, end);
                slot.available = rng.gen_bool(AVAILABLE_PROBABILITY);
                slots.push(slot);
            }
        }
    }

    slots
}

fn half_hours(hour: u32) -> impl Iterator<Item = (NaiveTime, NaiveTime)> {
    let at = move |h: u32, m: u32| NaiveTime::from_hms_opt(h, m, 0);
    [(at(hour, 0), at(hour, 30)), (at(hour, 30), at(hour + 1, 0))]
        .into_iter()
        .filter_map(|pair| match pair {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        })
}
