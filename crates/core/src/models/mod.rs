pub mod calendar;
pub mod schedule;
pub mod time_slot;
pub mod wire;
