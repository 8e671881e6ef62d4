pub mod calendar;
pub mod slots;
