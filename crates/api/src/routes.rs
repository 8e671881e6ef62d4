pub mod calendar;
pub mod health;
pub mod slots;
