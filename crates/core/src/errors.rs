use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid range: start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Backing store error: {0}")]
    BackingFailure(#[from] eyre::Report),

    #[error("Backing call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Slot store unavailable: {0}")]
    Unavailable(String),
}

pub type SlotResult<T> = Result<T, SlotError>;
