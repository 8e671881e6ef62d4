use chrono::{Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{time_slot::TimeSlot, wire};
use crate::errors::{SlotError, SlotResult};

/// One recurring daily window applied to every qualifying day of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTemplate {
    #[serde(with = "wire::time")]
    pub start: NaiveTime,
    #[serde(with = "wire::time")]
    pub end: NaiveTime,
}

impl DailyTemplate {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }
}

/// An inclusive calendar-date window.
///
/// A window whose start lies after its end is representable; it contains no
/// days and [`DateRange::is_valid`] reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[serde(with = "wire::date")]
    pub start_date: NaiveDate,
    #[serde(with = "wire::date")]
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.start_date <= self.end_date
    }

    /// Number of days in the window; zero when inverted.
    pub fn len_days(&self) -> u64 {
        if !self.is_valid() {
            return 0;
        }
        (self.end_date - self.start_date).num_days().unsigned_abs() + 1
    }

    /// Whether `date` lies within the window, boundaries included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Every calendar day of the window in ascending order.
    pub fn days(&self) -> DaysIter {
        DaysIter {
            cursor: Some(self.start_date),
            end: self.end_date,
        }
    }
}

/// Iterator over the days of a [`DateRange`].
#[derive(Debug, Clone)]
pub struct DaysIter {
    cursor: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for DaysIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor.filter(|day| *day <= self.end)?;
        self.cursor = current.checked_add_days(Days::new(1));
        Some(current)
    }
}

/// How a range with `startDate > endDate` is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    /// Produce an empty schedule and change nothing.
    #[default]
    Lenient,
    /// Report the range as `SlotError::InvalidRange`.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRangeRequest {
    #[serde(with = "wire::date")]
    pub start_date: NaiveDate,
    #[serde(with = "wire::date")]
    pub end_date: NaiveDate,
    pub templates: Vec<DailyTemplate>,
    pub weekdays_only: bool,
    #[serde(default)]
    pub strict: bool,
}

impl ScheduleRangeRequest {
    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    pub fn policy(&self) -> RangePolicy {
        if self.strict {
            RangePolicy::Strict
        } else {
            RangePolicy::Lenient
        }
    }
}

/// Upper bounds on what a single range request may materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeLimits {
    pub max_days: u64,
    pub max_templates: usize,
}

impl Default for RangeLimits {
    fn default() -> Self {
        Self {
            max_days: 366,
            max_templates: 48,
        }
    }
}

impl RangeLimits {
    /// Rejects an empty template list, too many templates or too long a span.
    ///
    /// An inverted range passes; the range policy decides what it means.
    pub fn check(&self, request: &ScheduleRangeRequest) -> SlotResult<()> {
        if request.templates.is_empty() {
            return Err(SlotError::Validation(
                "At least one daily template is required".to_string(),
            ));
        }
        if request.templates.len() > self.max_templates {
            return Err(SlotError::Validation(format!(
                "At most {} daily templates are allowed, got {}",
                self.max_templates,
                request.templates.len()
            )));
        }
        let days = request.range().len_days();
        if days > self.max_days {
            return Err(SlotError::Validation(format!(
                "Range spans {} days, the maximum is {}",
                days, self.max_days
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRangeResponse {
    pub slots: Vec<TimeSlot>,
}
