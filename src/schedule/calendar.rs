//! Whole-day calendar primitives shared by every window computation.
//!
//! All interval math in this crate is whole-day inclusive: a record active on
//! a day occupies that entire day. [`DateSpan`] keeps that rule structural by
//! comparing calendar dates only; [`day_start`] and [`day_end`] convert spans
//! to instant bounds for collaborators that carry timestamps.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// First instant of the given calendar day.
pub fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last represented instant of the given calendar day (millisecond precision).
pub fn day_end(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap())
}

/// Calendar day an instant falls on, regardless of its time component.
pub fn date_of(instant: NaiveDateTime) -> NaiveDate {
    instant.date()
}

/// Number of calendar days in the month containing `date` (28 through 31).
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

/// Inclusive span of whole calendar days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Span covering exactly one day.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// A reversed span covers no days at all.
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Shared days of two spans, or `None` when they touch nowhere.
    ///
    /// Reversed inputs simply produce an empty intersection; they are never
    /// treated as an error.
    pub fn overlap(&self, other: DateSpan) -> Option<DateSpan> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start <= end {
            Some(DateSpan { start, end })
        } else {
            None
        }
    }

    pub fn overlaps(&self, other: DateSpan) -> bool {
        self.overlap(other).is_some()
    }

    /// Count of days covered, zero for reversed spans.
    pub fn num_days(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).num_days() + 1
        }
    }

    /// Iterates every covered day in order.
    pub fn days(&self) -> Days {
        let next = if self.is_empty() {
            None
        } else {
            Some(self.start)
        };
        Days { next, end: self.end }
    }

    /// Instant bound of the first covered day.
    pub fn start_instant(&self) -> NaiveDateTime {
        day_start(self.start)
    }

    /// Instant bound of the last covered day.
    pub fn end_instant(&self) -> NaiveDateTime {
        day_end(self.end)
    }
}

/// Iterator over the days of a [`DateSpan`].
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for Days {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = if current < self.end {
            current.succ_opt()
        } else {
            None
        };
        Some(current)
    }
}
