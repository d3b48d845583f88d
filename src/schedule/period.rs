//! Resolves week/month/year viewing windows and steps an anchor through time.

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::assignment::Assignment;

use super::calendar::{days_in_month, DateSpan};

/// Granularity of the viewing window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Week,
    Month,
    Year,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Week => "Week",
            ViewMode::Month => "Month",
            ViewMode::Year => "Year",
        }
    }
}

/// First-day-of-week convention applied to week windows and week labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    fn offset_from(&self, date: NaiveDate) -> i64 {
        match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday() as i64,
            WeekStart::Monday => date.weekday().num_days_from_monday() as i64,
        }
    }

    /// First day of the week containing `date` under this convention.
    pub fn week_start_of(&self, date: NaiveDate) -> NaiveDate {
        date - Duration::days(self.offset_from(date))
    }

    /// One-based index of `date`'s week within its month.
    pub fn week_of_month(&self, date: NaiveDate) -> u32 {
        let first = date.with_day(1).unwrap();
        let offset = self.offset_from(first) as u32;
        (offset + date.day() - 1) / 7 + 1
    }
}

/// A resolved viewing window plus its ordered column decomposition.
///
/// Week and month windows decompose into one column per day; year windows
/// into one column per month. The anchor and week convention the window was
/// resolved under are kept so labels stay consistent with the resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub mode: ViewMode,
    pub anchor: NaiveDate,
    pub week_start: WeekStart,
    pub span: DateSpan,
    pub columns: Vec<DateSpan>,
}

impl Period {
    /// Header label for the window: `2025`, `2025-03`, or `2025-03 W2`.
    pub fn label(&self) -> String {
        match self.mode {
            ViewMode::Year => self.anchor.format("%Y").to_string(),
            ViewMode::Month => self.anchor.format("%Y-%m").to_string(),
            ViewMode::Week => format!(
                "{} W{}",
                self.anchor.format("%Y-%m"),
                self.week_start.week_of_month(self.anchor)
            ),
        }
    }

    /// Retains assignments whose day span touches this window.
    pub fn filter_assignments<'a>(&self, assignments: &'a [Assignment]) -> Vec<&'a Assignment> {
        assignments
            .iter()
            .filter(|assignment| assignment.span().overlaps(self.span))
            .collect()
    }

    /// Index of the column containing `date`, if the window covers it.
    pub fn column_for(&self, date: NaiveDate) -> Option<usize> {
        self.columns.iter().position(|column| column.contains(date))
    }
}

/// Resolves the window containing `anchor` for the requested mode.
pub fn resolve_period(mode: ViewMode, anchor: NaiveDate, week_start: WeekStart) -> Period {
    let (span, columns) = match mode {
        ViewMode::Week => {
            let start = week_start.week_start_of(anchor);
            let span = DateSpan::new(start, start + Duration::days(6));
            let columns = span.days().map(DateSpan::single).collect();
            (span, columns)
        }
        ViewMode::Month => {
            let start = anchor.with_day(1).unwrap();
            let span = DateSpan::new(
                start,
                start + Duration::days(days_in_month(anchor) as i64 - 1),
            );
            let columns = span.days().map(DateSpan::single).collect();
            (span, columns)
        }
        ViewMode::Year => {
            let span = DateSpan::new(
                NaiveDate::from_ymd_opt(anchor.year(), 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(anchor.year(), 12, 31).unwrap(),
            );
            let columns = (1..=12).map(|month| month_span(anchor.year(), month)).collect();
            (span, columns)
        }
    };
    Period {
        mode,
        anchor,
        week_start,
        span,
        columns,
    }
}

fn month_span(year: i32, month: u32) -> DateSpan {
    let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    DateSpan::new(start, start + Duration::days(days_in_month(start) as i64 - 1))
}

/// Tracks the active mode and anchor date as a user steps through time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewCursor {
    pub mode: ViewMode,
    pub anchor: NaiveDate,
    pub week_start: WeekStart,
}

impl ViewCursor {
    pub fn new(mode: ViewMode, anchor: NaiveDate, week_start: WeekStart) -> Self {
        Self {
            mode,
            anchor,
            week_start,
        }
    }

    /// Cursor anchored on the current local date.
    pub fn today(mode: ViewMode, week_start: WeekStart) -> Self {
        Self::new(mode, Local::now().date_naive(), week_start)
    }

    /// Steps one unit of the current mode backwards.
    pub fn prev(&mut self) {
        self.anchor = match self.mode {
            ViewMode::Week => self.anchor - Duration::weeks(1),
            ViewMode::Month => shift_month(self.anchor, -1),
            ViewMode::Year => shift_year(self.anchor, -1),
        };
    }

    /// Steps one unit of the current mode forwards.
    pub fn next(&mut self) {
        self.anchor = match self.mode {
            ViewMode::Week => self.anchor + Duration::weeks(1),
            ViewMode::Month => shift_month(self.anchor, 1),
            ViewMode::Year => shift_year(self.anchor, 1),
        };
    }

    /// Resets the anchor to the current local date without changing mode.
    pub fn jump_today(&mut self) {
        self.anchor = Local::now().date_naive();
    }

    pub fn jump_to(&mut self, date: NaiveDate) {
        self.anchor = date;
    }

    /// Switches mode while keeping the anchor in place.
    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn resolve(&self) -> Period {
        resolve_period(self.mode, self.anchor, self.week_start)
    }
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let first = NaiveDate::from_ymd_opt(year, month as u32, 1).unwrap();
    let day = date.day().min(days_in_month(first));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap()
}

fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let first = NaiveDate::from_ymd_opt(year, date.month(), 1).unwrap();
    let day = date.day().min(days_in_month(first));
    NaiveDate::from_ymd_opt(year, date.month(), day).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn week_resolution_honors_both_conventions() {
        let anchor = date(2025, 3, 12); // a Wednesday
        let sunday = resolve_period(ViewMode::Week, anchor, WeekStart::Sunday);
        assert_eq!(sunday.span.start, date(2025, 3, 9));
        assert_eq!(sunday.span.end, date(2025, 3, 15));
        assert_eq!(sunday.columns.len(), 7);
        assert_eq!(sunday.columns[0], DateSpan::single(date(2025, 3, 9)));

        let monday = resolve_period(ViewMode::Week, anchor, WeekStart::Monday);
        assert_eq!(monday.span.start, date(2025, 3, 10));
        assert_eq!(monday.span.end, date(2025, 3, 16));
    }

    #[test]
    fn month_resolution_covers_first_through_last_day() {
        let period = resolve_period(ViewMode::Month, date(2025, 2, 10), WeekStart::Sunday);
        assert_eq!(period.span.start, date(2025, 2, 1));
        assert_eq!(period.span.end, date(2025, 2, 28));
        assert_eq!(period.columns.len(), 28);
        assert_eq!(period.columns[27], DateSpan::single(date(2025, 2, 28)));
    }

    #[test]
    fn year_resolution_produces_twelve_month_columns() {
        let period = resolve_period(ViewMode::Year, date(2025, 6, 15), WeekStart::Sunday);
        assert_eq!(period.span.start, date(2025, 1, 1));
        assert_eq!(period.span.end, date(2025, 12, 31));
        assert_eq!(period.columns.len(), 12);
        assert_eq!(
            period.columns[1],
            DateSpan::new(date(2025, 2, 1), date(2025, 2, 28))
        );
        assert_eq!(period.column_for(date(2025, 2, 14)), Some(1));
        assert_eq!(period.column_for(date(2026, 1, 1)), None);
    }

    #[test]
    fn labels_follow_the_mode() {
        let year = resolve_period(ViewMode::Year, date(2025, 6, 15), WeekStart::Sunday);
        assert_eq!(year.label(), "2025");
        let month = resolve_period(ViewMode::Month, date(2025, 3, 12), WeekStart::Sunday);
        assert_eq!(month.label(), "2025-03");
        let week = resolve_period(ViewMode::Week, date(2025, 3, 12), WeekStart::Sunday);
        assert_eq!(week.label(), "2025-03 W3");
    }

    #[test]
    fn month_navigation_clamps_the_day() {
        let mut cursor = ViewCursor::new(ViewMode::Month, date(2025, 1, 31), WeekStart::Sunday);
        cursor.next();
        assert_eq!(cursor.anchor, date(2025, 2, 28));
        cursor.next();
        assert_eq!(cursor.anchor, date(2025, 3, 28));

        let mut back = ViewCursor::new(ViewMode::Month, date(2025, 3, 31), WeekStart::Sunday);
        back.prev();
        assert_eq!(back.anchor, date(2025, 2, 28));
    }

    #[test]
    fn year_navigation_clamps_leap_day() {
        let mut cursor = ViewCursor::new(ViewMode::Year, date(2024, 2, 29), WeekStart::Sunday);
        cursor.next();
        assert_eq!(cursor.anchor, date(2025, 2, 28));
        cursor.prev();
        assert_eq!(cursor.anchor, date(2024, 2, 28));
    }

    #[test]
    fn week_navigation_steps_seven_days() {
        let mut cursor = ViewCursor::new(ViewMode::Week, date(2025, 3, 12), WeekStart::Sunday);
        cursor.next();
        assert_eq!(cursor.anchor, date(2025, 3, 19));
        cursor.prev();
        cursor.prev();
        assert_eq!(cursor.anchor, date(2025, 3, 5));
    }

    #[test]
    fn mode_switch_keeps_anchor_and_today_resets_it() {
        let mut cursor = ViewCursor::new(ViewMode::Year, date(2020, 7, 4), WeekStart::Sunday);
        cursor.set_mode(ViewMode::Week);
        assert_eq!(cursor.anchor, date(2020, 7, 4));
        cursor.jump_today();
        assert_eq!(cursor.anchor, Local::now().date_naive());
        assert_eq!(cursor.mode, ViewMode::Week);
    }

    #[test]
    fn filter_keeps_only_overlapping_assignments() {
        let period = resolve_period(ViewMode::Month, date(2025, 3, 1), WeekStart::Sunday);
        let inside = Assignment::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "build",
            date(2025, 3, 10),
            date(2025, 3, 20),
        );
        let straddling = Assignment::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "rollout",
            date(2025, 2, 20),
            date(2025, 3, 5),
        );
        let outside = Assignment::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "maintenance",
            date(2025, 4, 1),
            date(2025, 4, 30),
        );
        let all = vec![inside.clone(), straddling.clone(), outside];
        let kept = period.filter_assignments(&all);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().any(|a| a.id == inside.id));
        assert!(kept.iter().any(|a| a.id == straddling.id));
    }
}
