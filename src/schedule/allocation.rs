//! Fractional person-month math over inclusive day spans.
//!
//! One person-month (MM) is one employee fully assigned for one full calendar
//! month. Every covered day contributes the reciprocal of its own month's
//! length, so a day in February is worth more than a day in January and a
//! full month always sums to exactly 1.0.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::assignment::Assignment;

use super::calendar::{days_in_month, DateSpan};

/// Slack above one full-day commitment before a day counts as overbooked.
///
/// Guards against summation noise from the `1/days_in_month` fractions; an
/// employee carrying exactly one full-time assignment on a day must never
/// register as overallocated.
pub const OVERALLOCATION_TOLERANCE: f64 = 0.001;

/// Person-months `assignment` contributes inside `window`.
///
/// The assignment span is clipped to the window first; a disjoint window
/// yields 0.0, which is an expected outcome rather than an error. Reversed
/// ranges behave the same way because their overlap is empty. No rounding is
/// applied here; [`crate::utils::round2`] exists for display formatting only.
pub fn exact_allocation(assignment: &Assignment, window: DateSpan) -> f64 {
    match assignment.span().overlap(window) {
        Some(overlap) => overlap
            .days()
            .map(|day| 1.0 / days_in_month(day) as f64)
            .sum(),
        None => 0.0,
    }
}

/// Per-employee-per-day workload totals for one resolved window.
///
/// Values are the summed `1/days_in_month` fractions of every assignment
/// covering that employee on that day, clipped to the window. Keys are a real
/// composite, so identifiers can never collide the way a concatenated string
/// key could.
#[derive(Debug, Clone, Default)]
pub struct DailyAllocationMap {
    entries: BTreeMap<(Uuid, NaiveDate), f64>,
}

impl DailyAllocationMap {
    /// Accumulates every assignment's per-day contribution inside `window`.
    pub fn build(assignments: &[&Assignment], window: DateSpan) -> Self {
        let mut entries: BTreeMap<(Uuid, NaiveDate), f64> = BTreeMap::new();
        for assignment in assignments {
            let overlap = match assignment.span().overlap(window) {
                Some(overlap) => overlap,
                None => continue,
            };
            for day in overlap.days() {
                let share = 1.0 / days_in_month(day) as f64;
                *entries
                    .entry((assignment.employee_id, day))
                    .or_insert(0.0) += share;
            }
        }
        Self { entries }
    }

    /// Summed month-fraction booked for `employee` on `day` (0.0 when idle).
    pub fn allocation(&self, employee: Uuid, day: NaiveDate) -> f64 {
        self.entries.get(&(employee, day)).copied().unwrap_or(0.0)
    }

    /// Whether `employee` carries more than one full-time commitment on `day`.
    ///
    /// The stored month-fractions are converted back to whole-day commitments
    /// before comparing, so the threshold is independent of month length: a
    /// single covering assignment books exactly 1.0 of the day, a second
    /// concurrent one pushes it to 2.0.
    pub fn is_overallocated(&self, employee: Uuid, day: NaiveDate) -> bool {
        let booked_days = self.allocation(employee, day) * days_in_month(day) as f64;
        booked_days > 1.0 + OVERALLOCATION_TOLERANCE
    }

    /// Days on which `employee` exceeds a full-time commitment, in order.
    pub fn overallocated_days(&self, employee: Uuid) -> Vec<NaiveDate> {
        self.entries
            .iter()
            .filter(|((id, day), value)| {
                *id == employee
                    && **value * days_in_month(*day) as f64 > 1.0 + OVERALLOCATION_TOLERANCE
            })
            .map(|((_, day), _)| *day)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn assignment(start: NaiveDate, end: NaiveDate) -> Assignment {
        Assignment::new(Uuid::new_v4(), Uuid::new_v4(), "work", start, end)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn disjoint_window_contributes_nothing() {
        let a = assignment(date(2025, 1, 1), date(2025, 1, 31));
        let window = DateSpan::new(date(2025, 3, 1), date(2025, 3, 31));
        assert_eq!(exact_allocation(&a, window), 0.0);
    }

    #[test]
    fn full_month_is_exactly_one() {
        let a = assignment(date(2025, 1, 1), date(2025, 1, 31));
        let window = DateSpan::new(date(2025, 1, 1), date(2025, 1, 31));
        assert!(close(exact_allocation(&a, window), 1.0));
    }

    #[test]
    fn half_of_february_is_half_a_person_month() {
        let a = assignment(date(2025, 2, 15), date(2025, 2, 28));
        let window = DateSpan::new(date(2025, 1, 1), date(2025, 12, 31));
        assert!(close(exact_allocation(&a, window), 0.5));
    }

    #[test]
    fn cross_month_spans_prorate_each_month_separately() {
        let a = assignment(date(2025, 1, 25), date(2025, 2, 5));
        let window = DateSpan::new(date(2025, 1, 1), date(2025, 12, 31));
        let expected = 7.0 / 31.0 + 5.0 / 28.0;
        assert!(close(exact_allocation(&a, window), expected));
    }

    #[test]
    fn adjacent_windows_partition_the_total() {
        let a = assignment(date(2025, 3, 10), date(2025, 4, 20));
        let march = DateSpan::new(date(2025, 3, 1), date(2025, 3, 31));
        let april = DateSpan::new(date(2025, 4, 1), date(2025, 4, 30));
        let both = DateSpan::new(date(2025, 3, 1), date(2025, 4, 30));
        let split = exact_allocation(&a, march) + exact_allocation(&a, april);
        assert!(close(split, exact_allocation(&a, both)));
    }

    #[test]
    fn reversed_assignment_range_yields_zero() {
        let a = assignment(date(2025, 6, 20), date(2025, 6, 1));
        let window = DateSpan::new(date(2025, 1, 1), date(2025, 12, 31));
        assert_eq!(exact_allocation(&a, window), 0.0);
    }

    #[test]
    fn map_sums_overlapping_assignments_per_day() {
        let employee = Uuid::new_v4();
        let mut first = assignment(date(2025, 1, 1), date(2025, 1, 31));
        first.employee_id = employee;
        let mut second = assignment(date(2025, 1, 20), date(2025, 2, 10));
        second.employee_id = employee;
        let window = DateSpan::new(date(2025, 1, 1), date(2025, 1, 31));

        let map = DailyAllocationMap::build(&[&first, &second], window);
        assert!(close(map.allocation(employee, date(2025, 1, 10)), 1.0 / 31.0));
        assert!(close(map.allocation(employee, date(2025, 1, 25)), 2.0 / 31.0));
        // February days are outside the window.
        assert_eq!(map.allocation(employee, date(2025, 2, 1)), 0.0);
    }

    #[test]
    fn single_full_time_assignment_is_not_overallocated() {
        let employee = Uuid::new_v4();
        let mut only = assignment(date(2025, 1, 1), date(2025, 1, 31));
        only.employee_id = employee;
        let window = DateSpan::new(date(2025, 1, 1), date(2025, 1, 31));

        let map = DailyAllocationMap::build(&[&only], window);
        assert!(!map.is_overallocated(employee, date(2025, 1, 15)));
        assert!(map.overallocated_days(employee).is_empty());
    }

    #[test]
    fn second_concurrent_assignment_trips_the_predicate() {
        let employee = Uuid::new_v4();
        let mut first = assignment(date(2025, 1, 1), date(2025, 1, 31));
        first.employee_id = employee;
        let mut second = assignment(date(2025, 1, 10), date(2025, 1, 20));
        second.employee_id = employee;
        let window = DateSpan::new(date(2025, 1, 1), date(2025, 1, 31));

        let map = DailyAllocationMap::build(&[&first, &second], window);
        assert!(map.is_overallocated(employee, date(2025, 1, 15)));
        assert!(!map.is_overallocated(employee, date(2025, 1, 5)));
        let days = map.overallocated_days(employee);
        assert_eq!(days.len(), 11);
        assert_eq!(days.first(), Some(&date(2025, 1, 10)));
        assert_eq!(days.last(), Some(&date(2025, 1, 20)));
    }

    #[test]
    fn employees_do_not_share_day_entries() {
        let first = assignment(date(2025, 1, 1), date(2025, 1, 31));
        let second = assignment(date(2025, 1, 1), date(2025, 1, 31));
        let window = DateSpan::new(date(2025, 1, 1), date(2025, 1, 31));

        let map = DailyAllocationMap::build(&[&first, &second], window);
        assert!(!map.is_overallocated(first.employee_id, date(2025, 1, 15)));
        assert!(!map.is_overallocated(second.employee_id, date(2025, 1, 15)));
    }
}
