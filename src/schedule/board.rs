//! Row model for the staffing board, minus any rendering concerns.

use uuid::Uuid;

use crate::domain::{
    assignment::Assignment, common::sort_by_name, project::Project, snapshot::Snapshot,
};

use super::{allocation::exact_allocation, calendar::DateSpan, period::Period};

/// Axis the board rows are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowGrouping {
    Project,
    Employee,
}

/// One row of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub id: Uuid,
    pub name: String,
    pub grouping: RowGrouping,
}

/// Rows for the requested grouping.
///
/// Project rows are name-ordered; employee rows order by staffing type
/// (billable first, then internal, other-unit, outsourced) and name within a
/// type.
pub fn display_rows(snapshot: &Snapshot, grouping: RowGrouping) -> Vec<DisplayRow> {
    match grouping {
        RowGrouping::Project => {
            let mut projects: Vec<&Project> = snapshot.projects.iter().collect();
            sort_by_name(&mut projects);
            projects
                .into_iter()
                .map(|project| DisplayRow {
                    id: project.id,
                    name: project.name.clone(),
                    grouping,
                })
                .collect()
        }
        RowGrouping::Employee => {
            let mut employees: Vec<_> = snapshot.employees.iter().collect();
            employees.sort_by(|a, b| {
                a.employee_type
                    .sort_priority()
                    .cmp(&b.employee_type.sort_priority())
                    .then_with(|| a.name.cmp(&b.name))
            });
            employees
                .into_iter()
                .map(|employee| DisplayRow {
                    id: employee.id,
                    name: employee.name.clone(),
                    grouping,
                })
                .collect()
        }
    }
}

/// The row's assignments touching `period`, start-date ordered.
pub fn row_assignments<'a>(
    snapshot: &'a Snapshot,
    row: &DisplayRow,
    period: &Period,
) -> Vec<&'a Assignment> {
    let mut matching: Vec<&Assignment> = snapshot
        .assignments
        .iter()
        .filter(|assignment| match row.grouping {
            RowGrouping::Project => assignment.project_id == row.id,
            RowGrouping::Employee => assignment.employee_id == row.id,
        })
        .filter(|assignment| assignment.span().overlaps(period.span))
        .collect();
    matching.sort_by_key(|assignment| assignment.start_date);
    matching
}

/// Billable versus non-billable person-month split for one row and window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RowTotals {
    pub billable_mm: f64,
    pub non_billable_mm: f64,
}

impl RowTotals {
    /// Splits each assignment's window contribution by its billing flag.
    pub fn for_assignments(assignments: &[&Assignment], window: DateSpan) -> Self {
        let mut totals = RowTotals::default();
        for assignment in assignments {
            let amount = exact_allocation(assignment, window);
            if assignment.non_bill {
                totals.non_billable_mm += amount;
            } else {
                totals.billable_mm += amount;
            }
        }
        totals
    }

    pub fn total_mm(&self) -> f64 {
        self.billable_mm + self.non_billable_mm
    }
}

/// Visual class of one assignment bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentKind {
    Billable,
    NonBillable,
    Tentative,
}

impl AssignmentKind {
    /// A tentative project dominates; otherwise the billing flag decides.
    ///
    /// This is the bar's visual class only. Bucket eligibility for
    /// utilization additionally gates on the employee's type and lives in
    /// [`super::utilization::classify`].
    pub fn of(assignment: &Assignment, project: Option<&Project>) -> Self {
        match project {
            Some(project) if project.is_tentative => AssignmentKind::Tentative,
            _ if assignment.non_bill => AssignmentKind::NonBillable,
            _ => AssignmentKind::Billable,
        }
    }
}
