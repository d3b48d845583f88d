//! Year-level utilization reporting against staffing capacity.
//!
//! Every assignment lands in at most one of three buckets. The rules are an
//! ordered list evaluated top-down, which keeps the mutual-exclusivity
//! property auditable on its own instead of being buried in nested branches.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{
    assignment::Assignment,
    employee::{Employee, EmployeeType},
    project::Project,
    snapshot::Snapshot,
};

use super::{
    allocation::exact_allocation,
    calendar::DateSpan,
};

/// Utilization bucket an assignment can contribute to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilizationCategory {
    Billable,
    NonBillable,
    Tentative,
}

impl UtilizationCategory {
    pub fn label(&self) -> &'static str {
        match self {
            UtilizationCategory::Billable => "Billable",
            UtilizationCategory::NonBillable => "Non-billable",
            UtilizationCategory::Tentative => "Tentative",
        }
    }
}

/// One priority-ordered bucketing rule.
pub struct ClassificationRule {
    pub category: UtilizationCategory,
    pub applies: fn(&Employee, &Project, &Assignment) -> bool,
}

/// The bucketing rules, highest priority first.
///
/// Tentative projects dominate the assignment's own billing flag, and only
/// billable employees can fill the tentative and non-billable buckets. The
/// billable bucket additionally admits internal employees on confirmed
/// billable work. Anything that matches no rule counts toward no bucket.
pub fn classification_rules() -> [ClassificationRule; 3] {
    [
        ClassificationRule {
            category: UtilizationCategory::Tentative,
            applies: |employee, project, _| {
                project.is_tentative && employee.employee_type == EmployeeType::Billable
            },
        },
        ClassificationRule {
            category: UtilizationCategory::NonBillable,
            applies: |employee, project, assignment| {
                !project.is_tentative
                    && assignment.non_bill
                    && employee.employee_type == EmployeeType::Billable
            },
        },
        ClassificationRule {
            category: UtilizationCategory::Billable,
            applies: |employee, project, assignment| {
                !project.is_tentative
                    && !assignment.non_bill
                    && matches!(
                        employee.employee_type,
                        EmployeeType::Billable | EmployeeType::Internal
                    )
            },
        },
    ]
}

/// Bucket for one assignment, or `None` when it counts toward none.
pub fn classify(
    employee: &Employee,
    project: &Project,
    assignment: &Assignment,
) -> Option<UtilizationCategory> {
    classification_rules()
        .iter()
        .find(|rule| (rule.applies)(employee, project, assignment))
        .map(|rule| rule.category)
}

/// Utilization totals for one calendar year.
#[derive(Debug, Clone, PartialEq)]
pub struct UtilizationSnapshot {
    pub year: i32,
    pub billable_headcount: usize,
    /// Person-months available: 12 per billable employee.
    pub capacity_mm: f64,
    pub billable_mm: f64,
    pub non_billable_mm: f64,
    pub tentative_mm: f64,
}

impl UtilizationSnapshot {
    pub fn category_mm(&self, category: UtilizationCategory) -> f64 {
        match category {
            UtilizationCategory::Billable => self.billable_mm,
            UtilizationCategory::NonBillable => self.non_billable_mm,
            UtilizationCategory::Tentative => self.tentative_mm,
        }
    }

    pub fn billable_pct(&self) -> f64 {
        self.pct(self.billable_mm)
    }

    pub fn non_billable_pct(&self) -> f64 {
        self.pct(self.non_billable_mm)
    }

    pub fn tentative_pct(&self) -> f64 {
        self.pct(self.tentative_mm)
    }

    /// Sum of the three category percentages.
    pub fn total_pct(&self) -> f64 {
        self.billable_pct() + self.non_billable_pct() + self.tentative_pct()
    }

    fn pct(&self, amount: f64) -> f64 {
        if self.capacity_mm == 0.0 {
            0.0
        } else {
            amount / self.capacity_mm * 100.0
        }
    }
}

/// Classifies every assignment against `year` and sums per-category amounts.
///
/// Assignments with unresolved employee or project references are skipped;
/// data integrity is the store's concern and reported through
/// [`crate::store::snapshot_warnings`] instead of failing the computation.
pub fn compute_utilization(snapshot: &Snapshot, year: i32) -> UtilizationSnapshot {
    let window = year_span(year);
    let billable_headcount = snapshot
        .employees
        .iter()
        .filter(|employee| employee.employee_type == EmployeeType::Billable)
        .count();

    let mut billable_mm = 0.0;
    let mut non_billable_mm = 0.0;
    let mut tentative_mm = 0.0;

    for assignment in &snapshot.assignments {
        let employee = match snapshot.employee(assignment.employee_id) {
            Some(employee) => employee,
            None => continue,
        };
        let project = match snapshot.project(assignment.project_id) {
            Some(project) => project,
            None => continue,
        };
        let amount = exact_allocation(assignment, window);
        match classify(employee, project, assignment) {
            Some(UtilizationCategory::Billable) => billable_mm += amount,
            Some(UtilizationCategory::NonBillable) => non_billable_mm += amount,
            Some(UtilizationCategory::Tentative) => tentative_mm += amount,
            None => {}
        }
    }

    UtilizationSnapshot {
        year,
        billable_headcount,
        capacity_mm: billable_headcount as f64 * 12.0,
        billable_mm,
        non_billable_mm,
        tentative_mm,
    }
}

/// One assignment's contribution line inside a drill-down group.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownItem {
    pub employee_name: String,
    pub span: DateSpan,
    pub amount_mm: f64,
}

impl BreakdownItem {
    /// Compact `MM.DD~MM.DD` span label.
    pub fn span_label(&self) -> String {
        format!(
            "{}~{}",
            self.span.start.format("%m.%d"),
            self.span.end.format("%m.%d")
        )
    }
}

/// Contribution lines for one project, employee-name ordered.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectGroup {
    pub project_name: String,
    pub items: Vec<BreakdownItem>,
}

impl ProjectGroup {
    pub fn total_mm(&self) -> f64 {
        self.items.iter().map(|item| item.amount_mm).sum()
    }
}

/// Per-project listing of the assignments behind one utilization bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub category: UtilizationCategory,
    pub year: i32,
    /// Groups ordered by project name.
    pub groups: Vec<ProjectGroup>,
}

impl CategoryBreakdown {
    pub fn total_mm(&self) -> f64 {
        self.groups.iter().map(ProjectGroup::total_mm).sum()
    }
}

/// Re-runs the classification for `category` and groups the survivors.
///
/// Zero-contribution assignments are dropped, items inside a group are
/// ordered by employee name, and groups by project name.
pub fn drill_down(snapshot: &Snapshot, year: i32, category: UtilizationCategory) -> CategoryBreakdown {
    let window = year_span(year);
    let mut grouped: BTreeMap<String, Vec<BreakdownItem>> = BTreeMap::new();

    for assignment in &snapshot.assignments {
        let employee = match snapshot.employee(assignment.employee_id) {
            Some(employee) => employee,
            None => continue,
        };
        let project = match snapshot.project(assignment.project_id) {
            Some(project) => project,
            None => continue,
        };
        if classify(employee, project, assignment) != Some(category) {
            continue;
        }
        let amount = exact_allocation(assignment, window);
        if amount <= 0.0 {
            continue;
        }
        grouped
            .entry(project.name.clone())
            .or_default()
            .push(BreakdownItem {
                employee_name: employee.name.clone(),
                span: assignment.span(),
                amount_mm: amount,
            });
    }

    let groups = grouped
        .into_iter()
        .map(|(project_name, mut items)| {
            items.sort_by(|a, b| a.employee_name.cmp(&b.employee_name));
            ProjectGroup {
                project_name,
                items,
            }
        })
        .collect();

    CategoryBreakdown {
        category,
        year,
        groups,
    }
}

fn year_span(year: i32) -> DateSpan {
    DateSpan::new(
        NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(year, 12, 31).unwrap(),
    )
}
