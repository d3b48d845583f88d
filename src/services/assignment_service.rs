//! Assignment operations linking employees to projects.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::domain::assignment::Assignment;
use crate::domain::snapshot::Snapshot;

use super::{ServiceError, ServiceResult};

/// Validated operations on assignments.
pub struct AssignmentService;

impl AssignmentService {
    /// Records a new assignment after checking both references and the
    /// day span, returning its identifier.
    pub fn assign(snapshot: &mut Snapshot, assignment: Assignment) -> ServiceResult<Uuid> {
        Self::ensure_employee(snapshot, assignment.employee_id)?;
        Self::ensure_project(snapshot, assignment.project_id)?;
        Self::validate_span(assignment.start_date, assignment.end_date)?;
        Ok(snapshot.add_assignment(assignment))
    }

    /// Applies `mutator` to the assignment identified by `id`.
    pub fn update<F>(snapshot: &mut Snapshot, id: Uuid, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Assignment),
    {
        let assignment = snapshot
            .assignment_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Assignment not found".to_string()))?;
        mutator(assignment);
        snapshot.touch();
        Ok(())
    }

    /// Moves an assignment to a new day span.
    pub fn reschedule(
        snapshot: &mut Snapshot,
        id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<()> {
        Self::validate_span(start, end)?;
        Self::update(snapshot, id, |assignment| {
            assignment.start_date = start;
            assignment.end_date = end;
        })
    }

    /// Points an assignment at a different employee and project pair.
    pub fn reassign(
        snapshot: &mut Snapshot,
        id: Uuid,
        employee_id: Uuid,
        project_id: Uuid,
    ) -> ServiceResult<()> {
        Self::ensure_employee(snapshot, employee_id)?;
        Self::ensure_project(snapshot, project_id)?;
        Self::update(snapshot, id, |assignment| {
            assignment.employee_id = employee_id;
            assignment.project_id = project_id;
        })
    }

    /// Replaces the free-form task label.
    pub fn set_task(snapshot: &mut Snapshot, id: Uuid, task: &str) -> ServiceResult<()> {
        let task = task.to_string();
        Self::update(snapshot, id, |assignment| assignment.task = task)
    }

    /// Flags an assignment as non-billable work (or clears the flag).
    pub fn set_non_bill(snapshot: &mut Snapshot, id: Uuid, non_bill: bool) -> ServiceResult<()> {
        Self::update(snapshot, id, |assignment| assignment.non_bill = non_bill)
    }

    /// Removes a single assignment.
    pub fn remove(snapshot: &mut Snapshot, id: Uuid) -> ServiceResult<Assignment> {
        snapshot
            .remove_assignment(id)
            .ok_or_else(|| ServiceError::Invalid("Assignment not found".to_string()))
    }

    /// Removes several assignments at once and returns how many were found.
    pub fn remove_many(snapshot: &mut Snapshot, ids: &[Uuid]) -> usize {
        let wanted: HashSet<Uuid> = ids.iter().copied().collect();
        let before = snapshot.assignments.len();
        snapshot
            .assignments
            .retain(|assignment| !wanted.contains(&assignment.id));
        let removed = before - snapshot.assignments.len();
        if removed > 0 {
            snapshot.touch();
            info!("removed {removed} assignment(s) in bulk");
        }
        removed
    }

    /// Returns all assignments ordered by start date.
    pub fn list(snapshot: &Snapshot) -> Vec<&Assignment> {
        let mut assignments: Vec<&Assignment> = snapshot.assignments.iter().collect();
        assignments.sort_by_key(|assignment| assignment.start_date);
        assignments
    }

    /// Returns the assignments referencing `employee_id`.
    pub fn for_employee(snapshot: &Snapshot, employee_id: Uuid) -> Vec<&Assignment> {
        snapshot.assignments_for_employee(employee_id)
    }

    /// Returns the assignments referencing `project_id`.
    pub fn for_project(snapshot: &Snapshot, project_id: Uuid) -> Vec<&Assignment> {
        snapshot.assignments_for_project(project_id)
    }

    fn ensure_employee(snapshot: &Snapshot, id: Uuid) -> ServiceResult<()> {
        if snapshot.employee(id).is_none() {
            return Err(ServiceError::Invalid(
                "Unknown employee reference".to_string(),
            ));
        }
        Ok(())
    }

    fn ensure_project(snapshot: &Snapshot, id: Uuid) -> ServiceResult<()> {
        if snapshot.project(id).is_none() {
            return Err(ServiceError::Invalid(
                "Unknown project reference".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_span(start: NaiveDate, end: NaiveDate) -> ServiceResult<()> {
        if end < start {
            return Err(ServiceError::Invalid(
                "Assignment end date is before its start date".to_string(),
            ));
        }
        Ok(())
    }
}
