//! Snapshot persistence backends.

pub mod json_backend;
pub mod memory;

pub use json_backend::JsonStore;
pub use memory::MemoryStore;

use std::collections::HashSet;

use uuid::Uuid;

use crate::domain::snapshot::Snapshot;
use crate::errors::StaffingError;

pub type Result<T> = std::result::Result<T, StaffingError>;

/// Persistence contract for the staffing snapshot.
///
/// Implementations load and replace the snapshot as a whole unit and keep a
/// revision counter that bumps on every successful save, so callers can
/// cheaply detect that cached views are stale.
pub trait SnapshotStore: Send + Sync {
    /// Loads the current snapshot.
    fn load(&self) -> Result<Snapshot>;

    /// Replaces the stored snapshot.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;

    /// Returns the revision counter.
    fn revision(&self) -> u64;
}

/// Scans a snapshot for referential problems worth reporting after a load.
///
/// Dangling references never fail a computation; views skip them silently.
/// This lists them so callers can surface what is being ignored.
pub fn snapshot_warnings(snapshot: &Snapshot) -> Vec<String> {
    let employee_ids: HashSet<Uuid> = snapshot
        .employees
        .iter()
        .map(|employee| employee.id)
        .collect();
    let project_ids: HashSet<Uuid> = snapshot.projects.iter().map(|project| project.id).collect();

    let mut warnings = Vec::new();
    for assignment in &snapshot.assignments {
        if !employee_ids.contains(&assignment.employee_id) {
            warnings.push(format!(
                "assignment {} references unknown employee {}",
                assignment.id, assignment.employee_id
            ));
        }
        if !project_ids.contains(&assignment.project_id) {
            warnings.push(format!(
                "assignment {} references unknown project {}",
                assignment.id, assignment.project_id
            ));
        }
        if assignment.end_date < assignment.start_date {
            warnings.push(format!(
                "assignment {} has an end date before its start date",
                assignment.id
            ));
        }
    }
    for project in &snapshot.projects {
        if let (Some(start), Some(end)) = (project.start_date, project.end_date) {
            if end < start {
                warnings.push(format!(
                    "project `{}` has an end date before its start date",
                    project.name
                ));
            }
        }
    }
    warnings
}
