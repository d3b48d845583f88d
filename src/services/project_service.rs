//! Project catalogue operations.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::domain::common::{sort_by_name, Displayable};
use crate::domain::project::Project;
use crate::domain::snapshot::Snapshot;

use super::{ServiceError, ServiceResult};

/// Projects split by whether any assignment currently references them.
#[derive(Debug, Clone)]
pub struct ProjectStatus<'a> {
    pub active: Vec<&'a Project>,
    pub idle: Vec<&'a Project>,
}

/// Validated operations on the project catalogue.
pub struct ProjectService;

impl ProjectService {
    /// Adds a new project and returns its identifier.
    pub fn add(snapshot: &mut Snapshot, project: Project) -> ServiceResult<Uuid> {
        Self::validate_name(&project.name)?;
        Self::validate_span(project.start_date, project.end_date)?;
        Ok(snapshot.add_project(project))
    }

    /// Applies `mutator` to the project identified by `id`.
    pub fn update<F>(snapshot: &mut Snapshot, id: Uuid, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Project),
    {
        let project = snapshot
            .project_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Project not found".to_string()))?;
        mutator(project);
        snapshot.touch();
        Ok(())
    }

    /// Renames a project.
    pub fn rename(snapshot: &mut Snapshot, id: Uuid, name: &str) -> ServiceResult<()> {
        Self::validate_name(name)?;
        let trimmed = name.trim().to_string();
        Self::update(snapshot, id, |project| project.name = trimmed)
    }

    /// Marks a project as tentative or confirmed.
    pub fn set_tentative(snapshot: &mut Snapshot, id: Uuid, tentative: bool) -> ServiceResult<()> {
        Self::update(snapshot, id, |project| project.is_tentative = tentative)
    }

    /// Replaces the planned date range. Either bound may be left open.
    pub fn set_span(
        snapshot: &mut Snapshot,
        id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> ServiceResult<()> {
        Self::validate_span(start, end)?;
        Self::update(snapshot, id, |project| {
            project.start_date = start;
            project.end_date = end;
        })
    }

    /// Removes a project along with every assignment that references it.
    pub fn remove(snapshot: &mut Snapshot, id: Uuid) -> ServiceResult<Project> {
        if snapshot.project(id).is_none() {
            return Err(ServiceError::Invalid("Project not found".to_string()));
        }
        let dropped = snapshot.remove_assignments_for_project(id);
        let project = snapshot
            .remove_project(id)
            .ok_or_else(|| ServiceError::Invalid("Project not found".to_string()))?;
        if dropped > 0 {
            info!(
                "{} removed along with {} assignment(s)",
                project.display_label(),
                dropped
            );
        }
        Ok(project)
    }

    /// Returns the catalogue ordered by name.
    pub fn list(snapshot: &Snapshot) -> Vec<&Project> {
        let mut projects: Vec<&Project> = snapshot.projects.iter().collect();
        sort_by_name(&mut projects);
        projects
    }

    /// Splits projects into staffed and idle sets.
    pub fn status(snapshot: &Snapshot) -> ProjectStatus<'_> {
        let assigned: HashSet<Uuid> = snapshot
            .assignments
            .iter()
            .map(|assignment| assignment.project_id)
            .collect();
        let (active, idle) = snapshot
            .projects
            .iter()
            .partition(|project| assigned.contains(&project.id));
        ProjectStatus { active, idle }
    }

    fn validate_name(candidate: &str) -> ServiceResult<()> {
        if candidate.trim().is_empty() {
            return Err(ServiceError::Invalid("Project name is required".to_string()));
        }
        Ok(())
    }

    fn validate_span(start: Option<NaiveDate>, end: Option<NaiveDate>) -> ServiceResult<()> {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(ServiceError::Invalid(
                    "Project end date is before its start date".to_string(),
                ));
            }
        }
        Ok(())
    }
}
