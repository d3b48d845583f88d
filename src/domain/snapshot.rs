use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    assignment::Assignment,
    common::{find_by_id, find_by_id_mut},
    employee::Employee,
    project::Project,
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The wholesale staffing dataset: every record travels together.
///
/// All derived views recompute from a full snapshot; nothing patches prior
/// results incrementally. Stores replace the snapshot as a unit on save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Snapshot::schema_version_default")]
    pub schema_version: u8,
}

impl Snapshot {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            employees: Vec::new(),
            projects: Vec::new(),
            assignments: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_employee(&mut self, employee: Employee) -> Uuid {
        let id = employee.id;
        self.employees.push(employee);
        self.touch();
        id
    }

    pub fn add_project(&mut self, project: Project) -> Uuid {
        let id = project.id;
        self.projects.push(project);
        self.touch();
        id
    }

    pub fn add_assignment(&mut self, assignment: Assignment) -> Uuid {
        let id = assignment.id;
        self.assignments.push(assignment);
        self.touch();
        id
    }

    pub fn employee(&self, id: Uuid) -> Option<&Employee> {
        find_by_id(&self.employees, id)
    }

    pub fn employee_mut(&mut self, id: Uuid) -> Option<&mut Employee> {
        find_by_id_mut(&mut self.employees, id)
    }

    pub fn project(&self, id: Uuid) -> Option<&Project> {
        find_by_id(&self.projects, id)
    }

    pub fn project_mut(&mut self, id: Uuid) -> Option<&mut Project> {
        find_by_id_mut(&mut self.projects, id)
    }

    pub fn assignment(&self, id: Uuid) -> Option<&Assignment> {
        find_by_id(&self.assignments, id)
    }

    pub fn assignment_mut(&mut self, id: Uuid) -> Option<&mut Assignment> {
        find_by_id_mut(&mut self.assignments, id)
    }

    pub fn remove_employee(&mut self, id: Uuid) -> Option<Employee> {
        let index = self.employees.iter().position(|employee| employee.id == id)?;
        let removed = self.employees.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn remove_project(&mut self, id: Uuid) -> Option<Project> {
        let index = self.projects.iter().position(|project| project.id == id)?;
        let removed = self.projects.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn remove_assignment(&mut self, id: Uuid) -> Option<Assignment> {
        let index = self
            .assignments
            .iter()
            .position(|assignment| assignment.id == id)?;
        let removed = self.assignments.remove(index);
        self.touch();
        Some(removed)
    }

    /// Drops every assignment referencing the employee, returning the count.
    pub fn remove_assignments_for_employee(&mut self, employee_id: Uuid) -> usize {
        let before = self.assignments.len();
        self.assignments
            .retain(|assignment| assignment.employee_id != employee_id);
        let removed = before - self.assignments.len();
        if removed > 0 {
            self.touch();
        }
        removed
    }

    /// Drops every assignment referencing the project, returning the count.
    pub fn remove_assignments_for_project(&mut self, project_id: Uuid) -> usize {
        let before = self.assignments.len();
        self.assignments
            .retain(|assignment| assignment.project_id != project_id);
        let removed = before - self.assignments.len();
        if removed > 0 {
            self.touch();
        }
        removed
    }

    pub fn assignments_for_employee(&self, employee_id: Uuid) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|assignment| assignment.employee_id == employee_id)
            .collect()
    }

    pub fn assignments_for_project(&self, project_id: Uuid) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|assignment| assignment.project_id == project_id)
            .collect()
    }

    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}
