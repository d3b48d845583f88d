//! Employee directory operations.

use chrono::{Datelike, NaiveDate};
use tracing::info;
use uuid::Uuid;

use crate::domain::common::{sort_by_name, Displayable};
use crate::domain::employee::{Employee, EmployeeType};
use crate::domain::snapshot::Snapshot;

use super::{ServiceError, ServiceResult};

/// Headline numbers shown alongside the employee directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryStats {
    pub headcount: usize,
    /// Names of employees whose birthday falls in the current month.
    pub birthday_names: Vec<String>,
    pub certification_holders: usize,
    pub language_speakers: usize,
}

/// Validated operations on the employee roster.
pub struct EmployeeService;

impl EmployeeService {
    /// Adds a new employee and returns its identifier.
    pub fn add(snapshot: &mut Snapshot, employee: Employee) -> ServiceResult<Uuid> {
        Self::validate_name(&employee.name)?;
        Ok(snapshot.add_employee(employee))
    }

    /// Applies `mutator` to the employee identified by `id`.
    pub fn update<F>(snapshot: &mut Snapshot, id: Uuid, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Employee),
    {
        let employee = snapshot
            .employee_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Employee not found".to_string()))?;
        mutator(employee);
        snapshot.touch();
        Ok(())
    }

    /// Renames an employee.
    pub fn rename(snapshot: &mut Snapshot, id: Uuid, name: &str) -> ServiceResult<()> {
        Self::validate_name(name)?;
        let trimmed = name.trim().to_string();
        Self::update(snapshot, id, |employee| employee.name = trimmed)
    }

    /// Sets the employee type directly.
    pub fn set_type(
        snapshot: &mut Snapshot,
        id: Uuid,
        employee_type: EmployeeType,
    ) -> ServiceResult<()> {
        Self::update(snapshot, id, |employee| {
            employee.employee_type = employee_type;
        })
    }

    /// Advances the employee type one step around the admin toggle cycle
    /// and returns the new value.
    pub fn cycle_type(snapshot: &mut Snapshot, id: Uuid) -> ServiceResult<EmployeeType> {
        let employee = snapshot
            .employee_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Employee not found".to_string()))?;
        employee.employee_type = employee.employee_type.next();
        let current = employee.employee_type;
        snapshot.touch();
        Ok(current)
    }

    /// Removes an employee along with every assignment that references them.
    pub fn remove(snapshot: &mut Snapshot, id: Uuid) -> ServiceResult<Employee> {
        if snapshot.employee(id).is_none() {
            return Err(ServiceError::Invalid("Employee not found".to_string()));
        }
        let dropped = snapshot.remove_assignments_for_employee(id);
        let employee = snapshot
            .remove_employee(id)
            .ok_or_else(|| ServiceError::Invalid("Employee not found".to_string()))?;
        if dropped > 0 {
            info!(
                "{} removed along with {} assignment(s)",
                employee.display_label(),
                dropped
            );
        }
        Ok(employee)
    }

    /// Returns the roster ordered by name.
    pub fn list(snapshot: &Snapshot) -> Vec<&Employee> {
        let mut employees: Vec<&Employee> = snapshot.employees.iter().collect();
        sort_by_name(&mut employees);
        employees
    }

    /// Computes directory statistics relative to `today`.
    pub fn directory_stats(snapshot: &Snapshot, today: NaiveDate) -> DirectoryStats {
        let birthday_names = snapshot
            .employees
            .iter()
            .filter(|employee| {
                employee
                    .birth_date
                    .is_some_and(|birth| birth.month() == today.month())
            })
            .map(|employee| employee.name.clone())
            .collect();
        let certification_holders = snapshot
            .employees
            .iter()
            .filter(|employee| !employee.certifications.is_empty())
            .count();
        let language_speakers = snapshot
            .employees
            .iter()
            .filter(|employee| !employee.languages.is_empty())
            .count();
        DirectoryStats {
            headcount: snapshot.employees.len(),
            birthday_names,
            certification_holders,
            language_speakers,
        }
    }

    fn validate_name(candidate: &str) -> ServiceResult<()> {
        if candidate.trim().is_empty() {
            return Err(ServiceError::Invalid(
                "Employee name is required".to_string(),
            ));
        }
        Ok(())
    }
}
