use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A person who can be placed on projects for spans of days.
///
/// The staffing type drives capacity counting, utilization eligibility, and
/// board row ordering. The HR fields are carried for directory views and
/// never consulted by the allocation engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub employee_type: EmployeeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certifications: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
}

impl Employee {
    /// Creates a new employee of the given staffing type.
    pub fn new(name: impl Into<String>, employee_type: EmployeeType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            employee_type,
            job_title: None,
            phone: None,
            address: None,
            birth_date: None,
            join_date: None,
            skills: Vec::new(),
            certifications: Vec::new(),
            languages: Vec::new(),
        }
    }

    pub fn with_job_title(mut self, job_title: impl Into<String>) -> Self {
        self.job_title = Some(job_title.into());
        self
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }
}

impl Identifiable for Employee {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Employee {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Employee {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.employee_type.label())
    }
}

/// Staffing classification of an employee.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeType {
    #[default]
    Billable,
    Internal,
    OtherUnit,
    Outsourcing,
}

impl EmployeeType {
    /// Board row ordering: billable staff sort first.
    pub fn sort_priority(&self) -> u8 {
        match self {
            EmployeeType::Billable => 1,
            EmployeeType::Internal => 2,
            EmployeeType::OtherUnit => 3,
            EmployeeType::Outsourcing => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmployeeType::Billable => "Billable",
            EmployeeType::Internal => "Internal",
            EmployeeType::OtherUnit => "Other unit",
            EmployeeType::Outsourcing => "Outsourcing",
        }
    }

    /// Next type in the admin toggle cycle.
    pub fn next(&self) -> Self {
        match self {
            EmployeeType::Billable => EmployeeType::Internal,
            EmployeeType::Internal => EmployeeType::OtherUnit,
            EmployeeType::OtherUnit => EmployeeType::Outsourcing,
            EmployeeType::Outsourcing => EmployeeType::Billable,
        }
    }
}
