pub mod assignment_service;
pub mod employee_service;
pub mod project_service;

pub use assignment_service::AssignmentService;
pub use employee_service::{DirectoryStats, EmployeeService};
pub use project_service::{ProjectService, ProjectStatus};

use crate::errors::StaffingError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Staffing(#[from] StaffingError),
    #[error("{0}")]
    Invalid(String),
}
