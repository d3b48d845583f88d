pub mod assignment;
pub mod common;
pub mod employee;
pub mod project;
pub mod snapshot;

pub use assignment::Assignment;
pub use common::{Displayable, Identifiable, NamedEntity};
pub use employee::{Employee, EmployeeType};
pub use project::Project;
pub use snapshot::Snapshot;
