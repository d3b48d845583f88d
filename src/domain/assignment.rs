use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};
use crate::schedule::calendar::DateSpan;

/// Places an employee on a project for an inclusive span of calendar days.
///
/// `start_date <= end_date` is the producer's responsibility; the engine
/// treats a reversed range as an empty span rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub project_id: Uuid,
    pub task: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub non_bill: bool,
}

impl Assignment {
    /// Creates a billable assignment over the given day span.
    pub fn new(
        employee_id: Uuid,
        project_id: Uuid,
        task: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id,
            project_id,
            task: task.into(),
            start_date,
            end_date,
            non_bill: false,
        }
    }

    /// Marks the assignment as non-billable work.
    pub fn non_billable(mut self) -> Self {
        self.non_bill = true;
        self
    }

    /// Inclusive day span this assignment occupies.
    pub fn span(&self) -> DateSpan {
        DateSpan::new(self.start_date, self.end_date)
    }
}

impl Identifiable for Assignment {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Assignment {
    fn display_label(&self) -> String {
        format!("{} ({} ~ {})", self.task, self.start_date, self.end_date)
    }
}
