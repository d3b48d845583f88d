use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// An engagement that assignments attach to.
///
/// The optional span is informational and never authoritative over the
/// assignments' own dates. A tentative project reclassifies every one of its
/// assignments into the tentative utilization bucket regardless of each
/// assignment's billing flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub is_tentative: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solutions: Option<String>,
}

impl Project {
    /// Creates a confirmed project with no informational span.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_tentative: false,
            start_date: None,
            end_date: None,
            solutions: None,
        }
    }

    /// Creates a project still awaiting confirmation.
    pub fn tentative(name: impl Into<String>) -> Self {
        let mut project = Self::new(name);
        project.is_tentative = true;
        project
    }

    pub fn with_span(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self.end_date = Some(end_date);
        self
    }
}

impl Identifiable for Project {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Project {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Project {
    fn display_label(&self) -> String {
        if self.is_tentative {
            format!("{} (tentative)", self.name)
        } else {
            self.name.clone()
        }
    }
}
