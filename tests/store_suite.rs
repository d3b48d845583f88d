use chrono::NaiveDate;
use staffing_core::{
    domain::{
        assignment::Assignment,
        employee::{Employee, EmployeeType},
        project::Project,
        snapshot::{Snapshot, CURRENT_SCHEMA_VERSION},
    },
    services::{AssignmentService, EmployeeService, ProjectService},
    store::{snapshot_warnings, JsonStore, MemoryStore, SnapshotStore},
};
use tempfile::TempDir;
use uuid::Uuid;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn edits_survive_a_store_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("snapshot.json");

    let mut snapshot = Snapshot::new();
    let employee = EmployeeService::add(
        &mut snapshot,
        Employee::new("Kim", EmployeeType::Billable),
    )
    .expect("employee");
    let project = ProjectService::add(&mut snapshot, Project::new("Atlas")).expect("project");
    let assignment = AssignmentService::assign(
        &mut snapshot,
        Assignment::new(
            employee,
            project,
            "Development",
            date(2025, 1, 1),
            date(2025, 1, 31),
        ),
    )
    .expect("assignment");

    JsonStore::at_path(&path).save(&snapshot).expect("save");

    let loaded = JsonStore::at_path(&path).load().expect("load");
    assert_eq!(loaded.employees.len(), 1);
    assert_eq!(loaded.projects.len(), 1);
    let restored = loaded.assignment(assignment).expect("assignment");
    assert_eq!(restored.employee_id, employee);
    assert_eq!(restored.start_date, date(2025, 1, 1));
    assert_eq!(restored.end_date, date(2025, 1, 31));
}

#[test]
fn revision_counts_saves_on_any_backend() {
    fn save_twice(store: &dyn SnapshotStore) {
        assert_eq!(store.revision(), 0);
        let snapshot = store.load().expect("load");
        store.save(&snapshot).expect("first save");
        store.save(&snapshot).expect("second save");
        assert_eq!(store.revision(), 2);
    }

    let dir = TempDir::new().expect("temp dir");
    save_twice(&JsonStore::at_path(dir.path().join("snapshot.json")));
    save_twice(&MemoryStore::new());
}

#[test]
fn legacy_files_load_with_defaulted_fields() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("snapshot.json");

    let employee_id = Uuid::new_v4();
    let project_id = Uuid::new_v4();
    let assignment_id = Uuid::new_v4();
    let raw = format!(
        r#"{{
  "employees": [{{"id": "{employee_id}", "name": "Kim", "employee_type": "billable"}}],
  "projects": [{{"id": "{project_id}", "name": "Atlas"}}],
  "assignments": [{{
    "id": "{assignment_id}",
    "employee_id": "{employee_id}",
    "project_id": "{project_id}",
    "task": "Development",
    "start_date": "2025-01-01",
    "end_date": "2025-01-31"
  }}],
  "created_at": "2025-01-01T00:00:00Z",
  "updated_at": "2025-01-01T00:00:00Z"
}}"#
    );
    std::fs::write(&path, raw).expect("write");

    let loaded = JsonStore::at_path(&path).load().expect("load");
    assert_eq!(loaded.schema_version, CURRENT_SCHEMA_VERSION);
    assert!(!loaded.projects[0].is_tentative);
    assert!(!loaded.assignments[0].non_bill);
    assert!(snapshot_warnings(&loaded).is_empty());
}

#[test]
fn warnings_surface_dangling_references_after_a_load() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("snapshot.json");

    let project_id = Uuid::new_v4();
    let assignment_id = Uuid::new_v4();
    let ghost = Uuid::new_v4();
    let raw = format!(
        r#"{{
  "employees": [],
  "projects": [{{"id": "{project_id}", "name": "Atlas"}}],
  "assignments": [{{
    "id": "{assignment_id}",
    "employee_id": "{ghost}",
    "project_id": "{project_id}",
    "task": "Development",
    "start_date": "2025-01-01",
    "end_date": "2025-01-31"
  }}],
  "created_at": "2025-01-01T00:00:00Z",
  "updated_at": "2025-01-01T00:00:00Z"
}}"#
    );
    std::fs::write(&path, raw).expect("write");

    let loaded = JsonStore::at_path(&path).load().expect("load");
    let warnings = snapshot_warnings(&loaded);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("unknown employee"));
    assert!(warnings[0].contains(&ghost.to_string()));
}
