//! Integration tests for the JSON datastore feeding the report layer.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::fs;

use pbl_core::{dashboard, JsonStore, StoreError, Student, Task, TaskStatus, Team};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

#[test]
fn test_handwritten_files_are_readable() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("students.json"),
        r#"[
            {"student_id": "s1", "name": "Aki", "mbti": "ENFJ",
             "skills": {"design": 4.5}, "team_id": "t1",
             "last_active_at": "2024-05-31"},
            {"student_id": "s2", "name": "Ben", "strengths": ["development"],
             "last_contact_at": ""}
        ]"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("tasks.json"),
        r#"[
            {"task_id": "k1", "title": "Mockups", "assignee_id": "s1",
             "difficulty": 4, "estimated_hours": 6, "deadline": "2024-06-03",
             "status": "in_progress", "category": "design"},
            {"task_id": "k2", "title": "API", "assignee_id": "s2",
             "difficulty": 5, "estimated_hours": 12,
             "deadline": "2024-05-30T17:00:00Z", "category": "development"}
        ]"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("teams.json"),
        r#"[{"team_id": "t1", "name": "Alpha", "member_ids": ["s1", "s2"]}]"#,
    )
    .unwrap();

    let store = JsonStore::open(dir.path()).unwrap();
    let snapshot = store.snapshot().unwrap();
    assert_eq!(snapshot.students.len(), 2);
    assert_eq!(snapshot.tasks[1].status, TaskStatus::Pending);
    assert!(snapshot.students[1].last_contact_at.is_none());

    assert_eq!(store.team_of("s2").unwrap().unwrap().team_id, "t1");
    assert_eq!(store.tasks_for("s1").unwrap().len(), 1);
    assert!(store.student("nobody").unwrap().is_none());

    let reports = dashboard(&snapshot, now());
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].student_id, "s2");
    assert_eq!(reports[0].factors.overdue_tasks, 1);
}

#[test]
fn test_save_then_reload_preserves_records() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::open(dir.path().join("data")).unwrap();

    let students = vec![Student::new("s1", "Aki").in_team("t1")];
    let teams = vec![Team::new("t1", "Alpha").with_members(["s1"])];
    store.save_students(&students).unwrap();
    store.save_teams(&teams).unwrap();
    store
        .add_task(
            Task::new("Survey", "Exploration", 2, 4.0, now() + Duration::days(3))
                .assigned_to("s1"),
        )
        .unwrap();

    let reopened = JsonStore::open(store.dir()).unwrap();
    assert_eq!(reopened.students().unwrap(), students);
    assert_eq!(reopened.teams().unwrap(), teams);
    let tasks = reopened.tasks().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].category, "exploration");
    assert!(!dir.path().join("data").join("tasks.json.tmp").exists());
}

#[test]
fn test_malformed_students_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("students.json"), r#"[{"name": "no id"}]"#).unwrap();

    let store = JsonStore::open(dir.path()).unwrap();
    let err = store.snapshot().unwrap_err();
    match err {
        StoreError::Parse { path, .. } => assert!(path.ends_with("students.json")),
        other => panic!("unexpected error: {other}"),
    }
}
