//! JSON-file datastore.
//!
//! Layout of the data directory:
//!
//! ```text
//! students.json   [Student, ...]
//! tasks.json      [Task, ...]
//! teams.json      [Team, ...]
//! ```
//!
//! A missing file reads as an empty list. Writes go to a temporary file
//! first and are renamed into place.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CoreError, StoreError};
use crate::model::{Student, Task, TaskStatus, Team};
use crate::report::Snapshot;

pub const STUDENTS_FILE: &str = "students.json";
pub const TASKS_FILE: &str = "tasks.json";
pub const TEAMS_FILE: &str = "teams.json";

/// Outcome of merging records into the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertSummary {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
}

/// Datastore backed by a directory of JSON files.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open (and create if needed) a data directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Write {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_list<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, StoreError> {
        let path = self.dir.join(file);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "data file missing; treating as empty");
                return Ok(Vec::new());
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|source| StoreError::Parse { path, source })
    }

    fn write_list<T: Serialize>(&self, file: &str, items: &[T]) -> Result<(), StoreError> {
        let path = self.dir.join(file);
        let content = serde_json::to_string_pretty(items).map_err(|source| StoreError::Encode {
            path: path.clone(),
            source,
        })?;
        let tmp = self.dir.join(format!("{file}.tmp"));
        std::fs::write(&tmp, content).map_err(|source| StoreError::Write {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| StoreError::Write { path, source })?;
        debug!(file, records = items.len(), "wrote data file");
        Ok(())
    }

    pub fn students(&self) -> Result<Vec<Student>, StoreError> {
        self.read_list(STUDENTS_FILE)
    }

    pub fn tasks(&self) -> Result<Vec<Task>, StoreError> {
        self.read_list(TASKS_FILE)
    }

    pub fn teams(&self) -> Result<Vec<Team>, StoreError> {
        self.read_list(TEAMS_FILE)
    }

    pub fn save_students(&self, students: &[Student]) -> Result<(), StoreError> {
        self.write_list(STUDENTS_FILE, students)
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<(), StoreError> {
        self.write_list(TASKS_FILE, tasks)
    }

    pub fn save_teams(&self, teams: &[Team]) -> Result<(), StoreError> {
        self.write_list(TEAMS_FILE, teams)
    }

    /// Read all three files at once.
    pub fn snapshot(&self) -> Result<Snapshot, StoreError> {
        Ok(Snapshot {
            students: self.students()?,
            tasks: self.tasks()?,
            teams: self.teams()?,
        })
    }

    pub fn student(&self, student_id: &str) -> Result<Option<Student>, StoreError> {
        Ok(self
            .students()?
            .into_iter()
            .find(|s| s.student_id == student_id))
    }

    pub fn tasks_for(&self, student_id: &str) -> Result<Vec<Task>, StoreError> {
        Ok(self
            .tasks()?
            .into_iter()
            .filter(|t| t.assignee_id.as_deref() == Some(student_id))
            .collect())
    }

    pub fn team_of(&self, student_id: &str) -> Result<Option<Team>, StoreError> {
        let snapshot = self.snapshot()?;
        Ok(snapshot
            .student(student_id)
            .and_then(|s| snapshot.team_of(s))
            .cloned())
    }

    /// Merge students by id.
    ///
    /// Local-only fields (activity timestamps, team) survive when the
    /// incoming record leaves them empty.
    pub fn upsert_students(&self, incoming: Vec<Student>) -> Result<UpsertSummary, StoreError> {
        let mut students = self.students()?;
        let mut summary = UpsertSummary::default();

        for mut student in incoming {
            match students
                .iter_mut()
                .find(|s| s.student_id == student.student_id)
            {
                Some(existing) => {
                    if student.last_active_at.is_none() {
                        student.last_active_at = existing.last_active_at;
                    }
                    if student.last_contact_at.is_none() {
                        student.last_contact_at = existing.last_contact_at;
                    }
                    if student.team_id.is_none() {
                        student.team_id = existing.team_id.clone();
                    }
                    if *existing == student {
                        summary.unchanged += 1;
                    } else {
                        *existing = student;
                        summary.updated += 1;
                    }
                }
                None => {
                    students.push(student);
                    summary.inserted += 1;
                }
            }
        }

        self.save_students(&students)?;
        Ok(summary)
    }

    /// Append a task.
    pub fn add_task(&self, task: Task) -> Result<(), StoreError> {
        let mut tasks = self.tasks()?;
        tasks.push(task);
        self.save_tasks(&tasks)
    }

    /// Change a task's status, returning the updated task.
    pub fn set_task_status(&self, task_id: &str, status: TaskStatus) -> Result<Task, CoreError> {
        let mut tasks = self.tasks()?;
        let task = tasks
            .iter_mut()
            .find(|t| t.task_id == task_id)
            .ok_or_else(|| CoreError::NotFound {
                kind: "task",
                id: task_id.to_string(),
            })?;
        task.status = status;
        let updated = task.clone();
        self.save_tasks(&tasks)?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn store() -> (tempfile::TempDir, JsonStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn missing_files_read_as_empty() {
        let (_dir, store) = store();
        assert!(store.students().unwrap().is_empty());
        assert!(store.tasks().unwrap().is_empty());
        assert!(store.teams().unwrap().is_empty());
    }

    #[test]
    fn malformed_file_names_path() {
        let (dir, store) = store();
        std::fs::write(dir.path().join(TASKS_FILE), "{not json").unwrap();
        let err = store.tasks().unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
        assert!(err.to_string().contains(TASKS_FILE));
    }

    #[test]
    fn set_task_status_persists() {
        let (_dir, store) = store();
        let due = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let task = Task::new("Draft", "planning", 2, 3.0, due).assigned_to("s1");
        let id = task.task_id.clone();
        store.add_task(task).unwrap();

        let updated = store.set_task_status(&id, TaskStatus::Completed).unwrap();
        assert_eq!(updated.status, TaskStatus::Completed);
        assert_eq!(store.tasks_for("s1").unwrap()[0].status, TaskStatus::Completed);

        let err = store.set_task_status("nope", TaskStatus::Pending).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { kind: "task", .. }));
    }

    #[test]
    fn upsert_keeps_local_only_fields() {
        let (_dir, store) = store();
        let seen = Utc.with_ymd_and_hms(2024, 5, 30, 0, 0, 0).unwrap();
        let mut local = Student::new("s1", "Aki").in_team("t1");
        local.last_active_at = Some(seen);
        store.save_students(&[local]).unwrap();

        let summary = store
            .upsert_students(vec![
                Student::new("s1", "Aki Tanaka"),
                Student::new("s2", "Ben"),
            ])
            .unwrap();
        assert_eq!(
            summary,
            UpsertSummary {
                inserted: 1,
                updated: 1,
                unchanged: 0
            }
        );

        let s1 = store.student("s1").unwrap().unwrap();
        assert_eq!(s1.name, "Aki Tanaka");
        assert_eq!(s1.last_active_at, Some(seen));
        assert_eq!(s1.team_id.as_deref(), Some("t1"));

        let again = store.upsert_students(vec![Student::new("s2", "Ben")]).unwrap();
        assert_eq!(again.unchanged, 1);
    }
}
