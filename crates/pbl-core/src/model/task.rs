//! Project tasks assigned to students.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task progress status.
///
/// Only `Completed` removes a task from the active set; pending and
/// in-progress tasks both count toward load.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started yet (initial state)
    #[default]
    Pending,
    /// Being worked on
    InProgress,
    /// Done
    Completed,
}

impl TaskStatus {
    /// Whether a task in this status still counts as active work.
    pub fn is_active(&self) -> bool {
        !matches!(self, TaskStatus::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            other => Err(format!(
                "unknown task status '{other}' (expected pending, in_progress or completed)"
            )),
        }
    }
}

/// A unit of project work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub task_id: String,
    /// Task title
    pub title: String,
    /// Student the task is assigned to
    #[serde(default)]
    pub assignee_id: Option<String>,
    /// Difficulty on a 1-5 scale
    pub difficulty: u8,
    /// Estimated effort in hours
    pub estimated_hours: f64,
    /// Due timestamp; bare dates are read as midnight UTC
    #[serde(deserialize_with = "super::datetime::deserialize")]
    pub deadline: DateTime<Utc>,
    /// Progress status
    #[serde(default)]
    pub status: TaskStatus,
    /// Work category (planning, design, development, ...), lowercase
    #[serde(deserialize_with = "deserialize_category")]
    pub category: String,
}

/// Canonical form of a category name: trimmed, lowercase.
pub fn normalize_category(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn deserialize_category<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_category(&raw))
}

impl Task {
    /// Create a pending task with a generated id.
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        difficulty: u8,
        estimated_hours: f64,
        deadline: DateTime<Utc>,
    ) -> Self {
        Task {
            task_id: format!("task-{}", uuid::Uuid::new_v4()),
            title: title.into(),
            assignee_id: None,
            difficulty: difficulty.clamp(1, 5),
            estimated_hours: estimated_hours.max(0.0),
            deadline,
            status: TaskStatus::Pending,
            category: normalize_category(&category.into()),
        }
    }

    /// Assign to a student.
    pub fn assigned_to(mut self, student_id: impl Into<String>) -> Self {
        self.assignee_id = Some(student_id.into());
        self
    }

    /// Override the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Fractional days from `reference` to the deadline; negative once overdue.
    pub fn days_until_deadline(&self, reference: DateTime<Utc>) -> f64 {
        (self.deadline - reference).num_seconds() as f64 / 86_400.0
    }

    /// Whether the task is still active and past its deadline.
    pub fn is_overdue(&self, reference: DateTime<Utc>) -> bool {
        self.is_active() && self.deadline < reference
    }
}
