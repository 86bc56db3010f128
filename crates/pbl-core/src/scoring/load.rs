//! Workload score from a student's active tasks.
//!
//! ```text
//! per task:  base    = difficulty * min(hours / 10, 1)
//!            urgency = 2.0 overdue | 1.8 <1d | 1.5 <3d | 1.2 <7d | 1.0
//! total    = Σ base * urgency
//! count    = min(active / 3, 1.5)
//! load     = (total * count / 15) * 4 + 1      -> clamp [1, 5], 1 decimal
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{clamp_score, MIN_SCORE};
use crate::model::{normalize_category, Task};

/// Hours at which a task reaches full time weight.
pub const FULL_WEIGHT_HOURS: f64 = 10.0;
/// Reference maximum used to normalize the accumulated load.
pub const LOAD_NORMALIZER: f64 = 15.0;
/// Active-task count at which the count multiplier reaches 1.0.
pub const TASK_COUNT_PIVOT: f64 = 3.0;
/// Cap on the count multiplier.
pub const MAX_COUNT_MULTIPLIER: f64 = 1.5;

/// Deadline urgency multiplier; most urgent tier wins.
pub fn urgency_multiplier(days_until_deadline: f64) -> f64 {
    if days_until_deadline < 0.0 {
        2.0
    } else if days_until_deadline < 1.0 {
        1.8
    } else if days_until_deadline < 3.0 {
        1.5
    } else if days_until_deadline < 7.0 {
        1.2
    } else {
        1.0
    }
}

/// Time weight of a task: hours over ten, capped at one.
pub fn time_weight(estimated_hours: f64) -> f64 {
    (estimated_hours / FULL_WEIGHT_HOURS).min(1.0)
}

/// Multiplier for the number of concurrently active tasks.
pub fn task_count_multiplier(active_count: usize) -> f64 {
    (active_count as f64 / TASK_COUNT_PIVOT).min(MAX_COUNT_MULTIPLIER)
}

/// Contribution of a single task before the count multiplier.
pub fn task_load(task: &Task, reference: DateTime<Utc>) -> f64 {
    let base = f64::from(task.difficulty) * time_weight(task.estimated_hours);
    base * urgency_multiplier(task.days_until_deadline(reference))
}

/// Load score for a task list at `reference`.
///
/// Completed tasks are ignored; no active tasks yields 1.
pub fn compute_load(tasks: &[Task], reference: DateTime<Utc>) -> f64 {
    let active: Vec<&Task> = tasks.iter().filter(|t| t.is_active()).collect();
    if active.is_empty() {
        return MIN_SCORE;
    }

    let total: f64 = active.iter().map(|t| task_load(t, reference)).sum();
    let raw = (total * task_count_multiplier(active.len()) / LOAD_NORMALIZER) * 4.0 + 1.0;
    clamp_score(raw)
}

/// Load classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl LoadLevel {
    /// Half-open bands: `<2` low, `<3` medium, `<4` high, else critical.
    pub fn from_score(score: f64) -> Self {
        if score < 2.0 {
            LoadLevel::Low
        } else if score < 3.0 {
            LoadLevel::Medium
        } else if score < 4.0 {
            LoadLevel::High
        } else {
            LoadLevel::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadLevel::Low => "low",
            LoadLevel::Medium => "medium",
            LoadLevel::High => "high",
            LoadLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for LoadLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Average difficulty of the active tasks in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryLoad {
    pub category: String,
    pub score: f64,
    pub task_count: usize,
}

/// Per-category load for active tasks, in first-seen category order.
pub fn load_by_category(tasks: &[Task]) -> Vec<CategoryLoad> {
    // (category, difficulty sum, count)
    let mut groups: Vec<(String, f64, usize)> = Vec::new();

    for task in tasks.iter().filter(|t| t.is_active()) {
        let difficulty = f64::from(task.difficulty);
        let category = normalize_category(&task.category);
        match groups.iter_mut().find(|(c, _, _)| *c == category) {
            Some(group) => {
                group.1 += difficulty;
                group.2 += 1;
            }
            None => groups.push((category, difficulty, 1)),
        }
    }

    groups
        .into_iter()
        .map(|(category, sum, count)| CategoryLoad {
            category,
            score: clamp_score(sum / count as f64),
            task_count: count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskStatus;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn task(difficulty: u8, hours: f64, due_in: Duration, category: &str) -> Task {
        Task::new("t", category, difficulty, hours, now() + due_in)
    }

    #[test]
    fn empty_list_is_minimum() {
        assert_eq!(compute_load(&[], now()), 1.0);
    }

    #[test]
    fn completed_only_is_minimum() {
        let tasks = vec![task(5, 10.0, Duration::days(-1), "x").with_status(TaskStatus::Completed)];
        assert_eq!(compute_load(&tasks, now()), 1.0);
    }

    #[test]
    fn single_overdue_task_example() {
        // base 5, urgency 2.0, count 1/3 -> (10 * 0.333 / 15) * 4 + 1 = 1.889
        let tasks = vec![task(5, 10.0, Duration::days(-1), "x")];
        let score = compute_load(&tasks, now());
        assert_eq!(score, 1.9);
        assert_eq!(LoadLevel::from_score(score), LoadLevel::Low);
    }

    #[test]
    fn overdue_scores_higher_than_distant_deadline() {
        let overdue = vec![task(3, 6.0, Duration::days(-2), "x")];
        let distant = vec![task(3, 6.0, Duration::days(10), "x")];
        assert!(compute_load(&overdue, now()) > compute_load(&distant, now()));
    }

    #[test]
    fn urgency_tiers_are_half_open() {
        assert_eq!(urgency_multiplier(-0.01), 2.0);
        assert_eq!(urgency_multiplier(0.0), 1.8);
        assert_eq!(urgency_multiplier(0.99), 1.8);
        assert_eq!(urgency_multiplier(1.0), 1.5);
        assert_eq!(urgency_multiplier(3.0), 1.2);
        assert_eq!(urgency_multiplier(6.99), 1.2);
        assert_eq!(urgency_multiplier(7.0), 1.0);
    }

    #[test]
    fn count_multiplier_caps_at_one_and_a_half() {
        assert_eq!(task_count_multiplier(3), 1.0);
        assert_eq!(task_count_multiplier(9), 1.5);
        assert!((task_count_multiplier(1) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn heavy_backlog_saturates_at_five() {
        let tasks: Vec<Task> = (0..6).map(|_| task(5, 12.0, Duration::hours(-3), "x")).collect();
        assert_eq!(compute_load(&tasks, now()), 5.0);
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(LoadLevel::from_score(1.9), LoadLevel::Low);
        assert_eq!(LoadLevel::from_score(2.0), LoadLevel::Medium);
        assert_eq!(LoadLevel::from_score(3.0), LoadLevel::High);
        assert_eq!(LoadLevel::from_score(4.0), LoadLevel::Critical);
        assert_eq!(LoadLevel::from_score(5.0), LoadLevel::Critical);
    }

    #[test]
    fn by_category_keeps_first_seen_order_and_skips_completed() {
        let tasks = vec![
            task(4, 2.0, Duration::days(5), "design"),
            task(2, 2.0, Duration::days(5), "analysis"),
            task(3, 2.0, Duration::days(5), "design"),
            task(5, 2.0, Duration::days(5), "planning").with_status(TaskStatus::Completed),
        ];
        let loads = load_by_category(&tasks);
        assert_eq!(loads.len(), 2);
        assert_eq!(loads[0].category, "design");
        assert_eq!(loads[0].score, 3.5);
        assert_eq!(loads[0].task_count, 2);
        assert_eq!(loads[1].category, "analysis");
        assert_eq!(loads[1].score, 2.0);
    }

    #[test]
    fn categories_from_data_file_group_case_insensitively() {
        let tasks: Vec<Task> = serde_json::from_str(
            r#"[
                {"task_id": "a", "title": "a", "difficulty": 4, "estimated_hours": 2,
                 "deadline": "2024-06-10", "category": "Design"},
                {"task_id": "b", "title": "b", "difficulty": 2, "estimated_hours": 2,
                 "deadline": "2024-06-10", "category": "design"}
            ]"#,
        )
        .unwrap();
        let loads = load_by_category(&tasks);
        assert_eq!(loads.len(), 1);
        assert_eq!(loads[0].category, "design");
        assert_eq!(loads[0].score, 3.0);
        assert_eq!(loads[0].task_count, 2);
    }
}
