//! Workload explanation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{impact_counts, Impact, ReasonFactor, ScoreBand};
use crate::model::Task;
use crate::scoring::load::{
    compute_load, load_by_category, task_count_multiplier, CategoryLoad, LoadLevel,
    MAX_COUNT_MULTIPLIER,
};
use crate::scoring::round1;

/// Tasks due within this many days count as "due soon".
pub const DUE_SOON_DAYS: f64 = 3.0;

/// Explained load score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadReason {
    pub score: f64,
    pub level: LoadLevel,
    pub factors: Vec<ReasonFactor>,
    pub by_category: Vec<CategoryLoad>,
    pub summary: String,
}

fn count_factor(active: usize) -> ReasonFactor {
    let value = task_count_multiplier(active) / MAX_COUNT_MULTIPLIER * 5.0;
    let impact = if active > 3 {
        Impact::Negative
    } else if active <= 1 {
        Impact::Positive
    } else {
        Impact::Neutral
    };
    ReasonFactor::new(
        "active_tasks",
        impact,
        format!("{active} active task(s)"),
        round1(value),
    )
}

fn overdue_factor(overdue: usize) -> ReasonFactor {
    let impact = if overdue > 0 {
        Impact::Negative
    } else {
        Impact::Positive
    };
    let description = if overdue > 0 {
        format!("{overdue} task(s) past the deadline")
    } else {
        "Nothing overdue".to_string()
    };
    ReasonFactor::new(
        "overdue",
        impact,
        description,
        round1((overdue as f64 * 1.5).min(5.0)),
    )
}

fn due_soon_factor(due_soon: usize) -> ReasonFactor {
    let impact = if due_soon > 0 {
        Impact::Negative
    } else {
        Impact::Neutral
    };
    ReasonFactor::new(
        "due_soon",
        impact,
        format!("{due_soon} task(s) due within {DUE_SOON_DAYS} days"),
        round1((due_soon as f64 * 1.5).min(5.0)),
    )
}

fn hours_factor(total_hours: f64) -> ReasonFactor {
    let impact = if total_hours >= 30.0 {
        Impact::Negative
    } else if total_hours < 10.0 {
        Impact::Positive
    } else {
        Impact::Neutral
    };
    ReasonFactor::new(
        "estimated_hours",
        impact,
        format!("{total_hours:.1} estimated hours of open work"),
        round1((total_hours / 10.0).min(5.0)),
    )
}

fn difficulty_factor(avg_difficulty: Option<f64>) -> ReasonFactor {
    match avg_difficulty {
        None => ReasonFactor::new("difficulty", Impact::Neutral, "No open tasks", 0.0),
        Some(avg) => {
            let impact = if avg >= 4.0 {
                Impact::Negative
            } else if avg <= 2.0 {
                Impact::Positive
            } else {
                Impact::Neutral
            };
            ReasonFactor::new(
                "difficulty",
                impact,
                format!("Average difficulty {avg:.1} / 5"),
                round1(avg),
            )
        }
    }
}

fn summarize(score: f64, factors: &[ReasonFactor]) -> String {
    let (positive, negative) = impact_counts(factors);
    match ScoreBand::from_score(score) {
        ScoreBand::High if negative > positive => {
            "Workload is heavy; several pressures stack up.".to_string()
        }
        ScoreBand::High => "Workload is heavy despite some relief factors.".to_string(),
        ScoreBand::Medium if negative > positive => {
            "Workload is substantial and deadline pressure should be watched.".to_string()
        }
        ScoreBand::Medium => "Workload is substantial but manageable.".to_string(),
        ScoreBand::Low if negative > 0 => {
            "Workload is light; keep an eye on the flagged tasks.".to_string()
        }
        ScoreBand::Low => "Workload is light.".to_string(),
    }
}

/// Explain a load score factor by factor.
pub fn load_reason(tasks: &[Task], reference: DateTime<Utc>) -> LoadReason {
    let score = compute_load(tasks, reference);
    let active: Vec<&Task> = tasks.iter().filter(|t| t.is_active()).collect();

    let overdue = active.iter().filter(|t| t.is_overdue(reference)).count();
    let due_soon = active
        .iter()
        .filter(|t| {
            let days = t.days_until_deadline(reference);
            (0.0..DUE_SOON_DAYS).contains(&days)
        })
        .count();
    let total_hours: f64 = active.iter().map(|t| t.estimated_hours).sum();
    let avg_difficulty = if active.is_empty() {
        None
    } else {
        let sum: f64 = active.iter().map(|t| f64::from(t.difficulty)).sum();
        Some(sum / active.len() as f64)
    };

    let factors = vec![
        count_factor(active.len()),
        overdue_factor(overdue),
        due_soon_factor(due_soon),
        hours_factor(total_hours),
        difficulty_factor(avg_difficulty),
    ];
    let summary = summarize(score, &factors);

    LoadReason {
        score,
        level: LoadLevel::from_score(score),
        factors,
        by_category: load_by_category(tasks),
        summary,
    }
}
