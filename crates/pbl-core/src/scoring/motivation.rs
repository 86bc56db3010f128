//! Motivation score.
//!
//! Four components on a 0-5 scale, averaged with fixed weights:
//!
//! | Component      | Weight | Value                                          |
//! |----------------|--------|------------------------------------------------|
//! | completion     | 0.40   | completed / total * 5 (0.5 rate with no tasks)  |
//! | strength_match | 0.25   | mean per-task aptitude match * 5                |
//! | compatibility  | 0.20   | 3 + 0.5 per preferred - 1.0 per avoided mate    |
//! | personality    | 0.15   | MBTI prefix base (EN 4.0, ES 3.5, IN 3.0, IS 2.5)|

use serde::{Deserialize, Serialize};

use super::aptitude::AptitudeLookup;
use super::{clamp_score, weighted_score, WeightedTerm, NEUTRAL_SCORE};
use crate::model::{normalize_mbti, Student, Task, TaskStatus, TeamCompatibility};

/// Completion rate assumed for a student with no tasks.
pub const NEUTRAL_COMPLETION_RATE: f64 = 0.5;
/// Minimum aptitude for a task to count as a strength match.
pub const STRENGTH_MATCH_THRESHOLD: f64 = 3.5;
/// Baseline of the compatibility component.
pub const COMPATIBILITY_BASE: f64 = 3.0;
/// Bonus per preferred teammate.
pub const PREFERRED_BONUS: f64 = 0.5;
/// Penalty per avoided teammate.
pub const AVOIDED_PENALTY: f64 = 1.0;

pub const COMPLETION: &str = "completion";
pub const STRENGTH_MATCH: &str = "strength_match";
pub const COMPATIBILITY: &str = "compatibility";
pub const PERSONALITY: &str = "personality";

/// Component weights for the motivation score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotivationWeights {
    pub completion: f64,
    pub strength_match: f64,
    pub compatibility: f64,
    pub personality: f64,
}

impl Default for MotivationWeights {
    fn default() -> Self {
        Self {
            completion: 0.40,
            strength_match: 0.25,
            compatibility: 0.20,
            personality: 0.15,
        }
    }
}

/// Share of tasks completed, or [`NEUTRAL_COMPLETION_RATE`] for none.
pub fn completion_rate(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return NEUTRAL_COMPLETION_RATE;
    }
    let completed = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();
    completed as f64 / tasks.len() as f64
}

/// Match contribution of a single active task (0-1).
///
/// Zero unless the student's aptitude for the category reaches
/// [`STRENGTH_MATCH_THRESHOLD`]; otherwise `(skill / 5) * (difficulty / 5)`.
pub fn task_strength_match(lookup: &AptitudeLookup<'_>, task: &Task) -> f64 {
    let skill = lookup.skill(&task.category);
    let matched = if skill >= STRENGTH_MATCH_THRESHOLD {
        skill / 5.0
    } else {
        0.0
    };
    matched * (f64::from(task.difficulty) / 5.0)
}

/// Average strength match (0-1).
///
/// Contributions come from active tasks only, but the average runs over
/// every task, so completed work dilutes it.
pub fn strength_match(student: &Student, tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let lookup = AptitudeLookup::for_student(student);
    let sum: f64 = tasks
        .iter()
        .filter(|t| t.is_active())
        .map(|t| task_strength_match(&lookup, t))
        .sum();
    sum / tasks.len() as f64
}

/// Teammate compatibility component, clamped to `[0, 5]`.
pub fn compatibility_component(compat: &TeamCompatibility) -> f64 {
    let value = COMPATIBILITY_BASE + PREFERRED_BONUS * compat.preferred_teammates() as f64
        - AVOIDED_PENALTY * compat.avoided_teammates() as f64;
    value.clamp(0.0, 5.0)
}

/// Personality base score from the MBTI prefix.
pub fn personality_base(mbti: &str) -> f64 {
    let code = normalize_mbti(mbti);
    if code.starts_with("EN") {
        4.0
    } else if code.starts_with("ES") {
        3.5
    } else if code.starts_with("IN") {
        3.0
    } else if code.starts_with("IS") {
        2.5
    } else {
        3.0
    }
}

/// The four weighted components, in display order.
pub fn motivation_terms(
    student: &Student,
    tasks: &[Task],
    compat: &TeamCompatibility,
    weights: &MotivationWeights,
) -> Vec<WeightedTerm> {
    vec![
        WeightedTerm::new(COMPLETION, weights.completion, completion_rate(tasks) * 5.0),
        WeightedTerm::new(
            STRENGTH_MATCH,
            weights.strength_match,
            strength_match(student, tasks) * 5.0,
        ),
        WeightedTerm::new(
            COMPATIBILITY,
            weights.compatibility,
            compatibility_component(compat),
        ),
        WeightedTerm::new(PERSONALITY, weights.personality, personality_base(&student.mbti)),
    ]
}

/// Motivation score with the default weights.
pub fn compute_motivation(student: &Student, tasks: &[Task], compat: &TeamCompatibility) -> f64 {
    compute_motivation_with(student, tasks, compat, &MotivationWeights::default())
}

/// Motivation score with caller-supplied weights.
pub fn compute_motivation_with(
    student: &Student,
    tasks: &[Task],
    compat: &TeamCompatibility,
    weights: &MotivationWeights,
) -> f64 {
    weighted_score(&motivation_terms(student, tasks, compat, weights))
}

/// Fallback estimate from progress counts alone.
///
/// `rate * 4 + 0.5 (if anything is in progress) + 1`; 3 when all counts are zero.
pub fn estimate_motivation_from_progress(
    completed: usize,
    in_progress: usize,
    pending: usize,
) -> f64 {
    let total = completed + in_progress + pending;
    if total == 0 {
        return NEUTRAL_SCORE;
    }
    let rate = completed as f64 / total as f64;
    let momentum = if in_progress > 0 { 0.5 } else { 0.0 };
    clamp_score(rate * 4.0 + momentum + 1.0)
}
