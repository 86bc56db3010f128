//! Motivation explanation.

use serde::{Deserialize, Serialize};

use super::{impact_counts, Impact, ReasonFactor, ScoreBand};
use crate::model::{Student, Task, TaskStatus, TeamCompatibility};
use crate::scoring::aptitude::AptitudeLookup;
use crate::scoring::motivation::{
    motivation_terms, task_strength_match, MotivationWeights, COMPATIBILITY, COMPLETION,
    PERSONALITY, STRENGTH_MATCH,
};
use crate::scoring::{round1, weighted_score};

/// Explained motivation score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotivationReason {
    pub score: f64,
    pub factors: Vec<ReasonFactor>,
    pub summary: String,
}

fn describe_completion(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks assigned yet; a neutral completion rate is assumed".to_string();
    }
    let completed = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();
    let pct = (completed as f64 / tasks.len() as f64 * 100.0).round();
    format!("Completed {completed} of {} tasks ({pct}%)", tasks.len())
}

fn describe_strength_match(student: &Student, tasks: &[Task]) -> String {
    let lookup = AptitudeLookup::for_student(student);
    let active: Vec<&Task> = tasks.iter().filter(|t| t.is_active()).collect();
    if active.is_empty() {
        return "No active tasks to match against strengths".to_string();
    }
    let matched: Vec<&str> = active
        .iter()
        .filter(|t| task_strength_match(&lookup, t) > 0.0)
        .map(|t| t.category.as_str())
        .collect();
    if matched.is_empty() {
        format!("None of the {} active tasks play to the student's strengths", active.len())
    } else {
        format!(
            "{} of {} active tasks play to the student's strengths ({})",
            matched.len(),
            active.len(),
            matched.join(", ")
        )
    }
}

fn describe_compatibility(compat: &TeamCompatibility) -> String {
    if compat.partner_ids.is_empty() {
        return "No current teammates".to_string();
    }
    format!(
        "{} preferred and {} avoided partner(s) among {} teammate(s)",
        compat.preferred_teammates(),
        compat.avoided_teammates(),
        compat.partner_ids.len()
    )
}

fn describe_personality(student: &Student, base: f64) -> String {
    let code = student.mbti_code();
    if code.is_empty() {
        format!("No MBTI recorded; neutral base of {base:.1}")
    } else {
        format!("MBTI {code} gives a base of {base:.1}")
    }
}

fn summarize(score: f64, factors: &[ReasonFactor]) -> String {
    let (positive, negative) = impact_counts(factors);
    match ScoreBand::from_score(score) {
        ScoreBand::High if positive > negative => {
            "Motivation is high, carried by several strong factors.".to_string()
        }
        ScoreBand::High => "Motivation is high, though some factors deserve attention.".to_string(),
        ScoreBand::Medium if positive >= negative => {
            "Motivation is moderate, with room to grow.".to_string()
        }
        ScoreBand::Medium => {
            "Motivation is moderate, but negative factors are pulling it down.".to_string()
        }
        ScoreBand::Low if negative > positive => {
            "Motivation is low; several factors need support.".to_string()
        }
        ScoreBand::Low => "Motivation is low; consider an individual follow-up.".to_string(),
    }
}

/// Explain a student's motivation score factor by factor.
pub fn motivation_reason(
    student: &Student,
    tasks: &[Task],
    compat: &TeamCompatibility,
) -> MotivationReason {
    let terms = motivation_terms(student, tasks, compat, &MotivationWeights::default());
    let score = weighted_score(&terms);

    let factors = terms
        .iter()
        .map(|term| {
            let description = match term.name.as_str() {
                COMPLETION => describe_completion(tasks),
                STRENGTH_MATCH => describe_strength_match(student, tasks),
                COMPATIBILITY => describe_compatibility(compat),
                PERSONALITY => describe_personality(student, term.value),
                other => other.to_string(),
            };
            ReasonFactor::new(
                term.name.clone(),
                Impact::from_component(term.value),
                description,
                round1(term.value),
            )
        })
        .collect::<Vec<_>>();

    let summary = summarize(score, &factors);
    MotivationReason {
        score,
        factors,
        summary,
    }
}
