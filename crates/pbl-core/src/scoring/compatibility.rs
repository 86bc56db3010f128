//! Pairwise compatibility between team members.
//!
//! ```text
//! 3 base
//! +2   either student lists the other as preferred
//! -2   either student lists the other as avoided
//! +0.5 same E/I letter
//! +0.5 same J/P letter
//! ```
//!
//! The result is clamped to `[1, 5]`. A student paired with themself
//! scores 0 with the reason "same person".

use serde::{Deserialize, Serialize};

use super::{clamp_score, NEUTRAL_SCORE};
use crate::model::Student;

pub const PREFERENCE_BONUS: f64 = 2.0;
pub const AVOIDANCE_PENALTY: f64 = 2.0;
pub const SHARED_TRAIT_BONUS: f64 = 0.5;

pub const SAME_PERSON: &str = "same person";
pub const NEUTRAL_REASON: &str = "neutral";
pub const REASON_SEPARATOR: &str = ", ";

/// Compatibility of one ordered pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairCompatibility {
    pub student_a: String,
    pub student_b: String,
    pub score: f64,
    pub reason: String,
}

/// MBTI letter at `index`, if the normalized code is a full four-letter type.
fn mbti_letter(student: &Student, index: usize) -> Option<char> {
    let code = student.mbti_code();
    if code.chars().count() != 4 {
        return None;
    }
    code.chars().nth(index)
}

fn shares_letter(a: &Student, b: &Student, index: usize) -> bool {
    match (mbti_letter(a, index), mbti_letter(b, index)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Score a pair of students.
pub fn pair_compatibility(a: &Student, b: &Student) -> PairCompatibility {
    if a.student_id == b.student_id {
        return PairCompatibility {
            student_a: a.student_id.clone(),
            student_b: b.student_id.clone(),
            score: 0.0,
            reason: SAME_PERSON.to_string(),
        };
    }

    let mut score = NEUTRAL_SCORE;
    let mut reasons: Vec<&str> = Vec::new();

    if a.preferred_partners.contains(&b.student_id) || b.preferred_partners.contains(&a.student_id)
    {
        score += PREFERENCE_BONUS;
        reasons.push("preferred partner");
    }
    if a.avoided_partners.contains(&b.student_id) || b.avoided_partners.contains(&a.student_id) {
        score -= AVOIDANCE_PENALTY;
        reasons.push("avoided partner");
    }
    if shares_letter(a, b, 0) {
        score += SHARED_TRAIT_BONUS;
        reasons.push("same extraversion/introversion");
    }
    if shares_letter(a, b, 3) {
        score += SHARED_TRAIT_BONUS;
        reasons.push("same judging/perceiving");
    }

    let reason = if reasons.is_empty() {
        NEUTRAL_REASON.to_string()
    } else {
        reasons.join(REASON_SEPARATOR)
    };

    PairCompatibility {
        student_a: a.student_id.clone(),
        student_b: b.student_id.clone(),
        score: clamp_score(score),
        reason,
    }
}

/// Full member-by-member matrix, rows and columns in roster order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityMatrix {
    pub member_ids: Vec<String>,
    pub cells: Vec<Vec<PairCompatibility>>,
}

impl CompatibilityMatrix {
    /// Cell for a pair of member ids.
    pub fn get(&self, a: &str, b: &str) -> Option<&PairCompatibility> {
        let row = self.member_ids.iter().position(|id| id == a)?;
        let col = self.member_ids.iter().position(|id| id == b)?;
        self.cells.get(row)?.get(col)
    }

    /// Mean off-diagonal score, or `None` for teams of fewer than two.
    pub fn average(&self) -> Option<f64> {
        let scores: Vec<f64> = self
            .cells
            .iter()
            .flatten()
            .filter(|c| c.student_a != c.student_b)
            .map(|c| c.score)
            .collect();
        if scores.is_empty() {
            None
        } else {
            Some(clamp_score(scores.iter().sum::<f64>() / scores.len() as f64))
        }
    }
}

/// Compute the matrix for the given members.
pub fn compatibility_matrix(members: &[Student]) -> CompatibilityMatrix {
    let cells = members
        .iter()
        .map(|a| members.iter().map(|b| pair_compatibility(a, b)).collect())
        .collect();

    CompatibilityMatrix {
        member_ids: members.iter().map(|s| s.student_id.clone()).collect(),
        cells,
    }
}
