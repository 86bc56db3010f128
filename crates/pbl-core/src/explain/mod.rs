//! Human-readable explanations of the scores.
//!
//! The generators here re-derive the same components the scoring engine
//! uses and turn them into factor lists plus a one-line summary, so the
//! dashboard can show *why* a student scored the way they did.

pub mod encouragement;
pub mod load;
pub mod motivation;

use serde::{Deserialize, Serialize};

pub use encouragement::encouragement_examples;
pub use load::{load_reason, LoadReason};
pub use motivation::{motivation_reason, MotivationReason};

/// Component value at or above which a factor reads as positive.
pub const POSITIVE_THRESHOLD: f64 = 3.5;
/// Component value below which a factor reads as negative.
pub const NEGATIVE_THRESHOLD: f64 = 2.5;

/// Direction a factor pushes the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Neutral,
    Negative,
}

impl Impact {
    /// Classify a component value on the 0-5 scale.
    pub fn from_component(value: f64) -> Self {
        if value >= POSITIVE_THRESHOLD {
            Impact::Positive
        } else if value < NEGATIVE_THRESHOLD {
            Impact::Negative
        } else {
            Impact::Neutral
        }
    }
}

/// One explained component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasonFactor {
    pub factor: String,
    pub impact: Impact,
    pub description: String,
    pub score: f64,
}

impl ReasonFactor {
    pub fn new(
        factor: impl Into<String>,
        impact: Impact,
        description: impl Into<String>,
        score: f64,
    ) -> Self {
        Self {
            factor: factor.into(),
            impact,
            description: description.into(),
            score,
        }
    }
}

/// Coarse band of a final score used to pick summary wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    /// `>=4` high, `>=3` medium, else low.
    pub fn from_score(score: f64) -> Self {
        if score >= 4.0 {
            ScoreBand::High
        } else if score >= 3.0 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }
}

/// Positive and negative factor counts.
pub fn impact_counts(factors: &[ReasonFactor]) -> (usize, usize) {
    factors.iter().fold((0, 0), |(pos, neg), f| match f.impact {
        Impact::Positive => (pos + 1, neg),
        Impact::Negative => (pos, neg + 1),
        Impact::Neutral => (pos, neg),
    })
}
