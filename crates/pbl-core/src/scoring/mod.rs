//! Heuristic scoring engine.
//!
//! Every public score lives on the same scale:
//!
//! ```text
//! 1.0 (lowest) ..= 5.0 (highest), rounded to one decimal
//! ```
//!
//! Composite scores are weighted averages of component terms. Each term
//! keeps its name, weight and value so callers can explain a score as well
//! as display it.
//!
//! | Score      | Inputs                                              |
//! |------------|-----------------------------------------------------|
//! | Load       | active tasks, difficulty, hours, deadline urgency    |
//! | Motivation | completion, strength match, teammates, personality  |
//! | Danger     | motivation, load, overdue count, auxiliary signals   |
//!
//! All functions are pure: no clock reads, no shared state.

pub mod aptitude;
pub mod compatibility;
pub mod danger;
pub mod load;
pub mod motivation;

use serde::{Deserialize, Serialize};

/// Lower bound of every score.
pub const MIN_SCORE: f64 = 1.0;
/// Upper bound of every score.
pub const MAX_SCORE: f64 = 5.0;
/// Returned when a weighted sum has no weight to divide by.
pub const NEUTRAL_SCORE: f64 = 3.0;

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Clamp into `[1, 5]` and round to one decimal.
pub fn clamp_score(value: f64) -> f64 {
    round1(value.clamp(MIN_SCORE, MAX_SCORE))
}

/// One named component of a composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedTerm {
    /// Term name
    pub name: String,
    /// Weight of this term
    pub weight: f64,
    /// Component value on the 0-5 scale
    pub value: f64,
}

impl WeightedTerm {
    pub fn new(name: impl Into<String>, weight: f64, value: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            value,
        }
    }

    /// Weighted contribution to the sum.
    pub fn contribution(&self) -> f64 {
        self.weight * self.value
    }
}

/// Weighted sum divided by total weight, clamped and rounded.
///
/// Falls back to [`NEUTRAL_SCORE`] when the weights sum to zero.
pub fn weighted_score(terms: &[WeightedTerm]) -> f64 {
    let total_weight: f64 = terms.iter().map(|t| t.weight).sum();
    if total_weight <= 0.0 {
        return NEUTRAL_SCORE;
    }
    let sum: f64 = terms.iter().map(WeightedTerm::contribution).sum();
    clamp_score(sum / total_weight)
}
