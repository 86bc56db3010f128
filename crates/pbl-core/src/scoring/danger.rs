//! Danger (dropout / stall risk) score and recommendations.
//!
//! Six risk components, each mapped onto 0-5 where higher means riskier:
//!
//! | Component     | Weight | Risk                               |
//! |---------------|--------|------------------------------------|
//! | motivation    | 0.30   | (6 - motivation) / 5 * 5           |
//! | load          | 0.25   | load score                         |
//! | overdue       | 0.20   | min(5, overdue * 1.5)              |
//! | skill_gap     | 0.10   | skill_gap * 5                      |
//! | activity      | 0.10   | (1 - recent_activity) * 5          |
//! | communication | 0.05   | communication_gap * 5              |

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{weighted_score, WeightedTerm};

/// Signals assembled per student at request time. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    /// Motivation score (1-5)
    pub motivation_score: f64,
    /// Load score (1-5)
    pub load_score: f64,
    /// Active tasks past their deadline
    pub overdue_tasks: u32,
    /// Share of work outside the student's strengths (0-1)
    pub skill_gap: f64,
    /// Recency of activity, 1 = active right now (0-1)
    pub recent_activity: f64,
    /// Staleness of communication, 1 = out of touch (0-1)
    pub communication_gap: f64,
}

impl Default for RiskFactors {
    fn default() -> Self {
        Self {
            motivation_score: 3.0,
            load_score: 1.0,
            overdue_tasks: 0,
            skill_gap: 0.0,
            recent_activity: 1.0,
            communication_gap: 0.0,
        }
    }
}

/// Component weights for the danger score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DangerWeights {
    pub motivation: f64,
    pub load: f64,
    pub overdue: f64,
    pub skill_gap: f64,
    pub activity: f64,
    pub communication: f64,
}

impl Default for DangerWeights {
    fn default() -> Self {
        Self {
            motivation: 0.30,
            load: 0.25,
            overdue: 0.20,
            skill_gap: 0.10,
            activity: 0.10,
            communication: 0.05,
        }
    }
}

/// Risk per overdue task, capped at 5.
pub const OVERDUE_RISK_PER_TASK: f64 = 1.5;

/// The six weighted risk components.
pub fn danger_terms(factors: &RiskFactors, weights: &DangerWeights) -> Vec<WeightedTerm> {
    vec![
        WeightedTerm::new(
            "motivation",
            weights.motivation,
            (6.0 - factors.motivation_score) / 5.0 * 5.0,
        ),
        WeightedTerm::new("load", weights.load, factors.load_score),
        WeightedTerm::new(
            "overdue",
            weights.overdue,
            (f64::from(factors.overdue_tasks) * OVERDUE_RISK_PER_TASK).min(5.0),
        ),
        WeightedTerm::new("skill_gap", weights.skill_gap, factors.skill_gap * 5.0),
        WeightedTerm::new(
            "activity",
            weights.activity,
            (1.0 - factors.recent_activity) * 5.0,
        ),
        WeightedTerm::new(
            "communication",
            weights.communication,
            factors.communication_gap * 5.0,
        ),
    ]
}

/// Danger score with the default weights.
pub fn compute_danger(factors: &RiskFactors) -> f64 {
    compute_danger_with(factors, &DangerWeights::default())
}

/// Danger score with caller-supplied weights; 3 when they sum to zero.
pub fn compute_danger_with(factors: &RiskFactors, weights: &DangerWeights) -> f64 {
    weighted_score(&danger_terms(factors, weights))
}

/// Danger classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DangerLevel {
    Safe,
    Caution,
    Warning,
    Critical,
}

impl DangerLevel {
    /// Half-open bands: `<2` safe, `<3` caution, `<4` warning, else critical.
    pub fn from_score(score: f64) -> Self {
        if score < 2.0 {
            DangerLevel::Safe
        } else if score < 3.0 {
            DangerLevel::Caution
        } else if score < 4.0 {
            DangerLevel::Warning
        } else {
            DangerLevel::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DangerLevel::Safe => "safe",
            DangerLevel::Caution => "caution",
            DangerLevel::Warning => "warning",
            DangerLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for DangerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Escalation line emitted for scores of 4 and above.
pub const URGENT_ESCALATION: &str =
    "URGENT: escalate to the supervising instructor and hold a one-on-one check-in within 24 hours.";

/// Score at which the escalation line is emitted.
pub const ESCALATION_THRESHOLD: f64 = 4.0;

/// Rule-based advice for a danger score and the factors behind it.
///
/// Blocks appear in a fixed order: escalation, motivation, load, overdue,
/// activity, skill, communication.
pub fn danger_recommendations(score: f64, factors: &RiskFactors) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    if score >= ESCALATION_THRESHOLD {
        lines.push(URGENT_ESCALATION.to_string());
    }

    if factors.motivation_score <= 2.0 {
        lines.push("Talk with the student about what they enjoy in the project.".into());
        lines.push("Offer a small, clearly winnable task to rebuild momentum.".into());
    }

    if factors.load_score >= 4.0 {
        lines.push("Rebalance work: move one or more tasks to a teammate.".into());
        lines.push("Agree on which tasks can slip and renegotiate their deadlines.".into());
    }

    if factors.overdue_tasks > 0 {
        lines.push(format!(
            "Review the {} overdue task{} and set a recovery date for each.",
            factors.overdue_tasks,
            if factors.overdue_tasks == 1 { "" } else { "s" }
        ));
        lines.push("Split overdue work into pieces that fit in a single session.".into());
    }

    if factors.recent_activity < 0.5 {
        lines.push("Activity has dropped off; reach out to confirm the student is okay.".into());
    }

    if factors.skill_gap > 0.5 {
        lines.push("Pair the student with a teammate strong in the weak categories.".into());
        lines.push("Share learning material for the skills the current tasks require.".into());
    }

    if factors.communication_gap > 0.5 {
        lines.push("Schedule a short regular stand-up with the team.".into());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn best_case() -> RiskFactors {
        RiskFactors {
            motivation_score: 5.0,
            load_score: 1.0,
            overdue_tasks: 0,
            skill_gap: 0.0,
            recent_activity: 1.0,
            communication_gap: 0.0,
        }
    }

    fn worst_case() -> RiskFactors {
        RiskFactors {
            motivation_score: 1.0,
            load_score: 5.0,
            overdue_tasks: 5,
            skill_gap: 1.0,
            recent_activity: 0.0,
            communication_gap: 1.0,
        }
    }

    #[test]
    fn best_case_is_minimum_risk() {
        assert_eq!(compute_danger(&best_case()), 1.0);
    }

    #[test]
    fn worst_case_is_maximum_risk() {
        assert_eq!(compute_danger(&worst_case()), 5.0);
    }

    #[test]
    fn overdue_risk_caps_at_five() {
        let mut factors = best_case();
        factors.overdue_tasks = 100;
        let terms = danger_terms(&factors, &DangerWeights::default());
        let overdue = terms.iter().find(|t| t.name == "overdue").unwrap();
        assert_eq!(overdue.value, 5.0);
    }

    #[test]
    fn middle_of_the_road() {
        let factors = RiskFactors {
            motivation_score: 3.0,
            load_score: 3.0,
            overdue_tasks: 1,
            skill_gap: 0.4,
            recent_activity: 0.6,
            communication_gap: 0.2,
        };
        // 0.3*3 + 0.25*3 + 0.2*1.5 + 0.1*2 + 0.1*2 + 0.05*1 = 2.4
        assert_eq!(compute_danger(&factors), 2.4);
    }

    #[test]
    fn zero_weights_fall_back_to_neutral() {
        let weights = DangerWeights {
            motivation: 0.0,
            load: 0.0,
            overdue: 0.0,
            skill_gap: 0.0,
            activity: 0.0,
            communication: 0.0,
        };
        assert_eq!(compute_danger_with(&worst_case(), &weights), 3.0);
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(DangerLevel::from_score(1.9), DangerLevel::Safe);
        assert_eq!(DangerLevel::from_score(2.0), DangerLevel::Caution);
        assert_eq!(DangerLevel::from_score(3.0), DangerLevel::Warning);
        assert_eq!(DangerLevel::from_score(4.0), DangerLevel::Critical);
    }

    #[test]
    fn escalation_depends_only_on_score() {
        let calm = best_case();
        assert_eq!(danger_recommendations(4.0, &calm)[0], URGENT_ESCALATION);
        assert!(danger_recommendations(3.9, &worst_case())
            .iter()
            .all(|line| line != URGENT_ESCALATION));
    }

    #[test]
    fn best_case_has_no_advice() {
        assert!(danger_recommendations(1.0, &best_case()).is_empty());
    }

    #[test]
    fn blocks_follow_fixed_order() {
        let lines = danger_recommendations(5.0, &worst_case());
        let position = |needle: &str| lines.iter().position(|l| l.contains(needle)).unwrap();

        assert_eq!(position("URGENT"), 0);
        assert!(position("enjoy") < position("Rebalance"));
        assert!(position("Rebalance") < position("overdue tasks"));
        assert!(position("overdue tasks") < position("Activity"));
        assert!(position("Activity") < position("Pair the student"));
        assert!(position("Pair the student") < position("stand-up"));
        assert!(lines.iter().any(|l| l.contains("5 overdue tasks")));
    }

    #[test]
    fn overdue_line_uses_singular() {
        let mut factors = best_case();
        factors.overdue_tasks = 1;
        let lines = danger_recommendations(1.5, &factors);
        assert!(lines[0].contains("1 overdue task and"));
    }
}
