//! Example encouragement messages a mentor can send.

use super::{Impact, MotivationReason, ReasonFactor, ScoreBand};
use crate::model::Student;
use crate::scoring::motivation::{COMPATIBILITY, COMPLETION, PERSONALITY, STRENGTH_MATCH};

fn praise(name: &str, factor: &ReasonFactor) -> Option<String> {
    let line = match factor.factor.as_str() {
        COMPLETION => format!("{name}, you keep finishing what you start. That steady progress shows."),
        STRENGTH_MATCH => {
            format!("{name}, your current tasks play right to your strengths. Great fit!")
        }
        COMPATIBILITY => format!("{name}, you work well with this team. Keep that energy going."),
        PERSONALITY => format!("{name}, your enthusiasm lifts the whole team."),
        _ => return None,
    };
    Some(line)
}

fn support(name: &str, factor: &ReasonFactor) -> Option<String> {
    let line = match factor.factor.as_str() {
        COMPLETION => format!(
            "{name}, every finished step counts. Which small piece could you close out today?"
        ),
        STRENGTH_MATCH => format!(
            "{name}, these tasks stretch you. Ask a teammate to pair up on the tricky parts."
        ),
        COMPATIBILITY => format!(
            "{name}, team dynamics can be hard. Let's talk about what would help you work together."
        ),
        PERSONALITY => format!("{name}, your careful approach is valuable. Share your ideas with us."),
        _ => return None,
    };
    Some(line)
}

/// Messages tailored to a motivation explanation.
///
/// Praise for positive factors comes first, then support for negative
/// ones, then a closing line chosen by score band.
pub fn encouragement_examples(student: &Student, reason: &MotivationReason) -> Vec<String> {
    let name = student.label();
    let mut lines: Vec<String> = reason
        .factors
        .iter()
        .filter(|f| f.impact == Impact::Positive)
        .filter_map(|f| praise(name, f))
        .collect();

    lines.extend(
        reason
            .factors
            .iter()
            .filter(|f| f.impact == Impact::Negative)
            .filter_map(|f| support(name, f)),
    );

    let closing = match ScoreBand::from_score(reason.score) {
        ScoreBand::High => format!("Keep it up, {name}! You're setting the pace for the team."),
        ScoreBand::Medium => format!("You're on track, {name}. One more push this week!"),
        ScoreBand::Low => format!("We're here for you, {name}. Let's find the next step together."),
    };
    lines.push(closing);
    lines
}
