//! Student profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Skill columns recorded for every student.
///
/// Each field corresponds to exactly one task category; categories without
/// a field (communication, leadership, presentation, ...) are unmapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillField {
    Planning,
    Execution,
    Coordination,
    Exploration,
    Design,
    Development,
    Analysis,
    Documentation,
}

impl SkillField {
    pub const ALL: [SkillField; 8] = [
        SkillField::Planning,
        SkillField::Execution,
        SkillField::Coordination,
        SkillField::Exploration,
        SkillField::Design,
        SkillField::Development,
        SkillField::Analysis,
        SkillField::Documentation,
    ];

    /// Fixed category to skill-field mapping.
    pub fn from_category(category: &str) -> Option<SkillField> {
        match category.trim().to_ascii_lowercase().as_str() {
            "planning" => Some(SkillField::Planning),
            "execution" => Some(SkillField::Execution),
            "coordination" => Some(SkillField::Coordination),
            "exploration" => Some(SkillField::Exploration),
            "design" => Some(SkillField::Design),
            "development" => Some(SkillField::Development),
            "analysis" => Some(SkillField::Analysis),
            "documentation" => Some(SkillField::Documentation),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillField::Planning => "planning",
            SkillField::Execution => "execution",
            SkillField::Coordination => "coordination",
            SkillField::Exploration => "exploration",
            SkillField::Design => "design",
            SkillField::Development => "development",
            SkillField::Analysis => "analysis",
            SkillField::Documentation => "documentation",
        }
    }
}

/// Per-category skill ratings (1-5). Unrated skills stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillRatings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planning: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordination: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exploration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub development: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<f64>,
}

impl SkillRatings {
    pub fn get(&self, field: SkillField) -> Option<f64> {
        match field {
            SkillField::Planning => self.planning,
            SkillField::Execution => self.execution,
            SkillField::Coordination => self.coordination,
            SkillField::Exploration => self.exploration,
            SkillField::Design => self.design,
            SkillField::Development => self.development,
            SkillField::Analysis => self.analysis,
            SkillField::Documentation => self.documentation,
        }
    }

    pub fn set(&mut self, field: SkillField, value: Option<f64>) {
        let slot = match field {
            SkillField::Planning => &mut self.planning,
            SkillField::Execution => &mut self.execution,
            SkillField::Coordination => &mut self.coordination,
            SkillField::Exploration => &mut self.exploration,
            SkillField::Design => &mut self.design,
            SkillField::Development => &mut self.development,
            SkillField::Analysis => &mut self.analysis,
            SkillField::Documentation => &mut self.documentation,
        };
        *slot = value.map(|v| v.clamp(1.0, 5.0));
    }

    /// Builder-style setter.
    pub fn with(mut self, field: SkillField, value: f64) -> Self {
        self.set(field, Some(value));
        self
    }
}

/// Uppercase type letters of an MBTI value.
///
/// At most four leading letters are kept, so identity suffixes such as
/// `ENFJ-A` read as `ENFJ`.
pub fn normalize_mbti(raw: &str) -> String {
    raw.trim()
        .chars()
        .take_while(char::is_ascii_alphabetic)
        .take(4)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// A student enrolled in the project course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique identifier
    pub student_id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Four-letter MBTI code (may be empty)
    #[serde(default)]
    pub mbti: String,
    /// Structured skill ratings
    #[serde(default)]
    pub skills: SkillRatings,
    /// Legacy free-text strengths (category names)
    #[serde(default)]
    pub strengths: Vec<String>,
    /// Legacy free-text weaknesses (category names)
    #[serde(default)]
    pub weaknesses: Vec<String>,
    /// Students this student likes working with
    #[serde(default)]
    pub preferred_partners: BTreeSet<String>,
    /// Students this student would rather avoid
    #[serde(default)]
    pub avoided_partners: BTreeSet<String>,
    /// Current team, if any
    #[serde(default)]
    pub team_id: Option<String>,
    /// Last time the student touched the dashboard or a task
    #[serde(
        default,
        deserialize_with = "super::datetime::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_active_at: Option<DateTime<Utc>>,
    /// Last check-in with a mentor or teammate
    #[serde(
        default,
        deserialize_with = "super::datetime::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_contact_at: Option<DateTime<Utc>>,
}

impl Student {
    pub fn new(student_id: impl Into<String>, name: impl Into<String>) -> Self {
        Student {
            student_id: student_id.into(),
            name: name.into(),
            mbti: String::new(),
            skills: SkillRatings::default(),
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            preferred_partners: BTreeSet::new(),
            avoided_partners: BTreeSet::new(),
            team_id: None,
            last_active_at: None,
            last_contact_at: None,
        }
    }

    pub fn with_mbti(mut self, mbti: impl Into<String>) -> Self {
        self.mbti = mbti.into();
        self
    }

    pub fn with_skills(mut self, skills: SkillRatings) -> Self {
        self.skills = skills;
        self
    }

    pub fn prefers(mut self, other: impl Into<String>) -> Self {
        self.preferred_partners.insert(other.into());
        self
    }

    pub fn avoids(mut self, other: impl Into<String>) -> Self {
        self.avoided_partners.insert(other.into());
        self
    }

    pub fn in_team(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    /// Four-letter MBTI type, see [`normalize_mbti`].
    pub fn mbti_code(&self) -> String {
        normalize_mbti(&self.mbti)
    }

    /// Display label: the name when present, otherwise the id.
    pub fn label(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.student_id
        } else {
            &self.name
        }
    }
}
