//! Per-category aptitude lookup.
//!
//! Aptitude has two backing representations: the structured skill table
//! and the older free-text strengths/weaknesses lists. Lookups try them in
//! a fixed order and fall back to [`DEFAULT_SKILL`].

use crate::model::{SkillField, SkillRatings, Student};

/// Skill value assumed when nothing is known.
pub const DEFAULT_SKILL: f64 = 3.0;
/// Skill value implied by listing a category as a strength.
pub const LEGACY_STRENGTH_SKILL: f64 = 4.0;
/// Skill value implied by listing a category as a weakness.
pub const LEGACY_WEAKNESS_SKILL: f64 = 2.0;

/// A source of per-category skill ratings.
pub trait Aptitude {
    /// Rating for `category`, or `None` when this source has no opinion.
    fn rating(&self, category: &str) -> Option<f64>;
}

impl Aptitude for SkillRatings {
    fn rating(&self, category: &str) -> Option<f64> {
        SkillField::from_category(category).and_then(|field| self.get(field))
    }
}

/// Free-text strengths and weaknesses (category names).
#[derive(Debug, Clone, Copy)]
pub struct LegacyAptitude<'a> {
    pub strengths: &'a [String],
    pub weaknesses: &'a [String],
}

impl Aptitude for LegacyAptitude<'_> {
    fn rating(&self, category: &str) -> Option<f64> {
        let category = category.trim();
        let listed = |list: &[String]| {
            list.iter()
                .any(|s| s.trim().eq_ignore_ascii_case(category))
        };
        if listed(self.strengths) {
            Some(LEGACY_STRENGTH_SKILL)
        } else if listed(self.weaknesses) {
            Some(LEGACY_WEAKNESS_SKILL)
        } else {
            None
        }
    }
}

/// Where a resolved rating came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AptitudeSource {
    Structured,
    Legacy,
    Default,
}

/// Resolves a student's aptitude: structured, then legacy, then default.
pub struct AptitudeLookup<'a> {
    structured: &'a SkillRatings,
    legacy: LegacyAptitude<'a>,
}

impl<'a> AptitudeLookup<'a> {
    pub fn for_student(student: &'a Student) -> Self {
        Self {
            structured: &student.skills,
            legacy: LegacyAptitude {
                strengths: &student.strengths,
                weaknesses: &student.weaknesses,
            },
        }
    }

    /// Rating plus the representation that supplied it.
    pub fn resolve(&self, category: &str) -> (f64, AptitudeSource) {
        if let Some(value) = self.structured.rating(category) {
            (value, AptitudeSource::Structured)
        } else if let Some(value) = self.legacy.rating(category) {
            (value, AptitudeSource::Legacy)
        } else {
            (DEFAULT_SKILL, AptitudeSource::Default)
        }
    }

    pub fn skill(&self, category: &str) -> f64 {
        self.resolve(category).0
    }
}
