//! Teams and the per-student compatibility view derived from them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::student::Student;

/// A project team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier
    pub team_id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Member student ids, in roster order
    #[serde(default)]
    pub member_ids: Vec<String>,
}

impl Team {
    pub fn new(team_id: impl Into<String>, name: impl Into<String>) -> Self {
        Team {
            team_id: team_id.into(),
            name: name.into(),
            member_ids: Vec::new(),
        }
    }

    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.member_ids = members.into_iter().map(Into::into).collect();
        self
    }

    pub fn contains(&self, student_id: &str) -> bool {
        self.member_ids.iter().any(|m| m == student_id)
    }
}

/// Compatibility view for one student: current teammates plus the
/// student's own preference lists. Derived per request, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamCompatibility {
    /// Current teammates (excluding the student)
    pub partner_ids: BTreeSet<String>,
    pub preferred_partners: BTreeSet<String>,
    pub avoided_partners: BTreeSet<String>,
}

impl TeamCompatibility {
    /// Build the view from the student's team membership.
    ///
    /// A student without a team gets an empty partner set.
    pub fn for_student(student: &Student, team: Option<&Team>) -> Self {
        let partner_ids = team
            .map(|t| {
                t.member_ids
                    .iter()
                    .filter(|id| **id != student.student_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        TeamCompatibility {
            partner_ids,
            preferred_partners: student.preferred_partners.clone(),
            avoided_partners: student.avoided_partners.clone(),
        }
    }

    /// Teammates the student prefers.
    pub fn preferred_teammates(&self) -> usize {
        self.partner_ids
            .intersection(&self.preferred_partners)
            .count()
    }

    /// Teammates the student avoids.
    pub fn avoided_teammates(&self) -> usize {
        self.partner_ids.intersection(&self.avoided_partners).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_student_excludes_self_and_counts_preferences() {
        let student = Student::new("s1", "Aki").prefers("s2").avoids("s3").avoids("s9");
        let team = Team::new("t1", "Alpha").with_members(["s1", "s2", "s3", "s4"]);

        let compat = TeamCompatibility::for_student(&student, Some(&team));
        assert_eq!(compat.partner_ids.len(), 3);
        assert!(!compat.partner_ids.contains("s1"));
        assert_eq!(compat.preferred_teammates(), 1);
        assert_eq!(compat.avoided_teammates(), 1);
    }

    #[test]
    fn no_team_means_no_partners() {
        let student = Student::new("s1", "Aki").prefers("s2");
        let compat = TeamCompatibility::for_student(&student, None);
        assert!(compat.partner_ids.is_empty());
        assert_eq!(compat.preferred_teammates(), 0);
    }
}
