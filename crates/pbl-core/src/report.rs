//! Per-student report assembly.
//!
//! This is the layer the dashboard endpoints call: it picks a student's
//! tasks and team out of a data snapshot, derives the transient
//! [`RiskFactors`] and runs every calculator once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Student, Task, Team, TeamCompatibility};
use crate::scoring::aptitude::AptitudeLookup;
use crate::scoring::danger::{compute_danger, danger_recommendations, DangerLevel, RiskFactors};
use crate::scoring::load::{compute_load, load_by_category, CategoryLoad, LoadLevel};
use crate::scoring::motivation::compute_motivation;

/// Days of silence after which activity/communication risk saturates.
pub const STALENESS_HORIZON_DAYS: f64 = 14.0;
/// Aptitude below which a task counts toward the skill gap.
pub const SKILL_GAP_THRESHOLD: f64 = 3.0;
/// Signal value used when a timestamp is missing.
pub const UNKNOWN_SIGNAL: f64 = 0.5;

/// Everything the scoring engine needs, read once per request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub students: Vec<Student>,
    pub tasks: Vec<Task>,
    pub teams: Vec<Team>,
}

impl Snapshot {
    pub fn student(&self, student_id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.student_id == student_id)
    }

    /// Tasks assigned to a student, in file order.
    pub fn tasks_for(&self, student_id: &str) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| t.assignee_id.as_deref() == Some(student_id))
            .cloned()
            .collect()
    }

    /// The student's team: by `team_id` first, then by roster membership.
    pub fn team_of(&self, student: &Student) -> Option<&Team> {
        student
            .team_id
            .as_deref()
            .and_then(|id| self.teams.iter().find(|t| t.team_id == id))
            .or_else(|| self.teams.iter().find(|t| t.contains(&student.student_id)))
    }

    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.team_id == team_id)
    }

    /// Students on a team, in roster order; unknown ids are skipped.
    pub fn members_of(&self, team: &Team) -> Vec<Student> {
        team.member_ids
            .iter()
            .filter_map(|id| self.student(id).cloned())
            .collect()
    }
}

fn days_since(at: Option<DateTime<Utc>>, reference: DateTime<Utc>) -> Option<f64> {
    at.map(|t| ((reference - t).num_seconds() as f64 / 86_400.0).max(0.0))
}

/// `1 - staleness`, 1 when the student was active at `reference`.
pub fn recent_activity(student: &Student, reference: DateTime<Utc>) -> f64 {
    days_since(student.last_active_at, reference)
        .map(|d| 1.0 - (d / STALENESS_HORIZON_DAYS).min(1.0))
        .unwrap_or(UNKNOWN_SIGNAL)
}

/// Staleness of the last check-in, 0 when it happened at `reference`.
pub fn communication_gap(student: &Student, reference: DateTime<Utc>) -> f64 {
    days_since(student.last_contact_at, reference)
        .map(|d| (d / STALENESS_HORIZON_DAYS).min(1.0))
        .unwrap_or(UNKNOWN_SIGNAL)
}

/// Share of active tasks in categories where the student is weak.
pub fn skill_gap(student: &Student, tasks: &[Task]) -> f64 {
    let lookup = AptitudeLookup::for_student(student);
    let active: Vec<&Task> = tasks.iter().filter(|t| t.is_active()).collect();
    if active.is_empty() {
        return 0.0;
    }
    let weak = active
        .iter()
        .filter(|t| lookup.skill(&t.category) < SKILL_GAP_THRESHOLD)
        .count();
    weak as f64 / active.len() as f64
}

/// Assemble the risk signals for one student.
pub fn risk_factors(
    student: &Student,
    tasks: &[Task],
    motivation_score: f64,
    load_score: f64,
    reference: DateTime<Utc>,
) -> RiskFactors {
    let overdue = tasks.iter().filter(|t| t.is_overdue(reference)).count();
    RiskFactors {
        motivation_score,
        load_score,
        overdue_tasks: u32::try_from(overdue).unwrap_or(u32::MAX),
        skill_gap: skill_gap(student, tasks),
        recent_activity: recent_activity(student, reference),
        communication_gap: communication_gap(student, reference),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub score: f64,
    pub level: LoadLevel,
    pub by_category: Vec<CategoryLoad>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DangerSummary {
    pub score: f64,
    pub level: DangerLevel,
    pub recommendations: Vec<String>,
}

/// Scores for one student at a reference time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentReport {
    pub student_id: String,
    pub name: String,
    pub team_id: Option<String>,
    pub task_count: usize,
    pub load: LoadSummary,
    pub motivation: f64,
    pub danger: DangerSummary,
    pub factors: RiskFactors,
    pub generated_at: DateTime<Utc>,
}

/// Run every calculator for one student.
pub fn build_student_report(
    student: &Student,
    tasks: &[Task],
    team: Option<&Team>,
    reference: DateTime<Utc>,
) -> StudentReport {
    let compat = TeamCompatibility::for_student(student, team);
    let load = compute_load(tasks, reference);
    let motivation = compute_motivation(student, tasks, &compat);
    let factors = risk_factors(student, tasks, motivation, load, reference);
    let danger = compute_danger(&factors);

    debug!(
        student_id = %student.student_id,
        load,
        motivation,
        danger,
        "built student report"
    );

    StudentReport {
        student_id: student.student_id.clone(),
        name: student.name.clone(),
        team_id: team.map(|t| t.team_id.clone()),
        task_count: tasks.len(),
        load: LoadSummary {
            score: load,
            level: LoadLevel::from_score(load),
            by_category: load_by_category(tasks),
        },
        motivation,
        danger: DangerSummary {
            score: danger,
            level: DangerLevel::from_score(danger),
            recommendations: danger_recommendations(danger, &factors),
        },
        factors,
        generated_at: reference,
    }
}

/// Report for one student out of a snapshot.
pub fn report_for(
    snapshot: &Snapshot,
    student: &Student,
    reference: DateTime<Utc>,
) -> StudentReport {
    let tasks = snapshot.tasks_for(&student.student_id);
    build_student_report(student, &tasks, snapshot.team_of(student), reference)
}

/// Reports for every student, riskiest first (ties by student id).
pub fn dashboard(snapshot: &Snapshot, reference: DateTime<Utc>) -> Vec<StudentReport> {
    let mut reports: Vec<StudentReport> = snapshot
        .students
        .iter()
        .map(|s| report_for(snapshot, s, reference))
        .collect();

    reports.sort_by(|a, b| {
        b.danger
            .score
            .total_cmp(&a.danger.score)
            .then_with(|| a.student_id.cmp(&b.student_id))
    });
    debug!(students = reports.len(), "built dashboard");
    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SkillField, SkillRatings, TaskStatus};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn snapshot() -> Snapshot {
        let mut steady = Student::new("s1", "Aki")
            .with_mbti("ENFJ")
            .prefers("s2")
            .in_team("t1")
            .with_skills(SkillRatings::default().with(SkillField::Design, 4.5));
        steady.last_active_at = Some(now());
        steady.last_contact_at = Some(now());

        let mut drifting = Student::new("s2", "Ben").with_mbti("ISTP").avoids("s1");
        drifting.last_active_at = Some(now() - Duration::days(20));

        let tasks = vec![
            Task::new("mockups", "design", 4, 6.0, now() + Duration::days(10)).assigned_to("s1"),
            Task::new("persona", "design", 3, 3.0, now() - Duration::days(5))
                .assigned_to("s1")
                .with_status(TaskStatus::Completed),
            Task::new("api", "development", 5, 12.0, now() - Duration::days(2)).assigned_to("s2"),
            Task::new("tests", "development", 4, 8.0, now() - Duration::days(1)).assigned_to("s2"),
            Task::new("deploy", "execution", 4, 10.0, now() + Duration::hours(10))
                .assigned_to("s2"),
        ];

        Snapshot {
            students: vec![steady, drifting],
            tasks,
            teams: vec![Team::new("t1", "Alpha").with_members(["s1", "s2"])],
        }
    }

    #[test]
    fn staleness_signals() {
        let mut student = Student::new("s1", "Aki");
        assert_eq!(recent_activity(&student, now()), 0.5);
        assert_eq!(communication_gap(&student, now()), 0.5);

        student.last_active_at = Some(now() - Duration::days(7));
        student.last_contact_at = Some(now() - Duration::days(30));
        assert!((recent_activity(&student, now()) - 0.5).abs() < 1e-12);
        assert_eq!(communication_gap(&student, now()), 1.0);
    }

    #[test]
    fn skill_gap_counts_weak_active_tasks() {
        let student = Student::new("s1", "Aki").with_skills(
            SkillRatings::default()
                .with(SkillField::Design, 2.0)
                .with(SkillField::Analysis, 4.0),
        );
        let tasks = vec![
            Task::new("a", "design", 3, 2.0, now()),
            Task::new("b", "analysis", 3, 2.0, now()),
            Task::new("c", "design", 3, 2.0, now()).with_status(TaskStatus::Completed),
        ];
        assert_eq!(skill_gap(&student, &tasks), 0.5);
        assert_eq!(skill_gap(&student, &[]), 0.0);
    }

    #[test]
    fn team_lookup_falls_back_to_roster() {
        let snap = snapshot();
        let drifting = snap.student("s2").unwrap();
        assert!(drifting.team_id.is_none());
        assert_eq!(snap.team_of(drifting).unwrap().team_id, "t1");
    }

    #[test]
    fn report_combines_every_score() {
        let snap = snapshot();
        let report = report_for(&snap, snap.student("s2").unwrap(), now());

        assert_eq!(report.task_count, 3);
        assert_eq!(report.factors.overdue_tasks, 2);
        assert_eq!(report.factors.recent_activity, 0.0);
        assert_eq!(report.load.level, LoadLevel::from_score(report.load.score));
        assert_eq!(report.danger.level, DangerLevel::from_score(report.danger.score));
        assert!(report.danger.recommendations.iter().any(|l| l.contains("2 overdue tasks")));
    }

    #[test]
    fn dashboard_orders_by_danger() {
        let snap = snapshot();
        let reports = dashboard(&snap, now());
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].student_id, "s2");
        assert!(reports[0].danger.score >= reports[1].danger.score);
    }

    #[test]
    fn reports_are_deterministic() {
        let snap = snapshot();
        assert_eq!(dashboard(&snap, now()), dashboard(&snap, now()));
    }
}
