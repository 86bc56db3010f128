//! Property-based tests for the scoring engine.
//!
//! Invariants covered:
//! - every score lands in [1, 5] with at most one decimal
//! - completed tasks never change the load score
//! - adding an active task never lowers the load score
//! - more overdue tasks never lower the danger score
//! - pair compatibility is symmetric

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use pbl_core::scoring::round1;
use pbl_core::{
    compute_danger, compute_load, compute_motivation, estimate_motivation_from_progress,
    pair_compatibility, RiskFactors, SkillField, SkillRatings, Student, Task, TaskStatus, Team,
    TeamCompatibility,
};

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn arb_status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Pending),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Completed),
    ]
}

fn arb_category() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("planning"),
        Just("design"),
        Just("development"),
        Just("analysis"),
        Just("presentation"),
    ]
}

fn arb_task() -> impl Strategy<Value = Task> {
    (
        1u8..=5,               // difficulty
        0u32..=400,            // estimated hours, tenths
        -240i64..=720,         // deadline offset, hours
        arb_status(),
        arb_category(),
    )
        .prop_map(|(difficulty, hours, offset, status, category)| {
            Task::new(
                "task",
                category,
                difficulty,
                f64::from(hours) / 10.0,
                reference() + Duration::hours(offset),
            )
            .with_status(status)
        })
}

fn arb_mbti() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("ENFP".to_string()),
        Just("ESTJ".to_string()),
        Just("INTJ".to_string()),
        Just("isfp".to_string()),
        Just("XYZ".to_string()),
    ]
}

fn arb_rating() -> impl Strategy<Value = Option<f64>> {
    proptest::option::of((10u32..=50).prop_map(|v| f64::from(v) / 10.0))
}

fn arb_student(id: &'static str) -> impl Strategy<Value = Student> {
    (
        arb_mbti(),
        arb_rating(),
        arb_rating(),
        proptest::bool::ANY,
        proptest::bool::ANY,
    )
        .prop_map(move |(mbti, design, development, prefers, avoids)| {
            let mut skills = SkillRatings::default();
            skills.set(SkillField::Design, design);
            skills.set(SkillField::Development, development);
            let mut student = Student::new(id, id).with_mbti(mbti).with_skills(skills);
            if prefers {
                student = student.prefers("b");
            }
            if avoids {
                student = student.avoids("b");
            }
            student
        })
}

fn arb_factors() -> impl Strategy<Value = RiskFactors> {
    (
        (10u32..=50).prop_map(|v| f64::from(v) / 10.0),
        (10u32..=50).prop_map(|v| f64::from(v) / 10.0),
        0u32..=10,
        (0u32..=100).prop_map(|v| f64::from(v) / 100.0),
        (0u32..=100).prop_map(|v| f64::from(v) / 100.0),
        (0u32..=100).prop_map(|v| f64::from(v) / 100.0),
    )
        .prop_map(
            |(motivation_score, load_score, overdue_tasks, skill_gap, recent_activity, communication_gap)| {
                RiskFactors {
                    motivation_score,
                    load_score,
                    overdue_tasks,
                    skill_gap,
                    recent_activity,
                    communication_gap,
                }
            },
        )
}

fn assert_score(score: f64) {
    assert!((1.0..=5.0).contains(&score), "score out of range: {score}");
    assert_eq!(round1(score), score, "score not rounded: {score}");
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn load_is_bounded_and_rounded(tasks in prop::collection::vec(arb_task(), 0..12)) {
        assert_score(compute_load(&tasks, reference()));
    }

    #[test]
    fn completed_tasks_do_not_change_load(
        tasks in prop::collection::vec(arb_task(), 0..8),
        done in prop::collection::vec(arb_task(), 1..4),
    ) {
        let mut with_done = tasks.clone();
        with_done.extend(done.into_iter().map(|t| t.with_status(TaskStatus::Completed)));
        prop_assert_eq!(compute_load(&tasks, reference()), compute_load(&with_done, reference()));
    }

    #[test]
    fn adding_active_task_never_lowers_load(
        tasks in prop::collection::vec(arb_task(), 0..8),
        extra in arb_task(),
    ) {
        let before = compute_load(&tasks, reference());
        let mut more = tasks.clone();
        more.push(extra.with_status(TaskStatus::Pending));
        prop_assert!(compute_load(&more, reference()) >= before);
    }

    #[test]
    fn motivation_is_bounded_and_rounded(
        student in arb_student("a"),
        tasks in prop::collection::vec(arb_task(), 0..8),
    ) {
        let team = Team::new("t1", "Alpha").with_members(["a", "b", "c"]);
        let compat = TeamCompatibility::for_student(&student, Some(&team));
        assert_score(compute_motivation(&student, &tasks, &compat));
    }

    #[test]
    fn progress_estimate_is_bounded(completed in 0usize..50, in_progress in 0usize..50, pending in 0usize..50) {
        assert_score(estimate_motivation_from_progress(completed, in_progress, pending));
    }

    #[test]
    fn danger_is_bounded_and_rounded(factors in arb_factors()) {
        assert_score(compute_danger(&factors));
    }

    #[test]
    fn more_overdue_never_lowers_danger(factors in arb_factors(), extra in 1u32..5) {
        let worse = RiskFactors { overdue_tasks: factors.overdue_tasks + extra, ..factors };
        prop_assert!(compute_danger(&worse) >= compute_danger(&factors));
    }

    #[test]
    fn pair_compatibility_is_symmetric(a in arb_student("a"), b in arb_student("b")) {
        let ab = pair_compatibility(&a, &b);
        let ba = pair_compatibility(&b, &a);
        prop_assert_eq!(ab.score, ba.score);
        assert_score(ab.score);
    }
}
