//! Single-score commands.

use clap::Subcommand;
use pbl_core::report::report_for;
use pbl_core::scoring::load::load_by_category;
use pbl_core::scoring::motivation::{motivation_terms, MotivationWeights};
use pbl_core::{compute_load, compute_motivation, LoadLevel, TeamCompatibility};
use serde_json::json;

use crate::context::{print_json, require_student, CliResult, Context};

#[derive(Subcommand)]
pub enum ScoreAction {
    /// Workload score (1-5)
    Load {
        /// Student ID
        id: String,
    },
    /// Motivation score (1-5) with its components
    Motivation {
        /// Student ID
        id: String,
    },
    /// Danger score (1-5) with risk factors and recommendations
    Danger {
        /// Student ID
        id: String,
    },
}

pub fn run(ctx: &Context, action: ScoreAction) -> CliResult {
    let snapshot = ctx.snapshot()?;
    match action {
        ScoreAction::Load { id } => {
            require_student(&snapshot, &id)?;
            let tasks = snapshot.tasks_for(&id);
            let score = compute_load(&tasks, ctx.now);
            print_json(&json!({
                "student_id": id,
                "score": score,
                "level": LoadLevel::from_score(score),
                "by_category": load_by_category(&tasks),
            }))
        }
        ScoreAction::Motivation { id } => {
            let student = require_student(&snapshot, &id)?;
            let tasks = snapshot.tasks_for(&id);
            let compat = TeamCompatibility::for_student(student, snapshot.team_of(student));
            let terms = motivation_terms(student, &tasks, &compat, &MotivationWeights::default());
            print_json(&json!({
                "student_id": id,
                "score": compute_motivation(student, &tasks, &compat),
                "components": terms,
            }))
        }
        ScoreAction::Danger { id } => {
            let student = require_student(&snapshot, &id)?;
            let report = report_for(&snapshot, student, ctx.now);
            print_json(&json!({
                "student_id": id,
                "score": report.danger.score,
                "level": report.danger.level,
                "factors": report.factors,
                "recommendations": report.danger.recommendations,
            }))
        }
    }
}
