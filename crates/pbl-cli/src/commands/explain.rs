//! Narrative explanations and encouragement.

use clap::Subcommand;
use pbl_core::{encouragement_examples, load_reason, motivation_reason, TeamCompatibility};
use serde_json::json;

use crate::context::{print_json, require_student, CliResult, Context};

#[derive(Subcommand)]
pub enum ExplainAction {
    /// Why the motivation score is what it is
    Motivation {
        /// Student ID
        id: String,
    },
    /// Why the workload score is what it is
    Load {
        /// Student ID
        id: String,
    },
}

pub fn run(ctx: &Context, action: ExplainAction) -> CliResult {
    let snapshot = ctx.snapshot()?;
    match action {
        ExplainAction::Motivation { id } => {
            let student = require_student(&snapshot, &id)?;
            let tasks = snapshot.tasks_for(&id);
            let compat = TeamCompatibility::for_student(student, snapshot.team_of(student));
            print_json(&motivation_reason(student, &tasks, &compat))
        }
        ExplainAction::Load { id } => {
            require_student(&snapshot, &id)?;
            print_json(&load_reason(&snapshot.tasks_for(&id), ctx.now))
        }
    }
}

pub fn encourage(ctx: &Context, student_id: &str) -> CliResult {
    let snapshot = ctx.snapshot()?;
    let student = require_student(&snapshot, student_id)?;
    let tasks = snapshot.tasks_for(student_id);
    let compat = TeamCompatibility::for_student(student, snapshot.team_of(student));
    let reason = motivation_reason(student, &tasks, &compat);

    print_json(&json!({
        "student_id": student_id,
        "motivation": reason.score,
        "messages": encouragement_examples(student, &reason),
    }))
}
