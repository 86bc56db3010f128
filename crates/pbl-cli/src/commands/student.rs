//! Student listing and per-student reports.

use clap::Subcommand;
use pbl_core::report::{dashboard as build_dashboard, report_for};

use crate::context::{print_json, require_student, CliResult, Context};

#[derive(Subcommand)]
pub enum StudentAction {
    /// List all students
    List,
    /// Full report for one student
    Report {
        /// Student ID
        id: String,
    },
}

pub fn run(ctx: &Context, action: StudentAction) -> CliResult {
    let snapshot = ctx.snapshot()?;
    match action {
        StudentAction::List => print_json(&snapshot.students),
        StudentAction::Report { id } => {
            let student = require_student(&snapshot, &id)?;
            print_json(&report_for(&snapshot, student, ctx.now))
        }
    }
}

/// Every student's report, riskiest first.
pub fn dashboard(ctx: &Context) -> CliResult {
    let snapshot = ctx.snapshot()?;
    print_json(&build_dashboard(&snapshot, ctx.now))
}
