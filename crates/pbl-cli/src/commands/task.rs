//! Task management commands for CLI.

use clap::Subcommand;
use pbl_core::model::datetime;
use pbl_core::{Task, TaskStatus};

use crate::context::{print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks
    List {
        /// Only tasks assigned to this student
        #[arg(long)]
        student: Option<String>,
    },
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Work category (planning, design, development, ...)
        #[arg(long)]
        category: String,
        /// Difficulty 1-5
        #[arg(long, default_value = "3")]
        difficulty: u8,
        /// Estimated hours
        #[arg(long, default_value = "1")]
        hours: f64,
        /// Deadline (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        deadline: String,
        /// Student to assign the task to
        #[arg(long)]
        assignee: Option<String>,
    },
    /// Change a task's status
    Status {
        /// Task ID
        id: String,
        /// pending, in_progress or completed
        status: String,
    },
}

pub fn run(ctx: &Context, action: TaskAction) -> CliResult {
    let store = ctx.store()?;

    match action {
        TaskAction::List { student } => {
            let tasks = match student {
                Some(id) => store.tasks_for(&id)?,
                None => store.tasks()?,
            };
            print_json(&tasks)
        }
        TaskAction::Add {
            title,
            category,
            difficulty,
            hours,
            deadline,
            assignee,
        } => {
            if !(1..=5).contains(&difficulty) {
                return Err(format!("difficulty must be between 1 and 5, got {difficulty}").into());
            }
            if !hours.is_finite() || hours < 0.0 {
                return Err(format!("hours must be a non-negative number, got {hours}").into());
            }
            let deadline = datetime::parse(&deadline)
                .ok_or_else(|| format!("invalid deadline: {deadline}"))?;

            let mut task = Task::new(title, category, difficulty, hours, deadline);
            if let Some(student_id) = assignee {
                task = task.assigned_to(student_id);
            }
            store.add_task(task.clone())?;
            print_json(&task)
        }
        TaskAction::Status { id, status } => {
            let status: TaskStatus = status.parse()?;
            let task = store.set_task_status(&id, status)?;
            print_json(&task)
        }
    }
}
