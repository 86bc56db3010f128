use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod context;

use context::Context;

#[derive(Parser)]
#[command(name = "pbl-cli", version, about = "PBL dashboard CLI")]
struct Cli {
    /// Directory holding students.json, tasks.json and teams.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Config file (default: ~/.config/pbl-dashboard/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Reference time for scoring (RFC 3339 or YYYY-MM-DD)
    #[arg(long, global = true)]
    now: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Student profiles and reports
    Student {
        #[command(subcommand)]
        action: commands::student::StudentAction,
    },
    /// Reports for every student, riskiest first
    Dashboard,
    /// Individual scores for one student
    Score {
        #[command(subcommand)]
        action: commands::score::ScoreAction,
    },
    /// Narrative reasons behind a score
    Explain {
        #[command(subcommand)]
        action: commands::explain::ExplainAction,
    },
    /// Encouragement messages for one student
    Encourage {
        /// Student ID
        student_id: String,
    },
    /// Team analysis
    Team {
        #[command(subcommand)]
        action: commands::team::TeamAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Pull data from external sources
    Sync {
        #[command(subcommand)]
        action: commands::sync::SyncAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = Context::load(cli.data_dir, cli.config, cli.now.as_deref()).and_then(|ctx| {
        context::init_tracing(&ctx.config.log_level);
        tracing::debug!(
            data_dir = %ctx.data_dir.display(),
            now = %ctx.now,
            "resolved invocation context"
        );
        match cli.command {
            Commands::Student { action } => commands::student::run(&ctx, action),
            Commands::Dashboard => commands::student::dashboard(&ctx),
            Commands::Score { action } => commands::score::run(&ctx, action),
            Commands::Explain { action } => commands::explain::run(&ctx, action),
            Commands::Encourage { student_id } => commands::explain::encourage(&ctx, &student_id),
            Commands::Team { action } => commands::team::run(&ctx, action),
            Commands::Task { action } => commands::task::run(&ctx, action),
            Commands::Config { action } => commands::config::run(&ctx, action),
            Commands::Sync { action } => commands::sync::run(&ctx, action),
        }
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
