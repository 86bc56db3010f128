use clap::Subcommand;
use pbl_core::{compatibility_matrix, CoreError};
use serde_json::json;

use crate::context::{print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum TeamAction {
    /// List all teams
    List,
    /// Pairwise compatibility matrix for a team
    Compat {
        /// Team ID
        team_id: String,
    },
}

pub fn run(ctx: &Context, action: TeamAction) -> CliResult {
    let snapshot = ctx.snapshot()?;
    match action {
        TeamAction::List => print_json(&snapshot.teams),
        TeamAction::Compat { team_id } => {
            let team = snapshot.team(&team_id).ok_or_else(|| CoreError::NotFound {
                kind: "team",
                id: team_id.clone(),
            })?;
            let matrix = compatibility_matrix(&snapshot.members_of(team));
            print_json(&json!({
                "team_id": team.team_id,
                "name": team.name,
                "average": matrix.average(),
                "matrix": matrix,
            }))
        }
    }
}
