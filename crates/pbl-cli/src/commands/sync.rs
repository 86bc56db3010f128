//! External sync commands.

use clap::Subcommand;
use pbl_core::integrations::airtable::{sync_students, AirtableClient};

use crate::context::{print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum SyncAction {
    /// Pull the student roster from Airtable into students.json
    Airtable,
}

pub fn run(ctx: &Context, action: SyncAction) -> CliResult {
    match action {
        SyncAction::Airtable => {
            let client = AirtableClient::new(&ctx.config.airtable)?;
            let store = ctx.store()?;
            let runtime = tokio::runtime::Runtime::new()?;
            let summary = runtime.block_on(sync_students(&client, &store))?;
            print_json(&summary)
        }
    }
}
