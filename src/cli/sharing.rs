//
//  skyhook-cli
//  cli/sharing.rs
//

//! Collaborator commands.
//!
//! Collaborators share an app without owning it; the listing never includes
//! the owner. Ownership changes live under `sky apps transfer`.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::context::resolve_app;
use crate::output::print_json;

use super::{api_client, GlobalOptions};

/// Manage collaborators
#[derive(Args, Debug)]
pub struct SharingCommand {
    #[command(subcommand)]
    pub command: SharingSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SharingSubcommand {
    /// List the app's collaborators
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Add a collaborator
    Add(UserArgs),

    /// Remove a collaborator
    Remove(UserArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// The application (defaults to the app bound to this repo)
    #[arg(long)]
    pub app: Option<String>,
}

#[derive(Args, Debug)]
pub struct UserArgs {
    /// The collaborator's username
    pub username: String,

    /// The application (defaults to the app bound to this repo)
    #[arg(long)]
    pub app: Option<String>,
}

impl SharingCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            SharingSubcommand::List(args) => {
                let app = resolve_app(args.app.as_deref())?;
                let collaborators = api_client(global)?.list_collaborators(&app).await?;
                if global.json {
                    return print_json(&collaborators);
                }
                if collaborators.is_empty() {
                    println!("{app} is not shared with anyone.");
                }
                for username in collaborators {
                    println!("{username}");
                }
                Ok(())
            }
            SharingSubcommand::Add(args) => {
                let app = resolve_app(args.app.as_deref())?;
                api_client(global)?
                    .add_collaborator(&app, &args.username)
                    .await?;
                println!("Shared {app} with {}.", args.username);
                Ok(())
            }
            SharingSubcommand::Remove(args) => {
                let app = resolve_app(args.app.as_deref())?;
                api_client(global)?
                    .remove_collaborator(&app, &args.username)
                    .await?;
                println!("Removed {} from {app}.", args.username);
                Ok(())
            }
        }
    }
}
